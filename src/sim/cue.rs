// cue.rs - Audio cues raised by the simulation
//
// The sim never talks to an audio device. Landings push a cue; the host drains
// the queue once per frame and plays whatever it can.

use super::RainWorld;

/// A 64th note at 120 bpm, in seconds
pub const PLUCK_DURATION: f32 = 0.03125;

const VELOCITY_MIN: f32 = 0.1;
const VELOCITY_SPAN: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Note {
    G5,
    A5,
    C6,
    D6,
    E6,
    G6,
}

impl Note {
    pub const ALL: [Note; 6] = [Note::G5, Note::A5, Note::C6, Note::D6, Note::E6, Note::G6];

    /// Equal-tempered pitch in Hz
    pub fn frequency(self) -> f32 {
        match self {
            Note::G5 => 783.99,
            Note::A5 => 880.00,
            Note::C6 => 1046.50,
            Note::D6 => 1174.66,
            Note::E6 => 1318.51,
            Note::G6 => 1567.98,
        }
    }

    pub fn pick(rng: &mut u32) -> Note {
        let i = (RainWorld::rand(rng) * Note::ALL.len() as f32) as usize;
        Note::ALL[i.min(Note::ALL.len() - 1)]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cue {
    pub note: Note,
    /// Seconds
    pub duration: f32,
    /// 0..=1
    pub velocity: f32,
}

impl Cue {
    /// A pluck with random pitch and a soft random velocity
    pub fn pluck(rng: &mut u32) -> Self {
        let note = Note::pick(rng);
        let velocity = VELOCITY_MIN + RainWorld::rand(rng) * VELOCITY_SPAN;
        Self { note, duration: PLUCK_DURATION, velocity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluck_stays_soft() {
        let mut rng = 42;
        for _ in 0..1000 {
            let cue = Cue::pluck(&mut rng);
            assert!(cue.velocity >= 0.1 && cue.velocity < 0.4);
            assert_eq!(cue.duration, PLUCK_DURATION);
            assert!(Note::ALL.contains(&cue.note));
        }
    }

    #[test]
    fn notes_ascend() {
        let freqs: Vec<f32> = Note::ALL.iter().map(|n| n.frequency()).collect();
        assert!(freqs.windows(2).all(|w| w[0] < w[1]));
    }
}
