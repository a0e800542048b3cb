// fall.rs - Falling glyphs: motion and landing
//
// Constant-speed descent with a shared wind push and a small per-glyph sway.
// A glyph lands on the ground line, or on top of a pile once it is past the
// middle of the scene. First matching pile wins.

use super::{Cue, Entity, RainWorld};
use crate::world::{GLYPH_HEIGHT, Layout, touches_pile};

const SWAY_RATE: f32 = 0.05;
const SWAY_AMPLITUDE: f32 = 0.5;
const MAX_TILT: f32 = 0.15;

/// Advance every falling glyph by one frame.
///
/// `time` is the frame counter driving the sway; `wind` is this frame's shared
/// horizontal push. Landings that should be heard are pushed onto `cues`.
pub fn update(
    entities: &mut [Entity],
    wind: f32,
    time: f32,
    layout: &Layout,
    decay_range: [f32; 2],
    cues: &mut Vec<Cue>,
    rng: &mut u32,
) {
    let ground = layout.ground_y();
    let pile_line = layout.pile_line();

    for i in (0..entities.len()).rev() {
        if !entities[i].is_falling() {
            continue;
        }

        let e = &entities[i];
        let y = e.y + e.speed;
        let x = e.x + wind + (time * SWAY_RATE + e.id).sin() * SWAY_AMPLITUDE;

        let landing = if y >= ground {
            Some(ground)
        } else if y > pile_line {
            find_pile(entities, i, x, y)
        } else {
            None
        };

        let e = &mut entities[i];
        e.x = x;
        e.y = y;

        if let Some(land_y) = landing {
            let decay = RainWorld::range(rng, decay_range);
            let angle = RainWorld::range(rng, [-MAX_TILT, MAX_TILT]);
            e.land(land_y, decay, angle);

            if audible(layout, land_y) {
                cues.push(Cue::pluck(rng));
            }
        }
    }
}

/// Rest height on the first stacked glyph under (x, y), if any
fn find_pile(entities: &[Entity], skip: usize, x: f32, y: f32) -> Option<f32> {
    entities
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != skip && other.is_stacked())
        .find(|(_, other)| touches_pile(x, y, other.x, other.y))
        .map(|(_, other)| other.y - GLYPH_HEIGHT)
}

/// Pile landings below the top band ring; ground landings stay quiet so the
/// floor does not drown the piece.
#[inline]
fn audible(layout: &Layout, land_y: f32) -> bool {
    land_y > layout.cue_line() && land_y < layout.ground_y()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::State;

    const DECAY: [f32; 2] = [0.5, 1.5];

    fn layout() -> Layout {
        Layout::new(800, 600)
    }

    #[test]
    fn falls_by_speed_each_frame() {
        let mut entities = vec![Entity::falling(0.0, 100.0, -50.0, 'f', 8.0, 30.0)];
        let mut cues = Vec::new();
        let mut rng = 1;

        update(&mut entities, 0.0, 0.0, &layout(), DECAY, &mut cues, &mut rng);

        assert_eq!(entities[0].y, -42.0);
        assert!(entities[0].is_falling());
    }

    #[test]
    fn wind_pushes_sideways() {
        // Zero id at time zero puts the sway at sin(0)
        let mut entities = vec![Entity::falling(0.0, 100.0, 0.0, 'a', 1.0, 30.0)];
        let mut cues = Vec::new();
        let mut rng = 1;

        update(&mut entities, 0.75, 0.0, &layout(), DECAY, &mut cues, &mut rng);

        assert!((entities[0].x - 100.75).abs() < 1e-4);
    }

    #[test]
    fn sway_is_bounded() {
        let mut entities = vec![Entity::falling(1234.0, 400.0, 0.0, 'l', 0.0, 30.0)];
        let mut cues = Vec::new();
        let mut rng = 1;

        for t in 0..200 {
            let before = entities[0].x;
            update(&mut entities, 0.0, t as f32, &layout(), DECAY, &mut cues, &mut rng);
            assert!((entities[0].x - before).abs() <= SWAY_AMPLITUDE + 1e-3);
        }
    }

    #[test]
    fn reaching_ground_lands_same_frame() {
        let layout = layout();
        let mut entities = vec![Entity::falling(0.0, 100.0, layout.ground_y() - 3.0, 'i', 8.0, 30.0)];
        let mut cues = Vec::new();
        let mut rng = 5;

        update(&mut entities, 0.0, 0.0, &layout, DECAY, &mut cues, &mut rng);

        let e = &entities[0];
        assert_eq!(e.state, State::Stacked);
        assert_eq!(e.y, layout.ground_y());
        assert_eq!(e.speed, 0.0);
        assert!(e.decay >= 0.5 && e.decay < 1.5);
        assert!(e.angle.abs() <= MAX_TILT);
        assert!(cues.is_empty(), "ground landings are silent");
    }

    #[test]
    fn lands_on_pile_and_rings() {
        let layout = layout();
        let ground = layout.ground_y();
        let mut entities = vec![
            Entity::stacked(100.0, ground, 'f', 1.0),
            Entity::falling(0.0, 100.0, ground - 25.0, 'a', 8.0, 30.0),
        ];
        let mut cues = Vec::new();
        let mut rng = 11;

        update(&mut entities, 0.0, 0.0, &layout, DECAY, &mut cues, &mut rng);

        let e = &entities[1];
        assert!(e.is_stacked());
        assert_eq!(e.y, ground - GLYPH_HEIGHT);
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn ignores_piles_above_midline() {
        let layout = layout();
        let mut entities = vec![
            Entity::stacked(100.0, 200.0, 'f', 1.0),
            Entity::falling(0.0, 100.0, 180.0, 'a', 8.0, 30.0),
        ];
        let mut cues = Vec::new();
        let mut rng = 11;

        update(&mut entities, 0.0, 0.0, &layout, DECAY, &mut cues, &mut rng);

        assert!(entities[1].is_falling());
        assert_eq!(entities[1].y, 188.0);
    }

    #[test]
    fn misses_pile_out_of_reach() {
        let layout = layout();
        let ground = layout.ground_y();
        let mut entities = vec![
            Entity::stacked(100.0, ground, 'f', 1.0),
            Entity::falling(0.0, 130.0, ground - 30.0, 'a', 8.0, 30.0),
        ];
        let mut cues = Vec::new();
        let mut rng = 11;

        update(&mut entities, 0.0, 0.0, &layout, DECAY, &mut cues, &mut rng);

        assert!(entities[1].is_falling());
    }

    #[test]
    fn stacked_glyphs_do_not_move() {
        let layout = layout();
        let mut entities = vec![Entity::stacked(321.0, 400.0, 'n', 1.0)];
        let mut cues = Vec::new();
        let mut rng = 2;

        update(&mut entities, 1.0, 3.0, &layout, DECAY, &mut cues, &mut rng);

        assert_eq!(entities[0].x, 321.0);
        assert_eq!(entities[0].y, 400.0);
    }
}
