// sound.rs - Audio parameters and sample generation
//
// Device-free parts of the audio engine: levels, envelope timings and the
// pink-noise bed. The browser engine in web/audio.rs wires these into nodes.

use crate::sim::RainWorld;

/// Master level of the plucks
pub const PLUCK_DB: f32 = -10.0;
/// Level of the rain bed
pub const NOISE_DB: f32 = -20.0;
/// Low-pass cutoff on the rain bed
pub const NOISE_CUTOFF_HZ: f32 = 800.0;
/// Length of the looped noise buffer
pub const NOISE_SECONDS: f32 = 4.0;

/// Pluck envelope: short attack, quick decay, no sustain
pub const ATTACK: f64 = 0.005;
pub const DECAY: f64 = 0.1;
pub const RELEASE: f64 = 0.1;

/// Web Audio refuses exponential ramps to zero
pub const SILENCE: f32 = 0.0001;

#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// Pink noise via Paul Kellet's refined filter over white noise.
/// Output roughly in [-1, 1].
pub fn pink_noise(len: usize, rng: &mut u32) -> Vec<f32> {
    let (mut b0, mut b1, mut b2, mut b3, mut b4, mut b5, mut b6) =
        (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);

    (0..len)
        .map(|_| {
            let white = RainWorld::rand(rng) * 2.0 - 1.0;
            b0 = 0.99886 * b0 + white * 0.0555179;
            b1 = 0.99332 * b1 + white * 0.0750759;
            b2 = 0.96900 * b2 + white * 0.1538520;
            b3 = 0.86650 * b3 + white * 0.3104856;
            b4 = 0.55000 * b4 + white * 0.5329522;
            b5 = -0.7616 * b5 - white * 0.0168980;
            let pink = b0 + b1 + b2 + b3 + b4 + b5 + b6 + white * 0.5362;
            b6 = white * 0.115926;
            (pink * 0.11).clamp(-1.0, 1.0)
        })
        .collect()
}
