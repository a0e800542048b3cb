// noise.rs - Smooth 1D value noise for the wind
//
// Octave-summed lattice noise with cosine easing. Output lies in [0, 1).

use crate::sim::RainWorld;

const TABLE_BITS: usize = 12;
const TABLE_SIZE: usize = 1 << TABLE_BITS;
const TABLE_MASK: usize = TABLE_SIZE - 1;

const OCTAVES: usize = 4;
const FALLOFF: f32 = 0.5;

pub struct Noise {
    table: Vec<f32>,
}

impl Noise {
    pub fn new(rng: &mut u32) -> Self {
        let table = (0..TABLE_SIZE).map(|_| RainWorld::rand(rng)).collect();
        Self { table }
    }

    /// Sample the noise at `x`. Continuous in `x`.
    pub fn sample(&self, x: f32) -> f32 {
        let x = x.abs();
        let mut xi = x.floor() as usize;
        let mut xf = x - x.floor();

        let mut sum = 0.0;
        let mut amp = 0.5;

        for _ in 0..OCTAVES {
            let i = xi & TABLE_MASK;
            let a = self.table[i];
            let b = self.table[(i + 1) & TABLE_MASK];
            sum += (a + ease(xf) * (b - a)) * amp;

            amp *= FALLOFF;
            xi <<= 1;
            xf *= 2.0;
            if xf >= 1.0 {
                xi += 1;
                xf -= 1.0;
            }
        }

        sum
    }
}

#[inline]
fn ease(t: f32) -> f32 {
    0.5 * (1.0 - (t * std::f32::consts::PI).cos())
}

/// Map `v` from [a0, a1] onto [b0, b1]
#[inline]
pub fn remap(v: f32, a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    b0 + (v - a0) / (a1 - a0) * (b1 - b0)
}
