// grain.rs - Paper grain texture
//
// One RGBA pixel per canvas pixel: light gray, mostly transparent. Built once
// per canvas size and multiplied over each finished frame.

use crate::sim::RainWorld;

const GRAY: [f32; 2] = [200.0, 255.0];
const ALPHA: [f32; 2] = [20.0, 40.0];

pub struct Grain {
    w: u32,
    h: u32,
    rgba: Vec<u8>,
}

impl Grain {
    pub fn new(w: u32, h: u32, rng: &mut u32) -> Self {
        let mut grain = Self { w: 0, h: 0, rgba: Vec::new() };
        grain.regenerate(w, h, rng);
        grain
    }

    /// Rebuild for a new canvas size
    pub fn regenerate(&mut self, w: u32, h: u32, rng: &mut u32) {
        self.w = w;
        self.h = h;
        self.rgba.clear();
        self.rgba.reserve(w as usize * h as usize * 4);

        for _ in 0..w as usize * h as usize {
            let gray = RainWorld::range(rng, GRAY) as u8;
            let alpha = RainWorld::range(rng, ALPHA) as u8;
            self.rgba.extend_from_slice(&[gray, gray, gray, alpha]);
        }
    }

    pub fn width(&self) -> u32 { self.w }
    pub fn height(&self) -> u32 { self.h }
    pub fn pixels(&self) -> &[u8] { &self.rgba }

    /// (gray, alpha) at pixel, clamped to the edges
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> (u8, u8) {
        if self.w == 0 || self.h == 0 {
            return (255, 0);
        }
        let x = x.min(self.w - 1);
        let y = y.min(self.h - 1);
        let i = offset(self.w, x, y);
        (self.rgba[i], self.rgba[i + 3])
    }
}

/// Byte offset of pixel (x, y) in a row-major RGBA buffer `w` pixels wide
#[inline]
fn offset(w: u32, x: u32, y: u32) -> usize {
    (y as usize * w as usize + x as usize) * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_light_and_faint() {
        let mut rng = 21;
        let grain = Grain::new(32, 16, &mut rng);
        assert_eq!(grain.pixels().len(), 32 * 16 * 4);

        for px in grain.pixels().chunks_exact(4) {
            assert!(px[0] >= 200);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert!((20..40).contains(&px[3]));
        }
    }

    #[test]
    fn regenerate_follows_size() {
        let mut rng = 21;
        let mut grain = Grain::new(4, 4, &mut rng);
        grain.regenerate(10, 3, &mut rng);
        assert_eq!((grain.width(), grain.height()), (10, 3));
        assert_eq!(grain.pixels().len(), 120);
        assert_eq!(grain.sample(50, 50), grain.sample(9, 2));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn offsets_do_not_wrap_on_huge_canvases() {
        assert_eq!(offset(10, 9, 2), 116);
        // 40000 x 30000 RGBA is past u32::MAX bytes
        let last = offset(40_000, 39_999, 29_999) as u64;
        assert_eq!(last, (29_999u64 * 40_000 + 39_999) * 4);
    }
}
