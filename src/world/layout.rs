// layout.rs - Scene geometry
//
// All coordinates are in canvas units, y growing downward.

/// Distance from the bottom edge to the ground line
pub const GROUND_MARGIN: f32 = 50.0;

/// Horizontal distance under which two glyphs count as touching
pub const PILE_TOLERANCE: f32 = 18.0;

/// Vertical pitch of a pile, one glyph per step
pub const GLYPH_HEIGHT: f32 = 20.0;

/// Slack allowed when checking that a glyph rests on the one below
pub const SUPPORT_SLACK: f32 = 5.0;

// Fractions of scene height
const PILE_LINE: f32 = 0.5;
const CUE_LINE: f32 = 0.2;

// Spawn band
const SPAWN_MARGIN: f32 = 0.1;
const SPAWN_TOP: f32 = -100.0;
const SPAWN_BOTTOM: f32 = -10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width: width as f32, height: height as f32 }
    }

    /// Where falling glyphs come to rest
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_MARGIN
    }

    /// Glyphs only test against piles once below this line
    #[inline]
    pub fn pile_line(&self) -> f32 {
        self.height * PILE_LINE
    }

    /// Landings above this line stay silent
    #[inline]
    pub fn cue_line(&self) -> f32 {
        self.height * CUE_LINE
    }

    /// Ground-level glyphs are always supported
    #[inline]
    pub fn on_ground(&self, y: f32) -> bool {
        y >= self.ground_y() - 1.0
    }

    /// Horizontal spawn band: the central 80% of the width
    #[inline]
    pub fn spawn_x(&self) -> (f32, f32) {
        (self.width * SPAWN_MARGIN, self.width * (1.0 - SPAWN_MARGIN))
    }

    /// Vertical spawn band, fully above the top edge
    #[inline]
    pub fn spawn_y(&self) -> (f32, f32) {
        (SPAWN_TOP, SPAWN_BOTTOM)
    }
}

/// Whether `upper` sits one glyph above `lower` within pile tolerance
#[inline]
pub fn rests_on(upper_x: f32, upper_y: f32, lower_x: f32, lower_y: f32) -> bool {
    (upper_x - lower_x).abs() < PILE_TOLERANCE
        && (upper_y - (lower_y - GLYPH_HEIGHT)).abs() < SUPPORT_SLACK
}

/// Whether a falling glyph at (x, y) has reached the top of a pile at (px, py)
#[inline]
pub fn touches_pile(x: f32, y: f32, px: f32, py: f32) -> bool {
    (x - px).abs() < PILE_TOLERANCE && y >= py - GLYPH_HEIGHT && y < py
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_sits_above_bottom_edge() {
        let layout = Layout::new(800, 600);
        assert_eq!(layout.ground_y(), 550.0);
        assert!(layout.on_ground(549.5));
        assert!(!layout.on_ground(530.0));
    }

    #[test]
    fn spawn_band_is_central_and_offscreen() {
        let layout = Layout::new(1000, 600);
        assert_eq!(layout.spawn_x(), (100.0, 900.0));
        let (top, bottom) = layout.spawn_y();
        assert!(top < bottom && bottom < 0.0);
    }

    #[test]
    fn pile_contact_needs_overlap_from_above() {
        assert!(touches_pile(100.0, 535.0, 110.0, 550.0));
        assert!(!touches_pile(100.0, 550.0, 100.0, 550.0));
        assert!(!touches_pile(100.0, 529.0, 100.0, 550.0));
        assert!(!touches_pile(100.0, 535.0, 118.0, 550.0));
    }

    #[test]
    fn resting_allows_small_slack() {
        assert!(rests_on(100.0, 530.0, 100.0, 550.0));
        assert!(rests_on(104.0, 533.0, 100.0, 550.0));
        assert!(!rests_on(100.0, 524.0, 100.0, 550.0));
    }
}
