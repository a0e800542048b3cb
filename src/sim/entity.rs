// entity.rs - A single glyph in the rain
//
// One struct for both states. Fields marked (falling) or (stacked) only carry
// meaning in that state; the others hold whatever the last transition left.

pub const FULL_ALPHA: f32 = 255.0;

/// Speed given to a stacked glyph that lost its support
pub const RESTART_SPEED: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Falling,
    Stacked,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Sway phase tag, not an identity
    pub id: f32,
    pub state: State,
    pub x: f32,
    pub y: f32,
    pub glyph: char,

    /// (falling) units per frame, zero once stacked
    pub speed: f32,
    /// (falling) streak length
    pub tail: f32,

    /// (stacked) opacity in 0..=255
    pub alpha: f32,
    /// (stacked) alpha lost per frame
    pub decay: f32,
    /// (stacked) tilt in radians
    pub angle: f32,
}

impl Entity {
    pub fn falling(id: f32, x: f32, y: f32, glyph: char, speed: f32, tail: f32) -> Self {
        Self {
            id,
            state: State::Falling,
            x,
            y,
            glyph,
            speed,
            tail,
            alpha: FULL_ALPHA,
            decay: 0.0,
            angle: 0.0,
        }
    }

    /// A glyph already at rest, mostly useful for building piles by hand
    pub fn stacked(x: f32, y: f32, glyph: char, decay: f32) -> Self {
        Self {
            id: 0.0,
            state: State::Stacked,
            x,
            y,
            glyph,
            speed: 0.0,
            tail: 0.0,
            alpha: FULL_ALPHA,
            decay,
            angle: 0.0,
        }
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.state == State::Falling
    }

    #[inline]
    pub fn is_stacked(&self) -> bool {
        self.state == State::Stacked
    }

    /// Come to rest at `y`
    pub fn land(&mut self, y: f32, decay: f32, angle: f32) {
        self.state = State::Stacked;
        self.y = y;
        self.speed = 0.0;
        self.decay = decay;
        self.angle = angle;
    }

    /// Lose support and start falling again
    pub fn release(&mut self) {
        self.state = State::Falling;
        self.speed = RESTART_SPEED;
        self.tail = 0.0;
        self.angle = 0.0;
    }

    /// Opacity the glyph should be drawn with, in 0..=1
    #[inline]
    pub fn opacity(&self) -> f32 {
        match self.state {
            State::Falling => 1.0,
            State::Stacked => (self.alpha / FULL_ALPHA).clamp(0.0, 1.0),
        }
    }
}
