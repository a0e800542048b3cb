// render.rs - Encode simulation state into a frame plan
//
// The encoder turns the world into an ordered list of draw commands. Backends
// (the browser canvas, the PNG snapshot tool) replay the list as-is:
//
//   Clear     background fill
//   Glyph     one character with the ink gradient, maybe tilted and faded
//   Tail      fading streak above a falling glyph
//   Grain     the paper texture, jittered, multiplied over everything
//
// Encoding never touches the world. Grain jitter draws from the encoder's
// own random state.

use crate::grain::Grain;
use crate::sim::{Entity, RainWorld, State};

pub const BACKGROUND: Rgb = Rgb(0xf8, 0xf7, 0xf4);
pub const INK: Rgb = Rgb(0x02, 0x1c, 0xbc);
pub const INK_DARK: Rgb = Rgb(0x01, 0x0e, 0x5e);

/// Glyph sizes in canvas units
pub const DROP_SIZE: f32 = 24.0;
pub const HEADLINE_SIZE: f32 = 28.0;

/// Monospace advance as a fraction of font size
pub const ADVANCE: f32 = 0.6;

/// Half height of the ink gradient around a glyph's center
pub const INK_SPAN: f32 = 12.0;

// Tail
pub const TAIL_MIN_SPEED: f32 = 2.0;
pub const TAIL_START: f32 = 10.0;
pub const TAIL_HALF_WIDTH: f32 = 1.5;
pub const TAIL_ALPHA: f32 = 0.4;

// Grain
const GRAIN_JITTER: f32 = 5.0;
const GRAIN_BLEED: f32 = 10.0;

// Headline
const HEADLINE_TOP: f32 = 0.15;
const HEADLINE_LEADING: f32 = 40.0;
const SWAY_RATE: f32 = 0.02;
const HEADLINE: [Line; 2] = [
    Line { text: "Listen,", nudge: 0.0, phase: 0.5, amp: 5.0 },
    Line { text: "the rain is", nudge: 10.0, phase: 0.4, amp: 4.0 },
];

struct Line {
    text: &'static str,
    /// Horizontal offset of the line's center from the canvas center
    nudge: f32,
    /// Sway phase step per glyph
    phase: f32,
    amp: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    pub fn css_alpha(self, a: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, a)
    }

    pub fn lerp(self, o: Rgb, t: f32) -> Rgb {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, o.0), mix(self.1, o.1), mix(self.2, o.2))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear { color: Rgb },
    Glyph { ch: char, x: f32, y: f32, size: f32, align: Align, angle: f32, alpha: f32 },
    Tail { x: f32, y: f32, length: f32 },
    Grain { dx: f32, dy: f32, w: f32, h: f32 },
}

pub struct Encoder {
    cmds: Vec<DrawCmd>,
    grain: Grain,
    w: u32,
    h: u32,
    rng: u32,
}

impl Encoder {
    pub fn new(w: u32, h: u32, seed: u32) -> Self {
        let mut rng = seed.max(1);
        let grain = Grain::new(w, h, &mut rng);
        Self { cmds: Vec::new(), grain, w, h, rng }
    }

    /// New canvas size. Regenerates the grain unless the size is unchanged.
    pub fn resize(&mut self, w: u32, h: u32) {
        if (w, h) == (self.w, self.h) {
            return;
        }
        self.w = w;
        self.h = h;
        self.grain.regenerate(w, h, &mut self.rng);
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn commands(&self) -> &[DrawCmd] { &self.cmds }
    pub fn grain(&self) -> &Grain { &self.grain }
    pub fn width(&self) -> u32 { self.w }
    pub fn height(&self) -> u32 { self.h }

    /// Build the full frame plan for the world's current state
    pub fn encode(&mut self, world: &RainWorld) -> &[DrawCmd] {
        self.clear();
        self.cmds.push(DrawCmd::Clear { color: BACKGROUND });
        self.encode_headline(world.frame());
        self.encode_entities(world.entities());
        self.encode_grain();
        &self.cmds
    }

    /// Swaying static text, left-aligned per line and centered as a block
    fn encode_headline(&mut self, frame: u64) {
        let w = self.w as f32;
        let top = self.h as f32 * HEADLINE_TOP;
        let advance = HEADLINE_SIZE * ADVANCE;
        let t = frame as f32 * SWAY_RATE;

        for (row, line) in HEADLINE.iter().enumerate() {
            let width = line.text.chars().count() as f32 * advance;
            let mut x = w / 2.0 + line.nudge - width / 2.0;
            let y = top + row as f32 * HEADLINE_LEADING;

            for (i, ch) in line.text.chars().enumerate() {
                let sway = (t + i as f32 * line.phase).sin() * line.amp;
                self.cmds.push(DrawCmd::Glyph {
                    ch,
                    x,
                    y: y + sway,
                    size: HEADLINE_SIZE,
                    align: Align::Left,
                    angle: 0.0,
                    alpha: 1.0,
                });
                x += advance;
            }
        }
    }

    /// Falling glyphs get a streak, stacked ones keep their tilt and fade
    fn encode_entities(&mut self, entities: &[Entity]) {
        for e in entities {
            match e.state {
                State::Falling => {
                    if e.speed > TAIL_MIN_SPEED && e.tail > TAIL_START {
                        self.cmds.push(DrawCmd::Tail { x: e.x, y: e.y, length: e.tail });
                    }
                    self.cmds.push(DrawCmd::Glyph {
                        ch: e.glyph,
                        x: e.x,
                        y: e.y,
                        size: DROP_SIZE,
                        align: Align::Center,
                        angle: 0.0,
                        alpha: 1.0,
                    });
                }
                State::Stacked => {
                    self.cmds.push(DrawCmd::Glyph {
                        ch: e.glyph,
                        x: e.x,
                        y: e.y,
                        size: DROP_SIZE,
                        align: Align::Center,
                        angle: e.angle,
                        alpha: e.opacity(),
                    });
                }
            }
        }
    }

    fn encode_grain(&mut self) {
        let span = [-GRAIN_JITTER, GRAIN_JITTER];
        let dx = RainWorld::range(&mut self.rng, span);
        let dy = RainWorld::range(&mut self.rng, span);
        self.cmds.push(DrawCmd::Grain {
            dx,
            dy,
            w: self.w as f32 + GRAIN_BLEED,
            h: self.h as f32 + GRAIN_BLEED,
        });
    }
}
