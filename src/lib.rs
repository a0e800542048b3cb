//! Glyph Rain - letters falling as rain, piling up and fading away.
//!
//! - sim/     - glyph store, spawner, fall and pile steps
//! - world/   - scene geometry and wind noise
//! - render   - frame plan for canvas / PNG backends
//! - web/     - browser experience: start gate, canvas, audio (wasm32 only)

#[macro_use]
pub mod log;

pub mod config;
pub mod grain;
pub mod render;
pub mod sim;
pub mod sound;
pub mod world;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use config::Config;
pub use render::{DrawCmd, Encoder};
pub use sim::{Cue, Entity, Note, RainWorld, State};

#[cfg(target_arch = "wasm32")]
pub use web::{Experience, mount};

/// Floats per glyph in the packed output
pub const STRIDE: usize = 8;

/// Install the panic hook and say hello
#[wasm_bindgen]
pub fn init() {
    #[cfg(all(target_arch = "wasm32", feature = "console_error_panic_hook"))]
    console_error_panic_hook::set_once();

    console_log!("glyph-rain {} initialized", version());
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ============================================================================
// POEM - Rain world for hosts that draw for themselves
// ============================================================================
//
// Packed output, STRIDE floats per glyph:
//   x, y, state (0 = falling, 1 = stacked), alpha (0..255), angle,
//   speed, tail, glyph code point

#[wasm_bindgen]
pub struct Poem {
    world: RainWorld,
    out: Vec<f32>,
}

#[wasm_bindgen]
impl Poem {
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32) -> Self {
        Self { world: RainWorld::new(w, h), out: Vec::new() }
    }

    /// Build from a JSON config; missing keys keep their defaults
    pub fn with_config(w: u32, h: u32, json: &str) -> Result<Poem, JsValue> {
        let config = Config::from_json(json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { world: RainWorld::with_config(w, h, &config), out: Vec::new() })
    }

    pub fn tick(&mut self) {
        self.world.tick();
        self.pack();
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.world.resize(w, h);
    }

    /// Pending cues as flat (frequency, duration, velocity) triples
    pub fn take_cues(&mut self) -> Vec<f32> {
        self.world
            .drain_cues()
            .flat_map(|c| [c.note.frequency(), c.duration, c.velocity])
            .collect()
    }

    fn pack(&mut self) {
        self.out.clear();
        for e in self.world.entities() {
            let state = match e.state {
                State::Falling => 0.0,
                State::Stacked => 1.0,
            };
            self.out.extend_from_slice(&[
                e.x,
                e.y,
                state,
                e.opacity() * sim::FULL_ALPHA,
                e.angle,
                e.speed,
                e.tail,
                e.glyph as u32 as f32,
            ]);
        }
    }

    // Accessors for WASM
    pub fn output_ptr(&self) -> *const f32 { self.out.as_ptr() }
    pub fn output_len(&self) -> usize { self.out.len() }
    pub fn entity_count(&self) -> usize { self.world.entities().len() }
    pub fn frame(&self) -> u32 { self.world.frame() as u32 }
    pub fn wind(&self) -> f32 { self.world.wind() }
    pub fn width(&self) -> u32 { self.world.width() }
    pub fn height(&self) -> u32 { self.world.height() }
}

impl Poem {
    pub fn world(&self) -> &RainWorld {
        &self.world
    }

    pub fn output(&self) -> &[f32] {
        &self.out
    }
}
