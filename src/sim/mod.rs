// sim/ - Letter rain simulation
//
// One flat store of glyphs, each either falling or stacked. A frame runs
// spawn -> fall -> pile in that order; rendering reads the result.

mod cue;
mod entity;
mod fall;
mod pile;
mod spawner;

pub use cue::{Cue, Note, PLUCK_DURATION};
pub use entity::{Entity, FULL_ALPHA, RESTART_SPEED, State};
pub use spawner::Spawner;

use crate::config::{Config, DEFAULT_SEED};
use crate::world::{Layout, Noise, remap};

// Wind
const WIND_STEP: f32 = 0.01;
const WIND_SEED_RANGE: f32 = 1000.0;
const WIND_MIN: f32 = -1.0;
const WIND_MAX: f32 = 1.0;

/// Rain simulation world
pub struct RainWorld {
    layout: Layout,

    // Entities
    entities: Vec<Entity>,
    spawner: Spawner,

    // Wind
    noise: Noise,
    wind_offset: f32,
    wind: f32,

    // Landing tuning
    decay_range: [f32; 2],

    // Pending audio
    cues: Vec<Cue>,

    frame: u64,
    rng: u32,
}

impl RainWorld {
    pub fn new(w: u32, h: u32) -> Self {
        Self::with_config(w, h, &Config::default())
    }

    pub fn with_config(w: u32, h: u32, config: &Config) -> Self {
        // xorshift never leaves zero
        let mut rng = if config.seed == 0 { DEFAULT_SEED } else { config.seed };
        let noise = Noise::new(&mut rng);
        let wind_offset = Self::rand(&mut rng) * WIND_SEED_RANGE;

        Self {
            layout: Layout::new(w, h),
            entities: Vec::new(),
            spawner: Spawner::new(config),
            noise,
            wind_offset,
            wind: 0.0,
            decay_range: config.decay_rate,
            cues: Vec::new(),
            frame: 0,
            rng,
        }
    }

    /// Canvas changed size. Glyphs keep their coordinates; any left below the
    /// new bottom edge are dropped so they do not linger out of sight.
    pub fn resize(&mut self, w: u32, h: u32) {
        self.layout = Layout::new(w, h);
        let bottom = self.layout.height;
        self.entities.retain(|e| e.y <= bottom);
    }

    /// Run one full frame
    pub fn tick(&mut self) {
        self.frame += 1;

        self.wind = remap(self.noise.sample(self.wind_offset), 0.0, 1.0, WIND_MIN, WIND_MAX);
        self.wind_offset += WIND_STEP;

        self.spawner
            .update(self.frame, &self.layout, &mut self.entities, &mut self.rng);

        self.advance_falling();
        self.settle_stacked();
    }

    /// Physics and collision for falling glyphs, using the current wind
    pub fn advance_falling(&mut self) {
        fall::update(
            &mut self.entities,
            self.wind,
            self.frame as f32,
            &self.layout,
            self.decay_range,
            &mut self.cues,
            &mut self.rng,
        );
    }

    /// Fade, cull and support-check stacked glyphs. Returns removals.
    pub fn settle_stacked(&mut self) -> usize {
        pile::update(&mut self.entities, &self.layout)
    }

    /// Spawn one glyph right away, ignoring the cadence
    pub fn spawn_now(&mut self) {
        self.spawner.spawn(&self.layout, &mut self.entities, &mut self.rng);
    }

    /// Put a glyph into the store directly
    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Take every cue raised since the last drain
    pub fn drain_cues(&mut self) -> std::vec::Drain<'_, Cue> {
        self.cues.drain(..)
    }

    /// Hold the wind at a fixed value until the next tick
    pub fn set_wind(&mut self, wind: f32) {
        self.wind = wind;
    }

    // Random number generator (xorshift32)
    #[inline(always)]
    pub fn rand(rng: &mut u32) -> f32 {
        *rng ^= *rng << 13;
        *rng ^= *rng >> 17;
        *rng ^= *rng << 5;
        (*rng >> 8) as f32 * (1.0 / 16777216.0)
    }

    /// Uniform sample in [lo, hi)
    #[inline]
    pub fn range(rng: &mut u32, [lo, hi]: [f32; 2]) -> f32 {
        lo + Self::rand(rng) * (hi - lo)
    }

    // Accessors
    pub fn entities(&self) -> &[Entity] { &self.entities }
    pub fn entities_mut(&mut self) -> &mut Vec<Entity> { &mut self.entities }
    pub fn layout(&self) -> &Layout { &self.layout }
    pub fn spawner(&self) -> &Spawner { &self.spawner }
    pub fn wind(&self) -> f32 { self.wind }
    pub fn frame(&self) -> u64 { self.frame }
    pub fn width(&self) -> u32 { self.layout.width as u32 }
    pub fn height(&self) -> u32 { self.layout.height as u32 }
}
