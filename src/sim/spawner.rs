// spawner.rs - Drops new glyphs into the sky
//
// One glyph per spawn, on a jittered cadence. Glyphs come from a fixed word
// so the rain spells it out in spawn order.

use super::{Entity, RainWorld};
use crate::config::{Config, DEFAULT_WORD};
use crate::world::Layout;

const FIRST_INTERVAL: f32 = 10.0;
const ID_RANGE: f32 = 10_000.0;

pub struct Spawner {
    word: Vec<char>,
    next: usize,

    last_spawn: u64,
    interval: f32,

    interval_range: [f32; 2],
    speed_range: [f32; 2],
    tail_range: [f32; 2],
}

impl Spawner {
    pub fn new(config: &Config) -> Self {
        let mut word: Vec<char> = config.word.chars().collect();
        if word.is_empty() {
            word = DEFAULT_WORD.chars().collect();
        }

        Self {
            word,
            next: 0,
            last_spawn: 0,
            interval: FIRST_INTERVAL,
            interval_range: config.spawn_interval,
            speed_range: config.fall_speed,
            tail_range: config.tail_length,
        }
    }

    /// Spawn if enough frames passed since the last one. Returns true on spawn.
    pub fn update(
        &mut self,
        frame: u64,
        layout: &Layout,
        entities: &mut Vec<Entity>,
        rng: &mut u32,
    ) -> bool {
        if (frame.saturating_sub(self.last_spawn) as f32) <= self.interval {
            return false;
        }

        self.spawn(layout, entities, rng);
        self.last_spawn = frame;
        self.interval = RainWorld::range(rng, self.interval_range);
        true
    }

    /// Append one falling glyph above the visible area
    pub fn spawn(&mut self, layout: &Layout, entities: &mut Vec<Entity>, rng: &mut u32) {
        let (x0, x1) = layout.spawn_x();
        let (y0, y1) = layout.spawn_y();

        let glyph = self.word[self.next];
        self.next = (self.next + 1) % self.word.len();

        let id = RainWorld::rand(rng) * ID_RANGE;
        let x = RainWorld::range(rng, [x0, x1]);
        let y = RainWorld::range(rng, [y0, y1]);
        let speed = RainWorld::range(rng, self.speed_range);
        let tail = RainWorld::range(rng, self.tail_range);

        entities.push(Entity::falling(id, x, y, glyph, speed, tail));
    }

    /// Glyph the next spawn will carry
    pub fn peek(&self) -> char {
        self.word[self.next]
    }

    pub fn word(&self) -> &[char] {
        &self.word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_cycle_through_word() {
        let layout = Layout::new(800, 600);
        let mut spawner = Spawner::new(&Config::default());
        let mut entities = Vec::new();
        let mut rng = 7;

        for _ in 0..10 {
            spawner.spawn(&layout, &mut entities, &mut rng);
        }

        let spelled: String = entities.iter().map(|e| e.glyph).collect();
        assert_eq!(spelled, "fallingfal");
    }

    #[test]
    fn spawns_inside_band() {
        let layout = Layout::new(1000, 600);
        let mut spawner = Spawner::new(&Config::default());
        let mut entities = Vec::new();
        let mut rng = 99;

        for _ in 0..500 {
            spawner.spawn(&layout, &mut entities, &mut rng);
        }

        for e in &entities {
            assert!(e.is_falling());
            assert!(e.x >= 100.0 && e.x <= 900.0);
            assert!(e.y >= -100.0 && e.y <= -10.0);
            assert!(e.speed >= 6.0 && e.speed <= 10.0);
            assert!(e.tail >= 20.0 && e.tail <= 50.0);
            assert_eq!(e.alpha, 255.0);
        }
    }

    #[test]
    fn waits_for_interval() {
        let layout = Layout::new(800, 600);
        let mut spawner = Spawner::new(&Config::default());
        let mut entities = Vec::new();
        let mut rng = 3;

        // First interval is 10 frames, strictly exceeded on frame 11
        for frame in 1..=10 {
            assert!(!spawner.update(frame, &layout, &mut entities, &mut rng));
        }
        assert!(spawner.update(11, &layout, &mut entities, &mut rng));
        assert_eq!(entities.len(), 1);

        // Next interval is at least 6 frames
        for frame in 12..=17 {
            assert!(!spawner.update(frame, &layout, &mut entities, &mut rng));
        }

        // ...and under 12, so the second glyph is out by frame 23
        let spawned = (18..=23).filter(|&f| spawner.update(f, &layout, &mut entities, &mut rng)).count();
        assert_eq!(spawned, 1);
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn empty_word_falls_back_to_default() {
        let config = Config { word: String::new(), ..Config::default() };
        let spawner = Spawner::new(&config);
        assert_eq!(spawner.peek(), 'f');
        assert_eq!(spawner.word().len(), 7);
    }
}
