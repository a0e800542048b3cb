// config.rs - Tunables for the rain poem
//
// Every field has a default. Hosts may pass a partial JSON object; missing
// keys keep their defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_WORD: &str = "falling";
pub const DEFAULT_SEED: u32 = 0xDEADBEEF;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Glyphs handed out to new drops, in order, wrapping
    pub word: String,
    /// Frames between spawns, re-rolled after each spawn
    pub spawn_interval: [f32; 2],
    /// Initial fall speed (units per frame)
    pub fall_speed: [f32; 2],
    /// Streak length behind a falling glyph
    pub tail_length: [f32; 2],
    /// Alpha lost per frame once stacked
    pub decay_rate: [f32; 2],
    pub seed: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word: DEFAULT_WORD.to_string(),
            spawn_interval: [6.0, 12.0],
            fall_speed: [6.0, 10.0],
            tail_length: [20.0, 50.0],
            decay_rate: [0.5, 1.5],
            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| format!("invalid config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of strings and numbers, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.word.chars().next().is_none() {
            return Err("word must contain at least one glyph".to_string());
        }
        check_range("spawn_interval", self.spawn_interval, 0.0)?;
        check_range("fall_speed", self.fall_speed, f32::MIN_POSITIVE)?;
        check_range("tail_length", self.tail_length, 0.0)?;
        check_range("decay_rate", self.decay_rate, f32::MIN_POSITIVE)?;
        Ok(())
    }
}

fn check_range(name: &str, [lo, hi]: [f32; 2], min: f32) -> Result<(), String> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(format!("{name} must be finite"));
    }
    if lo > hi {
        return Err(format!("{name} is inverted ({lo} > {hi})"));
    }
    if lo < min {
        return Err(format!("{name} must be at least {min}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "word": "rain" }"#).unwrap();
        assert_eq!(config.word, "rain");
        assert_eq!(config.fall_speed, [6.0, 10.0]);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn empty_word_is_rejected() {
        let err = Config::from_json(r#"{ "word": "" }"#).unwrap_err();
        assert!(err.contains("word"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Config::from_json(r#"{ "fall_speed": [10.0, 6.0] }"#).unwrap_err();
        assert!(err.contains("fall_speed"));
    }

    #[test]
    fn zero_decay_is_rejected() {
        assert!(Config::from_json(r#"{ "decay_rate": [0.0, 1.0] }"#).is_err());
    }

    #[test]
    fn zero_fall_speed_is_rejected() {
        let err = Config::from_json(r#"{ "fall_speed": [0.0, 0.0] }"#).unwrap_err();
        assert!(err.contains("fall_speed"));
        assert!(Config::from_json(r#"{ "fall_speed": [0.0, 4.0] }"#).is_err());
    }

    #[test]
    fn malformed_json_reports_error() {
        let err = Config::from_json("{ word: ").unwrap_err();
        assert!(err.starts_with("invalid config"));
    }

    #[test]
    fn json_survives_a_trip_through_the_host() {
        let config = Config { word: "drip".into(), seed: 7, ..Config::default() };
        assert_eq!(Config::from_json(&config.to_json()).unwrap(), config);
    }
}
