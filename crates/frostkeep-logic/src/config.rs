//! Tunable session configuration and its validation.
//!
//! The defaults reproduce the fixed arena of the prototype. Tools can load
//! a [`GameConfig`] from JSON and hand it to
//! [`GameController::with_config`](crate::controller::GameController::with_config),
//! which runs [`validate_config`] and refuses any config with errors.
//!
//! ```
//! use frostkeep_logic::config::{validate_config, GameConfig};
//!
//! let mut config = GameConfig::default();
//! assert!(validate_config(&config).is_empty());
//! config.speed = 0.0;
//! assert_eq!(validate_config(&config).len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{arena, movement::PLAYER_SPEED, start};
use crate::movement::{ArenaBounds, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player speed in units per second.
    pub speed: f32,
    pub bounds: ArenaBounds,
    pub start: Position,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            bounds: ArenaBounds::default(),
            start: Position::new(start::POSITION_X, start::POSITION_Y),
            canvas_width: arena::CANVAS_WIDTH,
            canvas_height: arena::CANVAS_HEIGHT,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Speed must be finite and above zero.
    InvalidSpeed(f32),
    /// Bounds are non-finite or min exceeds max on some axis.
    InvalidBounds(ArenaBounds),
    /// Start position lies outside the bounds.
    StartOutOfBounds(Position),
    /// Canvas dimensions must be finite and above zero.
    InvalidCanvas { width: f32, height: f32 },
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &GameConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !config.speed.is_finite() || config.speed <= 0.0 {
        errors.push(ConfigError::InvalidSpeed(config.speed));
    }

    if !config.bounds.is_valid() {
        errors.push(ConfigError::InvalidBounds(config.bounds));
    } else if !config.bounds.contains(config.start) {
        errors.push(ConfigError::StartOutOfBounds(config.start));
    }

    let canvas_ok = |v: f32| v.is_finite() && v > 0.0;
    if !canvas_ok(config.canvas_width) || !canvas_ok(config.canvas_height) {
        errors.push(ConfigError::InvalidCanvas {
            width: config.canvas_width,
            height: config.canvas_height,
        });
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let errors = validate_config(&GameConfig::default());
        assert!(errors.is_empty(), "default config should be valid: {errors:?}");
    }

    #[test]
    fn bad_speed() {
        for speed in [0.0, -5.0, f32::NAN] {
            let config = GameConfig {
                speed,
                ..GameConfig::default()
            };
            assert!(matches!(
                validate_config(&config).as_slice(),
                [ConfigError::InvalidSpeed(_)]
            ));
        }
    }

    #[test]
    fn inverted_bounds_skip_start_check() {
        let config = GameConfig {
            bounds: ArenaBounds {
                min_x: 500.0,
                max_x: 100.0,
                ..ArenaBounds::default()
            },
            ..GameConfig::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigError::InvalidBounds(_)));
    }

    #[test]
    fn start_outside_bounds() {
        let config = GameConfig {
            start: Position::new(10.0, 300.0),
            ..GameConfig::default()
        };
        assert_eq!(
            validate_config(&config),
            vec![ConfigError::StartOutOfBounds(Position::new(10.0, 300.0))]
        );
    }

    #[test]
    fn zero_canvas() {
        let config = GameConfig {
            canvas_height: 0.0,
            ..GameConfig::default()
        };
        assert!(validate_config(&config)
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidCanvas { .. })));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"speed": 90.0}"#).unwrap();
        assert_eq!(config.speed, 90.0);
        assert_eq!(config.bounds, ArenaBounds::default());
        assert_eq!(config.start, Position::new(400.0, 300.0));
    }
}
