//! Gameplay configuration.
//!
//! Every tunable is grouped in [`GameConfig`] and passed explicitly into
//! sessions and matches. Units are pixels and seconds, y grows downward, so
//! upward forces are negative.

use super::constants::*;
use super::geometry::{Size, Viewport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// What happens when a player touches an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Sideways contact pushes the player back at the obstacle's speed.
    /// The player dies only when pushed past the lane's left edge.
    #[default]
    PushBack,
    /// Any overlap kills the player.
    ImmediateKill,
}

/// How the match picks a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// The first player to fall loses; the survivor wins at once.
    #[default]
    LastStanding,
    /// Both players run until both fall; the higher score wins.
    HighScore,
}

/// Invalid configuration detected at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("{min_field} must not exceed {max_field}")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
    },

    #[error("invalid viewport: {reason}")]
    Viewport { reason: String },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static configuration for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ========================================================================
    // Jump physics
    // ========================================================================
    /// Downward acceleration (px/s²).
    pub gravity: f64,
    /// Vertical velocity set when a jump starts (px/s, negative = up).
    pub jump_force: f64,
    /// Extra acceleration while the jump key stays held (px/s², negative = up).
    pub jump_hold_impulse: f64,
    /// How long holding the key keeps boosting a jump (s).
    pub max_jump_hold_duration: f64,
    /// Terminal downward velocity (px/s).
    pub max_fall_speed: f64,

    // ========================================================================
    // Obstacles and difficulty ramp
    // ========================================================================
    /// Obstacle speed at the start of a run (px/s).
    pub base_obstacle_speed: f64,
    /// Ceiling for the ramped obstacle speed (px/s).
    pub max_obstacle_speed: f64,
    /// Speed added per second of running (px/s²).
    pub obstacle_speed_time_ramp: f64,
    /// Speed added per unit of `ln(1 + score)` (px/s).
    pub obstacle_speed_score_factor: f64,
    /// Shortest delay between an obstacle entering the lane and the next spawn (s).
    pub obstacle_spawn_min_delay: f64,
    /// Longest such delay (s).
    pub obstacle_spawn_max_delay: f64,
    /// Obstacles rest this far above the floor line (px).
    pub obstacle_spawn_y_offset: f64,
    /// Score points between obstacle style changes.
    pub style_score_step: u32,

    // ========================================================================
    // Collision
    // ========================================================================
    pub collider_width_ratio: f64,
    pub collider_height_ratio: f64,
    pub collision_policy: CollisionPolicy,

    // ========================================================================
    // Scoring
    // ========================================================================
    /// Points per second of running.
    pub score_rate_per_second: f64,
    /// Bonus factor for running further right in the lane (0 disables it).
    pub score_position_weight: f64,

    // ========================================================================
    // Run-in
    // ========================================================================
    /// Horizontal speed while running in after the countdown (px/s).
    pub run_in_speed: f64,
    /// Where the run-in stops, as a fraction of the lane width.
    pub run_in_target_ratio: f64,

    // ========================================================================
    // Visual sizes
    // ========================================================================
    pub player_size: Size,
    pub obstacle_size: Size,
    pub floor_height: f64,

    // ========================================================================
    // Cosmetics
    // ========================================================================
    /// Background scroll relative to the floor.
    pub background_speed_factor: f64,
    /// Length of one full day/night cycle (s).
    pub day_night_cycle_seconds: f64,

    // ========================================================================
    // Match flow
    // ========================================================================
    pub countdown_seconds: f64,
    /// Both players must stay ready this long before the countdown starts (s).
    pub ready_delay: f64,
    pub match_rule: MatchRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            jump_force: DEFAULT_JUMP_FORCE,
            jump_hold_impulse: DEFAULT_JUMP_HOLD_IMPULSE,
            max_jump_hold_duration: DEFAULT_MAX_JUMP_HOLD_DURATION,
            max_fall_speed: DEFAULT_MAX_FALL_SPEED,

            base_obstacle_speed: DEFAULT_BASE_OBSTACLE_SPEED,
            max_obstacle_speed: DEFAULT_MAX_OBSTACLE_SPEED,
            obstacle_speed_time_ramp: DEFAULT_OBSTACLE_SPEED_TIME_RAMP,
            obstacle_speed_score_factor: DEFAULT_OBSTACLE_SPEED_SCORE_FACTOR,
            obstacle_spawn_min_delay: DEFAULT_OBSTACLE_SPAWN_MIN_DELAY,
            obstacle_spawn_max_delay: DEFAULT_OBSTACLE_SPAWN_MAX_DELAY,
            obstacle_spawn_y_offset: DEFAULT_OBSTACLE_SPAWN_Y_OFFSET,
            style_score_step: DEFAULT_STYLE_SCORE_STEP,

            collider_width_ratio: DEFAULT_COLLIDER_WIDTH_RATIO,
            collider_height_ratio: DEFAULT_COLLIDER_HEIGHT_RATIO,
            collision_policy: CollisionPolicy::default(),

            score_rate_per_second: DEFAULT_SCORE_RATE_PER_SECOND,
            score_position_weight: DEFAULT_SCORE_POSITION_WEIGHT,

            run_in_speed: DEFAULT_RUN_IN_SPEED,
            run_in_target_ratio: DEFAULT_RUN_IN_TARGET_RATIO,

            player_size: Size::new(DEFAULT_PLAYER_WIDTH, DEFAULT_PLAYER_HEIGHT),
            obstacle_size: Size::new(DEFAULT_OBSTACLE_WIDTH, DEFAULT_OBSTACLE_HEIGHT),
            floor_height: DEFAULT_FLOOR_HEIGHT,

            background_speed_factor: DEFAULT_BACKGROUND_SPEED_FACTOR,
            day_night_cycle_seconds: DEFAULT_DAY_NIGHT_CYCLE_SECONDS,

            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            ready_delay: DEFAULT_READY_DELAY_SECONDS,
            match_rule: MatchRule::default(),
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "> 0",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: ">= 0",
        })
    }
}

fn upward(field: &'static str, value: f64, allow_zero: bool) -> Result<(), ConfigError> {
    let value = finite(field, value)?;
    if value < 0.0 || (allow_zero && value == 0.0) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: if allow_zero { "<= 0 (upward)" } else { "< 0 (upward)" },
        })
    }
}

fn unit_ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    let value = finite(field, value)?;
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "in (0, 1]",
        })
    }
}

impl GameConfig {
    /// Parse a JSON config. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values that would make the simulation nonsensical.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gravity", self.gravity)?;
        upward("jump_force", self.jump_force, false)?;
        upward("jump_hold_impulse", self.jump_hold_impulse, true)?;
        non_negative("max_jump_hold_duration", self.max_jump_hold_duration)?;
        positive("max_fall_speed", self.max_fall_speed)?;

        positive("base_obstacle_speed", self.base_obstacle_speed)?;
        positive("max_obstacle_speed", self.max_obstacle_speed)?;
        if self.base_obstacle_speed > self.max_obstacle_speed {
            return Err(ConfigError::InvertedRange {
                min_field: "base_obstacle_speed",
                max_field: "max_obstacle_speed",
            });
        }
        non_negative("obstacle_speed_time_ramp", self.obstacle_speed_time_ramp)?;
        non_negative("obstacle_speed_score_factor", self.obstacle_speed_score_factor)?;
        non_negative("obstacle_spawn_min_delay", self.obstacle_spawn_min_delay)?;
        non_negative("obstacle_spawn_max_delay", self.obstacle_spawn_max_delay)?;
        if self.obstacle_spawn_min_delay > self.obstacle_spawn_max_delay {
            return Err(ConfigError::InvertedRange {
                min_field: "obstacle_spawn_min_delay",
                max_field: "obstacle_spawn_max_delay",
            });
        }
        non_negative("obstacle_spawn_y_offset", self.obstacle_spawn_y_offset)?;
        if self.style_score_step == 0 {
            return Err(ConfigError::OutOfRange {
                field: "style_score_step",
                value: 0.0,
                expected: ">= 1",
            });
        }

        unit_ratio("collider_width_ratio", self.collider_width_ratio)?;
        unit_ratio("collider_height_ratio", self.collider_height_ratio)?;

        non_negative("score_rate_per_second", self.score_rate_per_second)?;
        non_negative("score_position_weight", self.score_position_weight)?;

        positive("run_in_speed", self.run_in_speed)?;
        unit_ratio("run_in_target_ratio", self.run_in_target_ratio)?;

        positive("player_size.width", self.player_size.width)?;
        positive("player_size.height", self.player_size.height)?;
        positive("obstacle_size.width", self.obstacle_size.width)?;
        positive("obstacle_size.height", self.obstacle_size.height)?;
        non_negative("floor_height", self.floor_height)?;

        non_negative("background_speed_factor", self.background_speed_factor)?;
        positive("day_night_cycle_seconds", self.day_night_cycle_seconds)?;

        positive("countdown_seconds", self.countdown_seconds)?;
        non_negative("ready_delay", self.ready_delay)?;
        Ok(())
    }

    /// Check that a lane is large enough to host a run with this config.
    pub fn validate_viewport(&self, viewport: &Viewport) -> Result<(), ConfigError> {
        if !(viewport.origin.is_finite() && viewport.width.is_finite() && viewport.height.is_finite())
        {
            return Err(ConfigError::Viewport {
                reason: "geometry must be finite".to_string(),
            });
        }
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(ConfigError::Viewport {
                reason: format!(
                    "size {}x{} must be positive",
                    viewport.width, viewport.height
                ),
            });
        }
        let needed = self.floor_height + self.player_size.height;
        if viewport.height < needed {
            return Err(ConfigError::Viewport {
                reason: format!(
                    "height {} cannot fit the floor and the player ({} needed)",
                    viewport.height, needed
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vec2;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_max_fall_speed_rejected() {
        let config = GameConfig {
            max_fall_speed: -1.0,
            ..GameConfig::default()
        };
        match config.validate() {
            Err(ConfigError::OutOfRange { field, .. }) => assert_eq!(field, "max_fall_speed"),
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_collider_ratio_rejected() {
        let config = GameConfig {
            collider_width_ratio: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "collider_width_ratio",
                ..
            })
        ));
    }

    #[test]
    fn test_inverted_spawn_range_rejected() {
        let config = GameConfig {
            obstacle_spawn_min_delay: 2.0,
            obstacle_spawn_max_delay: 1.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                min_field: "obstacle_spawn_min_delay",
                ..
            })
        ));
    }

    #[test]
    fn test_downward_jump_force_rejected() {
        let config = GameConfig {
            jump_force: 100.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let config = GameConfig {
            gravity: f64::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "gravity" })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json_str(
            r#"{ "gravity": 1500.0, "collision_policy": "immediate_kill", "match_rule": "high_score" }"#,
        )
        .expect("valid config");
        assert_eq!(config.gravity, 1500.0);
        assert_eq!(config.collision_policy, CollisionPolicy::ImmediateKill);
        assert_eq!(config.match_rule, MatchRule::HighScore);
        assert_eq!(config.jump_force, DEFAULT_JUMP_FORCE);
    }

    #[test]
    fn test_json_with_invalid_value_rejected() {
        let result = GameConfig::from_json_str(r#"{ "max_fall_speed": -5.0 }"#);
        assert!(matches!(result, Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = GameConfig::from_json_str("{ gravity: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_viewport_validation() {
        let config = GameConfig::default();
        assert!(config
            .validate_viewport(&Viewport::sized(LANE_WIDTH, LANE_HEIGHT))
            .is_ok());
        assert!(config
            .validate_viewport(&Viewport::new(Vec2::ZERO, 0.0, 100.0))
            .is_err());
        assert!(config
            .validate_viewport(&Viewport::sized(LANE_WIDTH, 50.0))
            .is_err());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ConfigError::OutOfRange {
            field: "max_fall_speed",
            value: -1.0,
            expected: "> 0",
        };
        assert_eq!(
            err.to_string(),
            "max_fall_speed = -1 is out of range (expected > 0)"
        );
    }
}
