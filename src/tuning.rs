//! Data-driven game balance
//!
//! Every scoring, timing and speed constant lives here so difficulty can be
//! adjusted without touching the simulation. Defaults match `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Movement speeds for one level (tiles per second)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PursuerSpeeds {
    pub chase: f32,
    pub frightened: f32,
    pub returning: f32,
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    pub initial_lives: u8,
    pub bonus_life_score: u64,

    // === Power mode ===
    pub power_duration_ms: f32,
    pub flash_start_ms: f32,
    pub flash_period_ms: f32,

    // === Timestep / contact ===
    pub max_frame_ms: f32,
    pub contact_radius: f32,

    // === Speeds ===
    pub player_speed: f32,
    pub player_speed_per_level: f32,
    pub pursuer_speed: f32,
    pub pursuer_speed_per_level: f32,
    pub frightened_speed_floor: f32,
    pub frightened_speed_penalty: f32,
    pub return_speed_multiplier: f32,

    // === Scoring ===
    pub pellet_points: u64,
    pub power_pellet_points: u64,
    pub pursuer_base_points: u64,

    // === Pursuer targeting ===
    pub chase_lookahead: f32,
    pub retreat_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_lives: INITIAL_LIVES,
            bonus_life_score: BONUS_LIFE_SCORE,

            power_duration_ms: POWER_DURATION_MS,
            flash_start_ms: FRIGHT_FLASH_START_MS,
            flash_period_ms: FRIGHT_FLASH_PERIOD_MS,

            max_frame_ms: MAX_FRAME_MS,
            contact_radius: CONTACT_RADIUS,

            player_speed: BASE_PLAYER_SPEED,
            player_speed_per_level: PLAYER_SPEED_PER_LEVEL,
            pursuer_speed: BASE_PURSUER_SPEED,
            pursuer_speed_per_level: PURSUER_SPEED_PER_LEVEL,
            frightened_speed_floor: FRIGHTENED_SPEED_FLOOR,
            frightened_speed_penalty: FRIGHTENED_SPEED_PENALTY,
            return_speed_multiplier: RETURN_SPEED_MULTIPLIER,

            pellet_points: PELLET_POINTS,
            power_pellet_points: POWER_PELLET_POINTS,
            pursuer_base_points: PURSUER_BASE_POINTS,

            chase_lookahead: CHASE_LOOKAHEAD_TILES,
            retreat_radius: RETREAT_RADIUS_TILES,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.initial_lives == 0 {
            return Err(TuningError::OutOfRange {
                field: "initial_lives",
                value: 0.0,
            });
        }

        let positive = [
            ("power_duration_ms", self.power_duration_ms),
            ("flash_period_ms", self.flash_period_ms),
            ("max_frame_ms", self.max_frame_ms),
            ("contact_radius", self.contact_radius),
            ("player_speed", self.player_speed),
            ("pursuer_speed", self.pursuer_speed),
            ("frightened_speed_floor", self.frightened_speed_floor),
            ("return_speed_multiplier", self.return_speed_multiplier),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        let non_negative = [
            ("flash_start_ms", self.flash_start_ms),
            ("player_speed_per_level", self.player_speed_per_level),
            ("pursuer_speed_per_level", self.pursuer_speed_per_level),
            ("frightened_speed_penalty", self.frightened_speed_penalty),
            ("chase_lookahead", self.chase_lookahead),
            ("retreat_radius", self.retreat_radius),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        // Speeds peak at the last scaled level
        let speeds = self.pursuer_speeds_for_level(SPEED_SCALING_MAX_LEVEL);
        let fastest = self
            .player_speed_for_level(SPEED_SCALING_MAX_LEVEL)
            .max(speeds.chase)
            .max(speeds.frightened)
            .max(speeds.returning);
        let tiles_per_frame = fastest * self.max_frame_ms / 1000.0;
        if !(tiles_per_frame.is_finite() && tiles_per_frame <= MAX_TILES_PER_FRAME) {
            return Err(TuningError::TooFast {
                tiles_per_frame,
                limit: MAX_TILES_PER_FRAME,
            });
        }

        Ok(())
    }

    /// Player speed for a 1-based level index
    pub fn player_speed_for_level(&self, level: u32) -> f32 {
        self.player_speed + scaled_levels(level) * self.player_speed_per_level
    }

    /// Pursuer speeds per mode for a 1-based level index
    pub fn pursuer_speeds_for_level(&self, level: u32) -> PursuerSpeeds {
        let chase = self.pursuer_speed + scaled_levels(level) * self.pursuer_speed_per_level;
        PursuerSpeeds {
            chase,
            frightened: (chase - self.frightened_speed_penalty).max(self.frightened_speed_floor),
            returning: chase * self.return_speed_multiplier,
        }
    }

    /// Points for the n-th pursuer eaten in one power window (1-based)
    pub fn pursuer_points(&self, streak: u32) -> u64 {
        let shift = streak.saturating_sub(1).min(32);
        self.pursuer_base_points << shift
    }
}

/// Levels past the first that count toward speed scaling
fn scaled_levels(level: u32) -> f32 {
    (level.clamp(1, SPEED_SCALING_MAX_LEVEL) - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_values() {
        let t = Tuning::default();
        assert_eq!(t.bonus_life_score, 10_000);
        assert_eq!(t.power_duration_ms, 7000.0);
        assert_eq!(t.flash_start_ms, 2400.0);
        assert_eq!(t.initial_lives, 3);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "initial_lives": 5, "power_duration_ms": 5000 }"#).unwrap();
        assert_eq!(t.initial_lives, 5);
        assert_eq!(t.power_duration_ms, 5000.0);
        assert_eq!(t.bonus_life_score, 10_000);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Tuning::from_json(r#"{ "player_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { field: "player_speed", .. }));

        let err = Tuning::from_json(r#"{ "initial_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { field: "initial_lives", .. }));

        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_level_speed_scaling() {
        let t = Tuning::default();
        assert_eq!(t.player_speed_for_level(1), 6.0);
        assert_eq!(t.player_speed_for_level(3), 6.5);

        let l1 = t.pursuer_speeds_for_level(1);
        assert_eq!(l1.chase, 5.2);
        assert!((l1.frightened - 4.2).abs() < 1e-5);
        assert!((l1.returning - 7.28).abs() < 1e-5);

        let l5 = t.pursuer_speeds_for_level(5);
        assert!(l5.chase > l1.chase);
    }

    #[test]
    fn test_speed_scaling_stops_at_max_level() {
        let t = Tuning::default();
        let top = t.player_speed_for_level(SPEED_SCALING_MAX_LEVEL);
        assert_eq!(t.player_speed_for_level(SPEED_SCALING_MAX_LEVEL + 1), top);
        assert_eq!(t.player_speed_for_level(u32::MAX), top);
        assert_eq!(
            t.pursuer_speeds_for_level(u32::MAX),
            t.pursuer_speeds_for_level(SPEED_SCALING_MAX_LEVEL)
        );
    }

    #[test]
    fn test_rejects_speeds_that_skip_tiles() {
        let err = Tuning::from_json(r#"{ "pursuer_speed": 1e9 }"#).unwrap_err();
        assert!(matches!(err, TuningError::TooFast { .. }));

        // Fine at level 1, too fast once per-level scaling adds up
        let err = Tuning::from_json(r#"{ "player_speed_per_level": 5.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::TooFast { .. }));

        // Longer frames shrink the speed budget
        let err = Tuning::from_json(r#"{ "max_frame_ms": 1000 }"#).unwrap_err();
        assert!(matches!(err, TuningError::TooFast { .. }));
    }

    #[test]
    fn test_frightened_floor() {
        let t = Tuning {
            pursuer_speed: 3.5,
            ..Tuning::default()
        };
        assert_eq!(t.pursuer_speeds_for_level(1).frightened, 3.2);
    }

    #[test]
    fn test_pursuer_points_double() {
        let t = Tuning::default();
        assert_eq!(t.pursuer_points(1), 200);
        assert_eq!(t.pursuer_points(2), 400);
        assert_eq!(t.pursuer_points(3), 800);
        assert_eq!(t.pursuer_points(4), 1600);
    }
}
