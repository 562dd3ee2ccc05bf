//! Maze Chase - A toroidal maze-chase arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, pursuer AI, scoring, levels)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Leaderboard persistence for the best score
//! - `error`: Construction-time error types

pub mod error;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use error::{LayoutError, StoreError, TuningError};
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Lives at session start
    pub const INITIAL_LIVES: u8 = 3;
    /// Score that awards the one-time extra life
    pub const BONUS_LIFE_SCORE: u64 = 10_000;

    /// Power mode duration after eating a power pellet (ms)
    pub const POWER_DURATION_MS: f32 = 7000.0;
    /// Remaining power time below which frightened pursuers flash (ms)
    pub const FRIGHT_FLASH_START_MS: f32 = 2400.0;
    /// Blink half-period of the frightened flash (ms)
    pub const FRIGHT_FLASH_PERIOD_MS: f32 = 120.0;

    /// Largest frame delta fed to the engine step (ms)
    pub const MAX_FRAME_MS: f32 = 66.0;
    /// Most tiles any actor may cover in one capped frame
    pub const MAX_TILES_PER_FRAME: f32 = 4.0;
    /// Speeds stop scaling past this level
    pub const SPEED_SCALING_MAX_LEVEL: u32 = 50;
    /// Player/pursuer centres closer than this (tiles) are touching
    pub const CONTACT_RADIUS: f32 = 0.55;

    /// Player speed at level 1 (tiles per second)
    pub const BASE_PLAYER_SPEED: f32 = 6.0;
    /// Player speed added per level after the first
    pub const PLAYER_SPEED_PER_LEVEL: f32 = 0.25;
    /// Pursuer chase speed at level 1 (tiles per second)
    pub const BASE_PURSUER_SPEED: f32 = 5.2;
    /// Pursuer speed added per level after the first
    pub const PURSUER_SPEED_PER_LEVEL: f32 = 0.1;
    /// Frightened pursuers never move slower than this
    pub const FRIGHTENED_SPEED_FLOOR: f32 = 3.2;
    /// Frightened pursuers move this much slower than chasing ones
    pub const FRIGHTENED_SPEED_PENALTY: f32 = 1.0;
    /// Speed multiplier while returning to base
    pub const RETURN_SPEED_MULTIPLIER: f32 = 1.4;

    /// Points per pellet
    pub const PELLET_POINTS: u64 = 10;
    /// Points per power pellet
    pub const POWER_PELLET_POINTS: u64 = 50;
    /// Points for the first pursuer eaten in a power window (doubles per streak)
    pub const PURSUER_BASE_POINTS: u64 = 200;

    /// Tiles ahead/behind the player that the ambush and pincer roles aim for
    pub const CHASE_LOOKAHEAD_TILES: f32 = 4.0;
    /// Distance under which the shy role retreats to its corner
    pub const RETREAT_RADIUS_TILES: f32 = 5.0;

    /// Simulated frame length used by the headless runner (ms)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
}

/// Wrap a coordinate onto a toroidal axis of the given size.
#[inline]
pub fn wrap_coord(value: i32, size: i32) -> i32 {
    value.rem_euclid(size)
}

/// Signed shortest offset from `b` to `a` on a wrapped axis.
///
/// The result lies in `[-size/2, size/2]`, so column 0 and the last column
/// are one step apart rather than `size - 1`.
#[inline]
pub fn minimal_wrap_delta(a: f32, b: f32, size: f32) -> f32 {
    let mut diff = a - b;
    if diff > size / 2.0 {
        diff -= size;
    }
    if diff < -size / 2.0 {
        diff += size;
    }
    diff
}

/// Euclidean distance on a torus, using the minimal wrap delta per axis.
#[inline]
pub fn toroidal_distance(a: glam::Vec2, b: glam::Vec2, size: glam::Vec2) -> f32 {
    let dx = minimal_wrap_delta(a.x, b.x, size.x);
    let dy = minimal_wrap_delta(a.y, b.y, size.y);
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_wrap_coord() {
        assert_eq!(wrap_coord(-1, 19), 18);
        assert_eq!(wrap_coord(19, 19), 0);
        assert_eq!(wrap_coord(7, 19), 7);
        assert_eq!(wrap_coord(-20, 19), 18);
    }

    #[test]
    fn test_minimal_wrap_delta_across_edge() {
        // Column 0 and the last column are neighbours
        assert_eq!(minimal_wrap_delta(0.0, 18.0, 19.0), 1.0);
        assert_eq!(minimal_wrap_delta(18.0, 0.0, 19.0), -1.0);
        assert_eq!(minimal_wrap_delta(3.0, 5.0, 19.0), -2.0);
    }

    #[test]
    fn test_toroidal_distance() {
        let size = Vec2::new(19.0, 20.0);
        let d = toroidal_distance(Vec2::new(0.5, 0.5), Vec2::new(18.5, 19.5), size);
        assert!((d - 2.0_f32.sqrt()).abs() < 1e-5);
    }
}
