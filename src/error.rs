//! Error types for the construction-time surfaces of the game.
//!
//! The simulation tick itself is infallible: a malformed maze is rejected
//! when it is registered, and bad tuning is rejected when it is loaded.

use std::io;

/// Errors raised while parsing or registering a maze layout.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout has no rows")]
    Empty,

    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Unknown character in layout at ({x}, {y}): {ch:?}")]
    UnknownCharacter { x: usize, y: usize, ch: char },

    #[error("{what} spawn ({x}, {y}) is outside the {width}x{height} grid")]
    SpawnOutOfBounds {
        what: &'static str,
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("{what} spawn ({x}, {y}) is on a wall")]
    SpawnOnWall { what: &'static str, x: i32, y: i32 },

    #[error("No pellet is reachable from the player start")]
    NoReachablePellets,

    #[error("A layout set needs at least one layout")]
    NoLayouts,
}

/// Errors raised while loading tuning values.
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("Tuning JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Tuning value {field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("Speeds cover {tiles_per_frame} tiles per frame (limit {limit})")]
    TooFast { tiles_per_frame: f32, limit: f32 },
}

/// Errors raised by the leaderboard store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Leaderboard JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}
