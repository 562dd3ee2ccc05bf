//! Sub-tile movement shared by the player and pursuers
//!
//! An actor sits on a tile, optionally interpolating toward an adjacent
//! target tile. `progress` runs from 0 to 1 along that step and is reset to 0
//! exactly when the target is cleared.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::minimal_wrap_delta;

/// The four axis-aligned directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed priority order used for tie-breaks in pursuer step selection
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit tile offset (y grows downward)
    pub const fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn as_vec2(self) -> Vec2 {
        self.delta().as_vec2()
    }
}

/// Offset of an optional direction; `None` is the zero vector
pub fn direction_vec(direction: Option<Direction>) -> Vec2 {
    direction.map_or(Vec2::ZERO, Direction::as_vec2)
}

/// Kinematic state common to every actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    /// Tile the actor last arrived on
    pub tile: IVec2,
    /// Committed direction (`None` when stopped)
    pub direction: Option<Direction>,
    /// Tile being moved toward; `Some` only while mid-step
    pub target: Option<IVec2>,
    /// Fraction of the current step covered, in `[0, 1)`
    pub progress: f32,
    /// Tiles per second
    pub speed: f32,
}

impl Mover {
    pub fn new(tile: IVec2, speed: f32) -> Self {
        Self {
            tile,
            direction: None,
            target: None,
            progress: 0.0,
            speed,
        }
    }

    /// True when sitting exactly on a tile
    pub fn is_aligned(&self) -> bool {
        self.target.is_none()
    }

    /// Start a step toward the neighbour in `direction` if it is passable.
    /// On success the direction is committed and progress restarts at 0.
    pub fn try_step(&mut self, direction: Direction, grid: &Grid) -> bool {
        let next = grid.wrap(self.tile + direction.delta());
        if !grid.is_passable(next) {
            return false;
        }
        self.direction = Some(direction);
        self.target = Some(next);
        self.progress = 0.0;
        true
    }

    /// Drop any in-flight step and stop on the current tile
    pub fn halt(&mut self) {
        self.direction = None;
        self.target = None;
        self.progress = 0.0;
    }

    /// Move `distance` tiles along the current step.
    ///
    /// Each time a tile boundary is reached the actor snaps onto the target
    /// and `on_arrive` runs; if it starts another step the leftover distance
    /// keeps being spent in the same call, so fast actors can cross several
    /// tiles per tick.
    pub fn advance(&mut self, mut distance: f32, mut on_arrive: impl FnMut(&mut Mover)) {
        while distance > 0.0 {
            let Some(target) = self.target else {
                break;
            };
            let remaining = 1.0 - self.progress;
            // Second test catches rounding up to exactly 1.0
            if distance >= remaining || self.progress + distance >= 1.0 {
                self.tile = target;
                self.target = None;
                self.progress = 0.0;
                distance = (distance - remaining).max(0.0);
                on_arrive(self);
            } else {
                self.progress += distance;
                distance = 0.0;
            }
        }
    }

    /// Interpolated cell-centre position in tile units.
    ///
    /// The step offset is measured the short way around the torus, so a step
    /// across the wrap edge moves a fraction of a tile instead of sweeping
    /// across the board.
    pub fn position(&self, size: Vec2) -> Vec2 {
        let base = self.tile.as_vec2() + Vec2::splat(0.5);
        match self.target {
            Some(target) => {
                let dx = minimal_wrap_delta(target.x as f32, self.tile.x as f32, size.x);
                let dy = minimal_wrap_delta(target.y as f32, self.tile.y as f32, size.y);
                base + Vec2::new(dx, dy) * self.progress
            }
            None => base,
        }
    }
}
