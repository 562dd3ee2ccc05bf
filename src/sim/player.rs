//! Player controller
//!
//! Resolves the single-slot direction buffer against walls at tile
//! boundaries and eats pellets on arrival.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, Tile};
use super::kinematics::{Direction, Mover};

/// The player-controlled actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub mover: Mover,
    /// Most recent undelivered input. Latest request wins; there is no
    /// backlog, and the slot keeps its value until another request replaces
    /// it.
    pub queued: Option<Direction>,
}

impl Player {
    pub fn new(tile: IVec2, speed: f32) -> Self {
        Self {
            mover: Mover::new(tile, speed),
            queued: None,
        }
    }

    /// Overwrite the buffered direction
    pub fn queue(&mut self, direction: Direction) {
        self.queued = Some(direction);
    }

    /// Advance by `dt` seconds, returning the pellets eaten in arrival order.
    ///
    /// Turns are only taken on a tile boundary: the buffered direction is
    /// tried first, then the committed one. Running into a wall stops the
    /// player in place instead of reversing.
    pub fn update(&mut self, grid: &mut Grid, dt: f32) -> Vec<Tile> {
        let mut eaten = Vec::new();
        let Player { mover, queued } = self;
        let queued = *queued;

        if mover.is_aligned() {
            choose_step(mover, queued, grid);
        }

        let distance = mover.speed * dt;
        mover.advance(distance, |m| {
            if let Some(kind) = grid.consume_pellet(m.tile) {
                eaten.push(kind);
            }
            choose_step(m, queued, grid);
        });

        eaten
    }
}

/// Try the buffered turn, then keep going straight
fn choose_step(mover: &mut Mover, queued: Option<Direction>, grid: &Grid) {
    if let Some(wanted) = queued {
        if mover.direction != Some(wanted) && mover.try_step(wanted, grid) {
            return;
        }
    }

    if let Some(current) = mover.direction {
        if !mover.try_step(current, grid) {
            mover.halt();
        }
    }
}
