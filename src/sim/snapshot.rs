//! Read-only view handed to renderers and UI after a tick

use glam::Vec2;
use serde::Serialize;

use super::grid::Grid;
use super::kinematics::Direction;
use super::pursuer::{Mode, Role};
use super::state::{GamePhase, GameState};

/// Drawable state of the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    /// Interpolated centre in tile units
    pub pos: Vec2,
    pub direction: Option<Direction>,
}

/// Drawable state of one pursuer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PursuerView {
    pub role: Role,
    pub name: &'static str,
    pub color: u32,
    pub pos: Vec2,
    pub direction: Option<Direction>,
    pub mode: Mode,
}

/// Everything needed to draw a frame without touching the simulation
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub player: PlayerView,
    pub pursuers: Vec<PursuerView>,
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    pub lives: u8,
    pub level: u32,
    pub pellets_remaining: u32,
    pub power_ms: f32,
    /// Power is about to run out
    pub flash_window: bool,
    /// Blink phase inside the flash window (true = show the warning colour)
    pub flash_on: bool,
    pub elapsed_ms: f64,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        let grid = self.grid();
        let size = grid.size();
        let flash_window = self.is_flash_window();
        let flash_on = flash_window
            && (self.power_ms / self.tuning.flash_period_ms).floor() as u32 % 2 == 0;

        Snapshot {
            grid,
            player: PlayerView {
                pos: self.player.mover.position(size),
                direction: self.player.mover.direction,
            },
            pursuers: self
                .pursuers
                .iter()
                .map(|p| PursuerView {
                    role: p.role,
                    name: p.role.name(),
                    color: p.role.color(),
                    pos: p.mover.position(size),
                    direction: p.mover.direction,
                    mode: p.mode,
                })
                .collect(),
            phase: self.phase,
            score: self.score,
            best_score: self.best_score,
            lives: self.lives,
            level: self.level,
            pellets_remaining: self.pellets_remaining,
            power_ms: self.power_ms,
            flash_window,
            flash_on,
            elapsed_ms: self.elapsed_ms,
        }
    }
}
