//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame deltas only (capped per frame)
//! - Seeded RNG only
//! - Stable iteration order (pursuers in role order, directions in priority order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod kinematics;
pub mod layout;
pub mod player;
pub mod pursuer;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Contact, find_contacts, touching};
pub use grid::{Grid, Tile};
pub use kinematics::{Direction, Mover};
pub use layout::{Layout, LayoutSet, Spawns};
pub use player::Player;
pub use pursuer::{DirectionChooser, Mode, Pursuer, Role};
pub use snapshot::{PlayerView, PursuerView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, step, tick};
