//! Capped timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::autopilot;
use super::kinematics::Direction;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest direction pressed, if any
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Apply input, then advance the game by one frame of `delta_ms`
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) {
    if input.pause {
        state.toggle_pause();
    }

    let mut direction = input.direction;
    if input.idle_mode
        && direction.is_none()
        && matches!(state.phase, GamePhase::AwaitingStart | GamePhase::Playing)
    {
        direction = autopilot::suggest_direction(state);
    }
    if let Some(direction) = direction {
        state.request_direction(direction);
    }

    step(state, delta_ms);
}

/// Advance the simulation by one frame.
///
/// The frame delta is capped (a stalled clock must not teleport actors
/// through half the maze), then the player moves, then each pursuer, then
/// contacts are resolved and level/power timers evaluated. Does nothing
/// unless the session is `Playing`, or when the delta is not positive
/// (including NaN).
pub fn step(state: &mut GameState, delta_ms: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    // Checked before capping: `min` maps NaN to a full frame
    if delta_ms.is_nan() || delta_ms <= 0.0 {
        return;
    }
    let dt_ms = delta_ms.min(state.tuning.max_frame_ms);
    let dt = dt_ms / 1000.0;
    state.elapsed_ms += dt_ms as f64;

    state.update_player(dt);
    state.update_pursuers(dt);
    state.resolve_collisions();

    if state.phase == GamePhase::GameOver {
        return;
    }

    if state.pellets_remaining == 0 {
        state.advance_level();
        return;
    }

    state.tick_power(dt_ms);
}
