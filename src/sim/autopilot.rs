//! Idle/demo mode: steer the player toward the nearest pellet
//!
//! Plans from the tile the player will next stand on, since queued turns
//! only take effect at tile boundaries. Tiles held by chasing pursuers are
//! treated as walls.

use glam::IVec2;
use pathfinding::prelude::bfs;

use super::kinematics::Direction;
use super::pursuer::Mode;
use super::state::GameState;

/// Direction of the first step on a shortest path to a pellet, if any
pub fn suggest_direction(state: &GameState) -> Option<Direction> {
    let grid = state.grid();
    let mover = &state.player.mover;
    let start = mover.target.unwrap_or(mover.tile);

    let danger: Vec<IVec2> = state
        .pursuers
        .iter()
        .filter(|p| p.mode == Mode::Chase)
        .flat_map(|p| [Some(p.mover.tile), p.mover.target])
        .flatten()
        .collect();

    let path = bfs(
        &start,
        |&pos| {
            Direction::ALL
                .into_iter()
                .map(move |d| grid.wrap(pos + d.delta()))
                .filter(|next| grid.is_passable(*next) && !danger.contains(next))
                .collect::<Vec<_>>()
        },
        |&pos| pos != start && grid.tile_at(pos).is_pellet(),
    )?;

    let next = *path.get(1)?;
    Direction::ALL
        .into_iter()
        .find(|d| grid.wrap(start + d.delta()) == next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    #[test]
    fn test_heads_for_nearest_pellet() {
        let state = GameState::new(5, 0);
        // Classic start (9,15) has a pellet directly above it
        assert_eq!(suggest_direction(&state), Some(Direction::Up));
    }

    #[test]
    fn test_avoids_chasing_pursuer() {
        let mut state = GameState::new(5, 0);
        state.phase = GamePhase::Playing;
        // Park a chaser on every neighbour but one
        let start = state.player.mover.tile;
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| state.grid().is_passable(state.grid().wrap(start + d.delta())))
            .collect();
        assert!(open.len() >= 2);
        let blocked = open[0];
        state.pursuers[0].mover.tile = state.grid().wrap(start + blocked.delta());
        let dir = suggest_direction(&state).unwrap();
        assert_ne!(dir, blocked);
    }

    #[test]
    fn test_no_path_when_boxed_in() {
        let mut state = GameState::new(5, 0);
        let start = state.player.mover.tile;
        let open: Vec<IVec2> = Direction::ALL
            .into_iter()
            .map(|d| state.grid().wrap(start + d.delta()))
            .filter(|p| state.grid().is_passable(*p))
            .collect();
        for (pursuer, tile) in state.pursuers.iter_mut().zip(open) {
            pursuer.mover.tile = tile;
        }
        assert_eq!(suggest_direction(&state), None);
    }
}
