//! Game state and session bookkeeping
//!
//! `GameState` owns the grid and every actor. Actors never reference each
//! other; pursuers and the collision pass read the player's position by value
//! through this struct.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, find_contacts};
use super::grid::{Grid, Tile};
use super::kinematics::Direction;
use super::layout::{Layout, LayoutSet};
use super::player::Player;
use super::pursuer::{Mode, Pursuer, PursuitContext, Role};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first direction input (new game, new life, new level)
    AwaitingStart,
    /// Active gameplay
    Playing,
    /// Paused by the player
    Paused,
    /// Lives exhausted; only a restart leaves this phase
    GameOver,
}

/// Notable things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PelletEaten,
    PowerPelletEaten,
    PursuerEaten { role: Role, points: u64 },
    PlayerCaught { role: Role, lives_left: u8 },
    BonusLife,
    LevelCleared { level: u32 },
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this session was created with
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    layouts: LayoutSet,
    grid: Grid,
    /// Pellets and power pellets left on the grid
    pub pellets_remaining: u32,
    pub player: Player,
    /// Pursuers in role order
    pub pursuers: Vec<Pursuer>,
    pub score: u64,
    pub lives: u8,
    /// 1-based level index
    pub level: u32,
    /// Power mode time left (ms); 0 when inactive
    pub power_ms: f32,
    /// Pursuers eaten in the current power window
    pub eat_streak: u32,
    /// Simulated time (ms)
    pub elapsed_ms: f64,
    /// Highest score seen, including earlier sessions
    pub best_score: u64,
    pub phase: GamePhase,
    /// One-shot latch for the extra life
    pub bonus_life_awarded: bool,
    /// Events since the last `drain_events`
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session on the classic maze with default tuning
    pub fn new(seed: u64, best_score: u64) -> Self {
        Self::with_config(Tuning::default(), LayoutSet::classic(), seed, best_score)
    }

    /// New session at level 1
    pub fn with_config(tuning: Tuning, layouts: LayoutSet, seed: u64, best_score: u64) -> Self {
        let layout = layouts.for_level(1);
        let grid = layout.fresh_grid();
        let pellets_remaining = layout.pellet_count();
        let lives = tuning.initial_lives;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            layouts,
            grid,
            pellets_remaining,
            player: Player::new(glam::IVec2::ZERO, 0.0),
            pursuers: Vec::with_capacity(Role::ALL.len()),
            score: 0,
            lives,
            level: 1,
            power_ms: 0.0,
            eat_streak: 0,
            elapsed_ms: 0.0,
            best_score,
            phase: GamePhase::AwaitingStart,
            bonus_life_awarded: false,
            events: Vec::new(),
        };
        state.respawn_actors();
        state
    }

    /// Read-only maze
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Layout of the current level
    pub fn layout(&self) -> &Layout {
        self.layouts.for_level(self.level)
    }

    /// Buffer a direction. Leaves `AwaitingStart`; ignored after game over.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.player.queue(direction);
        if self.phase == GamePhase::AwaitingStart {
            self.phase = GamePhase::Playing;
        }
    }

    /// Toggle between `Playing` and `Paused`; no-op in any other phase
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Replace this session with a fresh one at level 1, keeping tuning,
    /// layouts and the best score
    pub fn restart(&mut self) {
        let seed = self.rng.next_u64();
        log::info!("Restarting session (best score {})", self.best_score);
        *self = Self::with_config(
            self.tuning.clone(),
            self.layouts.clone(),
            seed,
            self.best_score,
        );
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Frightened pursuers should flash (power about to run out)
    pub fn is_flash_window(&self) -> bool {
        self.power_ms > 0.0 && self.power_ms < self.tuning.flash_start_ms
    }

    /// Put every actor back on its spawn tile with level-scaled speed
    pub(super) fn respawn_actors(&mut self) {
        let layout = self.layouts.for_level(self.level);
        let spawns = *layout.spawns();
        let (width, height) = (layout.width(), layout.height());
        let speeds = self.tuning.pursuer_speeds_for_level(self.level);

        self.player = Player::new(spawns.player, self.tuning.player_speed_for_level(self.level));
        self.pursuers = Role::ALL
            .iter()
            .map(|&role| {
                let scatter = role.spec().corner.tile(width, height);
                Pursuer::new(
                    role,
                    spawns.pursuers[role.index()],
                    spawns.pursuer_home,
                    scatter,
                    speeds.chase,
                )
            })
            .collect();
    }

    /// Move the player and apply the effects of every tile it entered
    pub(super) fn update_player(&mut self, dt: f32) {
        let eaten = self.player.update(&mut self.grid, dt);
        for tile in eaten {
            self.pellets_remaining = self.pellets_remaining.saturating_sub(1);
            match tile {
                Tile::Pellet => {
                    self.events.push(GameEvent::PelletEaten);
                    self.add_score(self.tuning.pellet_points);
                }
                Tile::PowerPellet => {
                    self.events.push(GameEvent::PowerPelletEaten);
                    self.add_score(self.tuning.power_pellet_points);
                    self.activate_power();
                }
                Tile::Wall | Tile::Empty => {}
            }
        }
    }

    /// Move every pursuer against the player's current position
    pub(super) fn update_pursuers(&mut self, dt: f32) {
        let ctx = PursuitContext {
            grid: &self.grid,
            player_pos: self.player.mover.position(self.grid.size()),
            player_dir: self.player.mover.direction,
            speeds: self.tuning.pursuer_speeds_for_level(self.level),
            lookahead: self.tuning.chase_lookahead,
            retreat_radius: self.tuning.retreat_radius,
        };
        for pursuer in &mut self.pursuers {
            pursuer.update(&ctx, &mut self.rng, dt);
        }
    }

    /// Apply player/pursuer contacts for this tick
    pub(super) fn resolve_collisions(&mut self) {
        let size = self.grid.size();
        let player_pos = self.player.mover.position(size);
        let contacts = find_contacts(player_pos, &self.pursuers, size, self.tuning.contact_radius);

        for contact in contacts {
            match contact {
                Contact::Eat(i) => {
                    let role = self.pursuers[i].role;
                    self.pursuers[i].send_home();
                    self.eat_streak += 1;
                    let points = self.tuning.pursuer_points(self.eat_streak);
                    log::debug!("Ate {} (streak {}, +{})", role.name(), self.eat_streak, points);
                    self.events.push(GameEvent::PursuerEaten { role, points });
                    self.add_score(points);
                }
                Contact::Caught(i) => {
                    let role = self.pursuers[i].role;
                    self.lose_life(role);
                }
            }
        }
    }

    /// Count down power mode; on expiry frightened pursuers calm down
    pub(super) fn tick_power(&mut self, dt_ms: f32) {
        if self.power_ms <= 0.0 {
            return;
        }
        self.power_ms = (self.power_ms - dt_ms).max(0.0);
        if self.power_ms == 0.0 {
            self.eat_streak = 0;
            for pursuer in &mut self.pursuers {
                if pursuer.mode == Mode::Frightened {
                    pursuer.calm();
                }
            }
        }
    }

    /// Load the next layout and wait for input
    pub(super) fn advance_level(&mut self) {
        log::info!("Level {} cleared (score {})", self.level, self.score);
        self.events.push(GameEvent::LevelCleared { level: self.level });

        self.level += 1;
        let layout = self.layouts.for_level(self.level);
        self.grid = layout.fresh_grid();
        self.pellets_remaining = layout.pellet_count();
        self.power_ms = 0.0;
        self.eat_streak = 0;
        self.respawn_actors();
        self.phase = GamePhase::AwaitingStart;
    }

    fn add_score(&mut self, points: u64) {
        self.score += points;
        if self.score > self.best_score {
            self.best_score = self.score;
        }
        if !self.bonus_life_awarded && self.score >= self.tuning.bonus_life_score {
            self.bonus_life_awarded = true;
            self.lives = self.lives.saturating_add(1);
            log::info!("Bonus life at {} points", self.score);
            self.events.push(GameEvent::BonusLife);
        }
    }

    fn activate_power(&mut self) {
        log::debug!("Power mode for {} ms", self.tuning.power_duration_ms);
        self.power_ms = self.tuning.power_duration_ms;
        self.eat_streak = 0;
        for pursuer in &mut self.pursuers {
            pursuer.frighten(self.tuning.power_duration_ms);
        }
    }

    fn lose_life(&mut self, role: Role) {
        self.lives = self.lives.saturating_sub(1);
        self.power_ms = 0.0;
        self.eat_streak = 0;
        for pursuer in &mut self.pursuers {
            pursuer.calm();
        }
        self.events.push(GameEvent::PlayerCaught {
            role,
            lives_left: self.lives,
        });

        if self.lives == 0 {
            log::info!("Game over at level {} with {} points", self.level, self.score);
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
        } else {
            log::debug!("Caught by {}, {} lives left", role.name(), self.lives);
            self.phase = GamePhase::AwaitingStart;
            self.respawn_actors();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use crate::sim::layout::Spawns;

    // Blinky and Pinky share (5,3), boxed in above and below so their only
    // choices are left and right. The player starts straight below at (5,6).
    fn corridor_session() -> GameState {
        let spawns = Spawns {
            player: IVec2::new(5, 6),
            pursuer_home: IVec2::new(1, 5),
            pursuers: [
                IVec2::new(5, 3),
                IVec2::new(5, 3),
                IVec2::new(9, 5),
                IVec2::new(1, 6),
            ],
        };
        let layout = Layout::parse(
            &[
                "###########",
                "###########",
                "###########",
                "#.........#",
                "#.#######.#",
                "#.........#",
                "#.........#",
                "###########",
            ],
            spawns,
        )
        .unwrap();
        let layouts = LayoutSet::new(vec![layout]).unwrap();
        let mut state = GameState::with_config(Tuning::default(), layouts, 1, 0);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_new_session() {
        let state = GameState::new(42, 1234);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 1234);
        assert_eq!(state.phase, GamePhase::AwaitingStart);
        assert_eq!(state.pellets_remaining, 174);
        assert_eq!(state.pellets_remaining, state.grid().count_pellets());
        assert_eq!(state.pursuers.len(), 4);
        assert_eq!(state.player.mover.tile, IVec2::new(9, 15));
        assert_eq!(state.pursuers[0].scatter, IVec2::new(17, 1));
        assert_eq!(state.pursuers[3].scatter, IVec2::new(1, 18));
        assert!(state.pursuers.iter().all(|p| p.mode == Mode::Chase));
    }

    #[test]
    fn test_chase_uses_player_heading_and_tile_centre() {
        let mut state = corridor_session();
        state.player.mover.direction = Some(Direction::Left);
        state.update_pursuers(0.0);
        // Blinky aims at (5.5, 6.5): left and right tie, priority picks right
        assert_eq!(state.pursuers[0].mover.direction, Some(Direction::Right));
        // Pinky aims four tiles along the heading
        assert_eq!(state.pursuers[1].mover.direction, Some(Direction::Left));
    }

    #[test]
    fn test_chase_uses_interpolated_player_position() {
        let mut state = corridor_session();
        // Nine tenths of the way from (5,6) to (4,6): centre at x = 4.6
        state.player.mover.direction = Some(Direction::Left);
        state.player.mover.target = Some(IVec2::new(4, 6));
        state.player.mover.progress = 0.9;
        state.update_pursuers(0.0);
        assert_eq!(state.pursuers[0].mover.direction, Some(Direction::Left));
        assert_eq!(state.pursuers[0].mover.target, Some(IVec2::new(4, 3)));
    }

    #[test]
    fn test_direction_request_starts_game() {
        let mut state = GameState::new(1, 0);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::AwaitingStart);

        state.request_direction(Direction::Left);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.queued, Some(Direction::Left));

        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_ignores_input() {
        let mut state = GameState::new(1, 0);
        state.phase = GamePhase::GameOver;
        state.request_direction(Direction::Up);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.queued, None);
    }

    #[test]
    fn test_power_pellet_frightens_all_but_returning() {
        let mut state = GameState::new(1, 0);
        state.pursuers[2].send_home();
        state.activate_power();
        assert_eq!(state.power_ms, 7000.0);
        assert_eq!(state.pursuers[0].mode, Mode::Frightened);
        assert_eq!(state.pursuers[2].mode, Mode::ReturningToBase);
    }

    #[test]
    fn test_power_expiry_resets_streak() {
        let mut state = GameState::new(1, 0);
        state.activate_power();
        state.eat_streak = 2;
        state.tick_power(6999.0);
        assert_eq!(state.pursuers[0].mode, Mode::Frightened);
        assert_eq!(state.eat_streak, 2);
        state.tick_power(5.0);
        assert_eq!(state.power_ms, 0.0);
        assert_eq!(state.eat_streak, 0);
        assert!(state.pursuers.iter().all(|p| p.mode == Mode::Chase));
    }

    #[test]
    fn test_new_power_pellet_resets_streak() {
        let mut state = GameState::new(1, 0);
        state.activate_power();
        state.eat_streak = 3;
        state.activate_power();
        assert_eq!(state.eat_streak, 0);
    }

    #[test]
    fn test_best_score_tracks_score() {
        let mut state = GameState::new(1, 50);
        state.add_score(30);
        assert_eq!(state.best_score, 50);
        state.add_score(30);
        assert_eq!(state.best_score, 60);
    }

    #[test]
    fn test_bonus_life_once() {
        let mut state = GameState::new(1, 0);
        state.add_score(9_990);
        assert_eq!(state.lives, 3);
        state.add_score(10);
        assert_eq!(state.lives, 4);
        assert!(state.bonus_life_awarded);
        state.add_score(20_000);
        assert_eq!(state.lives, 4);
        assert_eq!(
            state.events.iter().filter(|e| **e == GameEvent::BonusLife).count(),
            1
        );
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = GameState::new(1, 0);
        state.phase = GamePhase::Playing;
        state.lives = 1;
        state.lose_life(Role::Blinky);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_restart_keeps_best_score() {
        let mut state = GameState::new(1, 0);
        state.add_score(500);
        state.level = 3;
        state.phase = GamePhase::GameOver;
        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 500);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::AwaitingStart);
        assert_eq!(state.pellets_remaining, 174);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(1, 0);
        state.add_score(10_000);
        assert_eq!(state.drain_events(), vec![GameEvent::BonusLife]);
        assert!(state.drain_events().is_empty());
    }
}
