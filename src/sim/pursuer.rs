//! Pursuer AI
//!
//! Each pursuer picks a target tile from its role's strategy and, at every
//! tile boundary, takes the legal step that lands closest to that target.
//! Frightened pursuers wander at random instead; caught ones head home.
//!
//! Role behaviour is data: `ROLE_TABLE` maps each role to a strategy and a
//! scatter corner, and `chase_target` dispatches on the strategy.

use glam::{IVec2, Vec2};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::kinematics::{Direction, Mover, direction_vec};
use crate::minimal_wrap_delta;
use crate::tuning::PursuerSpeeds;

/// The four pursuer identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

/// How a role picks its chase target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Aim straight at the player
    Direct,
    /// Aim a few tiles ahead of the player (ambush)
    Ahead,
    /// Aim a few tiles behind the player (pincer)
    Behind,
    /// Chase from afar, fall back to the scatter corner up close
    RetreatWhenClose,
}

/// Maze corner a role retreats toward, inset one tile from the border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn tile(self, width: i32, height: i32) -> IVec2 {
        match self {
            Corner::TopLeft => IVec2::new(1, 1),
            Corner::TopRight => IVec2::new(width - 2, 1),
            Corner::BottomLeft => IVec2::new(1, height - 2),
            Corner::BottomRight => IVec2::new(width - 2, height - 2),
        }
    }
}

/// Static per-role data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSpec {
    pub name: &'static str,
    /// 0xRRGGBB
    pub color: u32,
    pub strategy: Strategy,
    pub corner: Corner,
}

const ROLE_TABLE: [RoleSpec; 4] = [
    RoleSpec {
        name: "Blinky",
        color: 0xff3c3c,
        strategy: Strategy::Direct,
        corner: Corner::TopRight,
    },
    RoleSpec {
        name: "Pinky",
        color: 0xff8ed9,
        strategy: Strategy::Ahead,
        corner: Corner::TopLeft,
    },
    RoleSpec {
        name: "Inky",
        color: 0x4bf2ff,
        strategy: Strategy::Behind,
        corner: Corner::BottomRight,
    },
    RoleSpec {
        name: "Clyde",
        color: 0xffb852,
        strategy: Strategy::RetreatWhenClose,
        corner: Corner::BottomLeft,
    },
];

impl Role {
    /// Roles in spawn order
    pub const ALL: [Role; 4] = [Role::Blinky, Role::Pinky, Role::Inky, Role::Clyde];

    pub const fn index(self) -> usize {
        match self {
            Role::Blinky => 0,
            Role::Pinky => 1,
            Role::Inky => 2,
            Role::Clyde => 3,
        }
    }

    pub fn spec(self) -> &'static RoleSpec {
        &ROLE_TABLE[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn color(self) -> u32 {
        self.spec().color
    }
}

/// Behavioural mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Chase,
    Frightened,
    ReturningToBase,
}

/// Source of frightened-mode randomness
pub trait DirectionChooser {
    /// Pick one of `options` (never empty)
    fn choose(&mut self, options: &[Direction]) -> Direction;
}

impl DirectionChooser for Pcg32 {
    fn choose(&mut self, options: &[Direction]) -> Direction {
        options[self.random_range(0..options.len())]
    }
}

/// Read-only view of the world a pursuer decides against
#[derive(Debug, Clone, Copy)]
pub struct PursuitContext<'a> {
    pub grid: &'a Grid,
    /// Interpolated player centre
    pub player_pos: Vec2,
    /// Player's committed direction
    pub player_dir: Option<Direction>,
    pub speeds: PursuerSpeeds,
    pub lookahead: f32,
    pub retreat_radius: f32,
}

/// An autonomous pursuer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pursuer {
    pub mover: Mover,
    pub role: Role,
    pub mode: Mode,
    /// Time left in frightened mode (ms)
    pub frightened_ms: f32,
    /// Where a caught pursuer returns to
    pub home: IVec2,
    /// Corner used by the retreat strategy
    pub scatter: IVec2,
}

impl Pursuer {
    pub fn new(role: Role, start: IVec2, home: IVec2, scatter: IVec2, speed: f32) -> Self {
        Self {
            mover: Mover::new(start, speed),
            role,
            mode: Mode::Chase,
            frightened_ms: 0.0,
            home,
            scatter,
        }
    }

    /// Enter frightened mode. Pursuers on their way home are unaffected.
    pub fn frighten(&mut self, duration_ms: f32) {
        if self.mode == Mode::ReturningToBase {
            return;
        }
        self.mode = Mode::Frightened;
        self.frightened_ms = duration_ms;
    }

    /// Drop back to chase if still frightened
    pub fn calm(&mut self) {
        if self.mode == Mode::Frightened {
            self.mode = Mode::Chase;
        }
        self.frightened_ms = 0.0;
    }

    /// Caught while frightened: abandon the current step and head home
    pub fn send_home(&mut self) {
        self.mode = Mode::ReturningToBase;
        self.frightened_ms = 0.0;
        self.mover.halt();
    }

    /// Advance by `dt` seconds
    pub fn update(
        &mut self,
        ctx: &PursuitContext,
        chooser: &mut impl DirectionChooser,
        dt: f32,
    ) {
        let Pursuer {
            mover,
            role,
            mode,
            frightened_ms,
            home,
            scatter,
        } = self;
        let (role, home, scatter) = (*role, *home, *scatter);

        if mover.is_aligned() {
            choose_step(mover, role, *mode, home, scatter, ctx, chooser);
        }

        if *mode == Mode::Frightened {
            *frightened_ms = (*frightened_ms - dt * 1000.0).max(0.0);
            if *frightened_ms <= 0.0 {
                *mode = Mode::Chase;
            }
        }

        mover.speed = match *mode {
            Mode::Chase => ctx.speeds.chase,
            Mode::Frightened => ctx.speeds.frightened,
            Mode::ReturningToBase => ctx.speeds.returning,
        };

        let distance = mover.speed * dt;
        mover.advance(distance, |m| {
            if *mode == Mode::ReturningToBase && m.tile == home {
                *mode = Mode::Chase;
            }
            choose_step(m, role, *mode, home, scatter, ctx, chooser);
        });
    }
}

/// Chase-mode target for a role, in tile-centre coordinates
pub fn chase_target(role: Role, own_tile: IVec2, scatter: IVec2, ctx: &PursuitContext) -> Vec2 {
    let player = ctx.player_pos;
    let heading = direction_vec(ctx.player_dir);
    match role.spec().strategy {
        Strategy::Direct => player,
        Strategy::Ahead => player + heading * ctx.lookahead,
        Strategy::Behind => player - heading * ctx.lookahead,
        Strategy::RetreatWhenClose => {
            let own = own_tile.as_vec2() + Vec2::splat(0.5);
            let size = ctx.grid.size();
            let distance = minimal_wrap_delta(own.x, player.x, size.x)
                .hypot(minimal_wrap_delta(own.y, player.y, size.y));
            if distance > ctx.retreat_radius {
                player
            } else {
                scatter.as_vec2() + Vec2::splat(0.5)
            }
        }
    }
}

/// Passable neighbours, minus the reversal unless it is the only way out
pub fn legal_moves(mover: &Mover, grid: &Grid) -> Vec<Direction> {
    let available: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| grid.is_passable(grid.wrap(mover.tile + d.delta())))
        .collect();

    let reverse = mover.direction.map(Direction::opposite);
    let forward: Vec<Direction> = available
        .iter()
        .copied()
        .filter(|&d| Some(d) != reverse)
        .collect();

    if forward.is_empty() { available } else { forward }
}

/// Squared toroidal distance from a tile's centre to a target point
fn distance_sq(tile: IVec2, target: Vec2, size: Vec2) -> f32 {
    let dx = minimal_wrap_delta(tile.x as f32 + 0.5, target.x, size.x);
    let dy = minimal_wrap_delta(tile.y as f32 + 0.5, target.y, size.y);
    dx * dx + dy * dy
}

#[allow(clippy::too_many_arguments)]
fn choose_step(
    mover: &mut Mover,
    role: Role,
    mode: Mode,
    home: IVec2,
    scatter: IVec2,
    ctx: &PursuitContext,
    chooser: &mut impl DirectionChooser,
) {
    let grid = ctx.grid;
    let options = legal_moves(mover, grid);
    if options.is_empty() {
        return;
    }

    let target = match mode {
        Mode::Frightened => {
            let choice = chooser.choose(&options);
            mover.try_step(choice, grid);
            return;
        }
        Mode::ReturningToBase => home.as_vec2() + Vec2::splat(0.5),
        Mode::Chase => chase_target(role, mover.tile, scatter, ctx),
    };
    let size = grid.size();
    let target = Vec2::new(target.x.rem_euclid(size.x), target.y.rem_euclid(size.y));

    let mut selected = options[0];
    let mut best = f32::INFINITY;
    for &option in &options {
        let next = grid.wrap(mover.tile + option.delta());
        let score = distance_sq(next, target, size);
        if score < best {
            best = score;
            selected = option;
        }
    }
    mover.try_step(selected, grid);
}
