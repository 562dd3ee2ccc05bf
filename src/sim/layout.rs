//! Maze layouts
//!
//! Layouts are written as ASCII rows and validated once at registration, so a
//! running session never has to cope with a malformed maze.
//!
//! | char | tile          |
//! |------|---------------|
//! | `#`  | wall          |
//! | `.`  | pellet        |
//! | `o`  | power pellet  |
//! | ` `  | empty         |

use glam::IVec2;
use pathfinding::prelude::bfs_reach;

use super::grid::{Grid, Tile};
use super::kinematics::Direction;
use crate::error::LayoutError;

/// The classic maze (19 x 20, tunnel on row 11)
const CLASSIC_ROWS: [&str; 20] = [
    "###################",
    "#o.......#.......o#",
    "#.####.#.#.#.#.##.#",
    "#......#.....#....#",
    "#.#.#.##.###.##.#.#",
    "#......#    .#....#",
    "#.####.# .. .#.##.#",
    "#......#    .#....#",
    "#.####.# .. .#.##.#",
    "#.......    ......#",
    "######.# ###.#.####",
    "     ..#    .#...  ",
    "######.# ###.#.####",
    "#.......    ......#",
    "#.####.# .. .#.##.#",
    "#......#    .#....#",
    "#.#.#.##.###.##.#.#",
    "#......#.....#....#",
    "#o.....#.....#...o#",
    "###################",
];

/// Where actors appear at the start of a life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawns {
    pub player: IVec2,
    /// Tile a caught pursuer returns to
    pub pursuer_home: IVec2,
    /// Start tiles, indexed by role order
    pub pursuers: [IVec2; 4],
}

impl Spawns {
    /// Spawn points of the classic maze
    pub const CLASSIC: Spawns = Spawns {
        player: IVec2::new(9, 15),
        pursuer_home: IVec2::new(9, 6),
        pursuers: [
            IVec2::new(9, 5),
            IVec2::new(8, 5),
            IVec2::new(10, 5),
            IVec2::new(9, 7),
        ],
    };
}

/// A validated maze: pristine grid plus spawn points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    grid: Grid,
    spawns: Spawns,
    pellets: u32,
}

impl Layout {
    /// Parse and validate ASCII rows.
    ///
    /// Rejects empty or ragged layouts, unknown characters, spawns outside
    /// the grid or on walls, and mazes where no pellet can be reached from
    /// the player start.
    pub fn parse<S: AsRef<str>>(rows: &[S], spawns: Spawns) -> Result<Self, LayoutError> {
        let first = rows.first().ok_or(LayoutError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut tiles = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            let parsed = row
                .chars()
                .enumerate()
                .map(|(x, ch)| parse_tile(ch).ok_or(LayoutError::UnknownCharacter { x, y, ch }))
                .collect::<Result<Vec<_>, _>>()?;
            tiles.push(parsed);
        }

        let grid = Grid::from_rows(tiles);
        check_spawn(&grid, "player", spawns.player)?;
        check_spawn(&grid, "pursuer home", spawns.pursuer_home)?;
        for start in spawns.pursuers {
            check_spawn(&grid, "pursuer", start)?;
        }

        let reachable = {
            let grid = &grid;
            bfs_reach(spawns.player, |&pos| {
                Direction::ALL
                    .into_iter()
                    .map(move |d| grid.wrap(pos + d.delta()))
                    .filter(|&next| grid.is_passable(next))
                    .collect::<Vec<_>>()
            })
            .any(|pos| grid.tile_at(pos).is_pellet())
        };
        if !reachable {
            return Err(LayoutError::NoReachablePellets);
        }

        let pellets = grid.count_pellets();
        Ok(Self {
            grid,
            spawns,
            pellets,
        })
    }

    /// The built-in maze
    pub fn classic() -> Self {
        Self::parse(&CLASSIC_ROWS, Spawns::CLASSIC).expect("built-in classic layout is valid")
    }

    /// A fresh copy of the maze with all pellets in place
    pub fn fresh_grid(&self) -> Grid {
        self.grid.clone()
    }

    pub fn spawns(&self) -> &Spawns {
        &self.spawns
    }

    /// Pellets (including power pellets) at load time
    pub fn pellet_count(&self) -> u32 {
        self.pellets
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }
}

fn parse_tile(ch: char) -> Option<Tile> {
    match ch {
        '#' => Some(Tile::Wall),
        '.' => Some(Tile::Pellet),
        'o' => Some(Tile::PowerPellet),
        ' ' => Some(Tile::Empty),
        _ => None,
    }
}

fn check_spawn(grid: &Grid, what: &'static str, pos: IVec2) -> Result<(), LayoutError> {
    if pos.x < 0 || pos.y < 0 || pos.x >= grid.width() || pos.y >= grid.height() {
        return Err(LayoutError::SpawnOutOfBounds {
            what,
            x: pos.x,
            y: pos.y,
            width: grid.width() as usize,
            height: grid.height() as usize,
        });
    }
    if !grid.is_passable(pos) {
        return Err(LayoutError::SpawnOnWall {
            what,
            x: pos.x,
            y: pos.y,
        });
    }
    Ok(())
}

/// Layouts played in order, cycling once the level count passes the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSet {
    layouts: Vec<Layout>,
}

impl LayoutSet {
    pub fn new(layouts: Vec<Layout>) -> Result<Self, LayoutError> {
        if layouts.is_empty() {
            return Err(LayoutError::NoLayouts);
        }
        Ok(Self { layouts })
    }

    /// Just the classic maze
    pub fn classic() -> Self {
        Self {
            layouts: vec![Layout::classic()],
        }
    }

    /// Layout for a 1-based level index
    pub fn for_level(&self, level: u32) -> &Layout {
        let idx = level.saturating_sub(1) as usize % self.layouts.len();
        &self.layouts[idx]
    }
}

impl Default for LayoutSet {
    fn default() -> Self {
        Self::classic()
    }
}
