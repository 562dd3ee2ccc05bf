//! Toroidal tile grid
//!
//! Every coordinate lookup wraps modulo the grid size, so the maze has no
//! edges: leaving the last column re-enters at column 0.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::wrap_coord;

/// Contents of one maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Pellet,
    PowerPellet,
    Empty,
}

impl Tile {
    /// Everything except walls can be walked on
    pub fn is_passable(self) -> bool {
        self != Tile::Wall
    }

    /// Pellets and power pellets both count toward level completion
    pub fn is_pellet(self) -> bool {
        matches!(self, Tile::Pellet | Tile::PowerPellet)
    }
}

/// The maze as a row-major array of tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a grid from rows of equal length. Layout validation happens in
    /// `layout`; this only requires a rectangular, non-empty input.
    pub(crate) fn from_rows(rows: Vec<Vec<Tile>>) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.len()) as i32;
        debug_assert!(rows.iter().all(|r| r.len() as i32 == width));
        Self {
            width,
            height,
            tiles: rows.into_iter().flatten().collect(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Grid dimensions as a float vector (for wrap-distance math)
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Wrap a tile coordinate onto the torus
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        IVec2::new(wrap_coord(pos.x, self.width), wrap_coord(pos.y, self.height))
    }

    fn index(&self, pos: IVec2) -> usize {
        let p = self.wrap(pos);
        (p.y * self.width + p.x) as usize
    }

    /// Tile at a (wrapped) coordinate
    pub fn tile_at(&self, pos: IVec2) -> Tile {
        self.tiles[self.index(pos)]
    }

    pub fn is_passable(&self, pos: IVec2) -> bool {
        self.tile_at(pos).is_passable()
    }

    /// Eat whatever pellet sits on a tile, leaving it empty.
    ///
    /// Only the player's tile-entry path calls this; every other reader gets
    /// `&Grid`.
    pub(in crate::sim) fn consume_pellet(&mut self, pos: IVec2) -> Option<Tile> {
        let idx = self.index(pos);
        let tile = self.tiles[idx];
        if tile.is_pellet() {
            self.tiles[idx] = Tile::Empty;
            Some(tile)
        } else {
            None
        }
    }

    /// Number of pellet and power-pellet tiles left
    pub fn count_pellets(&self) -> u32 {
        self.tiles.iter().filter(|t| t.is_pellet()).count() as u32
    }

    /// Iterate `(position, tile)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(move |(i, &t)| {
            let i = i as i32;
            (IVec2::new(i % self.width, i / self.width), t)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> Grid {
        use Tile::*;
        Grid::from_rows(vec![
            vec![Wall, Pellet, Wall],
            vec![Empty, PowerPellet, Pellet],
            vec![Wall, Empty, Wall],
        ])
    }

    #[test]
    fn test_tile_at_wraps_both_axes() {
        let grid = small_grid();
        assert_eq!(grid.tile_at(IVec2::new(-1, 1)), Tile::Pellet);
        assert_eq!(grid.tile_at(IVec2::new(3, 1)), Tile::Empty);
        assert_eq!(grid.tile_at(IVec2::new(1, -1)), Tile::Empty);
        assert_eq!(grid.tile_at(IVec2::new(1, 3)), Tile::Pellet);
    }

    #[test]
    fn test_passability() {
        let grid = small_grid();
        assert!(!grid.is_passable(IVec2::new(0, 0)));
        assert!(grid.is_passable(IVec2::new(1, 0)));
        assert!(grid.is_passable(IVec2::new(1, 1)));
        assert!(grid.is_passable(IVec2::new(0, 1)));
    }

    #[test]
    fn test_consume_pellet_empties_tile_once() {
        let mut grid = small_grid();
        assert_eq!(grid.count_pellets(), 3);

        assert_eq!(grid.consume_pellet(IVec2::new(1, 1)), Some(Tile::PowerPellet));
        assert_eq!(grid.tile_at(IVec2::new(1, 1)), Tile::Empty);
        assert_eq!(grid.count_pellets(), 2);

        // Second visit finds nothing
        assert_eq!(grid.consume_pellet(IVec2::new(1, 1)), None);
        assert_eq!(grid.consume_pellet(IVec2::new(0, 0)), None);
        assert_eq!(grid.count_pellets(), 2);
    }

    #[test]
    fn test_iter_positions() {
        let grid = small_grid();
        let (pos, tile) = grid.iter().nth(5).unwrap();
        assert_eq!(pos, IVec2::new(2, 1));
        assert_eq!(tile, Tile::Pellet);
    }
}
