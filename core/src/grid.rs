//! Grid of cells with per-side wall flags.
//!
//! Cells are stored row-major in a flat `Vec`, indexed `row * width + col`.
//! Walls between neighbors are always cleared in pairs, so a passage is
//! either open from both sides or from neither.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;
use core::str::FromStr;

use crate::error::MazeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of cells in a `width` x `height` grid.
///
/// A zero side, or a product that does not fit in `usize`, is
/// [`MazeError::InvalidDimensions`].
pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize, MazeError> {
    match width.checked_mul(height) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(MazeError::InvalidDimensions { width, height }),
    }
}

/// Cell coordinate, `col` along the width and `row` along the height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// One of the four sides of a cell.
///
/// The discriminant doubles as the wire code for moves
/// (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST) and as the index into
/// [`Cell::walls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// Neighbor lookup order: top, right, bottom, left
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Column and row deltas of a single step
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirectionCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::North),
            1 => Ok(Direction::East),
            2 => Ok(Direction::South),
            3 => Ok(Direction::West),
            _ => Err(InvalidDirectionCode(code)),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let matches = |names: &[&str]| names.iter().any(|n| s.eq_ignore_ascii_case(n));
        if matches(&["up", "north", "w", "k"]) {
            Ok(Direction::North)
        } else if matches(&["right", "east", "d", "l"]) {
            Ok(Direction::East)
        } else if matches(&["down", "south", "s", "j"]) {
            Ok(Direction::South)
        } else if matches(&["left", "west", "a", "h"]) {
            Ok(Direction::West)
        } else {
            Err(ParseDirectionError)
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => write!(f, "north"),
            Direction::East => write!(f, "east"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction code {0}: must be 0 (north), 1 (east), 2 (south) or 3 (west)")]
pub struct InvalidDirectionCode(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: expected up/right/down/left, north/east/south/west, or wasd")]
pub struct ParseDirectionError;

/// A cell in the maze with walls in four directions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
    /// [NORTH, EAST, SOUTH, WEST]; true blocks movement
    pub walls: [bool; 4],
    /// Generation scratch state, false outside of carving
    pub visited: bool,
}

impl Cell {
    fn new(col: usize, row: usize) -> Self {
        Self {
            col,
            row,
            walls: [true, true, true, true], // All walls present initially
            visited: false,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.col, self.row)
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }
}

/// Up to four neighbors, in [`Direction::ALL`] order
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    items: [(Direction, Coord); 4],
    len: usize,
}

impl Neighbors {
    fn new() -> Self {
        Self {
            items: [(Direction::North, Coord::default()); 4],
            len: 0,
        }
    }

    fn push(&mut self, dir: Direction, coord: Coord) {
        self.items[self.len] = (dir, coord);
        self.len += 1;
    }
}

impl Deref for Neighbors {
    type Target = [(Direction, Coord)];

    fn deref(&self) -> &Self::Target {
        &self.items[..self.len]
    }
}

/// Only built through [`Grid::new`], so `cells` always holds exactly
/// `width * height` cells, each at its own row-major index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a `width` x `height` grid with every wall present.
    ///
    /// Dimensions are not validated here; [`generate_maze`](crate::generate_maze)
    /// rejects zero sides and cell counts that overflow `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width.saturating_mul(height));
        for row in 0..height {
            for col in 0..width {
                cells.push(Cell::new(col, row));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.col < self.width && coord.row < self.height
    }

    /// Cell at `(col, row)`, or `None` off the grid.
    ///
    /// Takes signed coordinates so callers can look up `col - 1` at the
    /// left edge without special-casing.
    pub fn get_cell(&self, col: isize, row: isize) -> Option<&Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        self.cell(Coord::new(col as usize, row as usize))
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        if !self.contains(coord) {
            return None;
        }
        self.cells.get(self.index(coord))
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        if !self.contains(coord) {
            return None;
        }
        let idx = self.index(coord);
        self.cells.get_mut(idx)
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.width + coord.col
    }

    /// Coordinate one step from `coord` in `dir`, if it is on the grid
    pub fn neighbor(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        let (dc, dr) = dir.offset();
        let col = coord.col.checked_add_signed(dc)?;
        let row = coord.row.checked_add_signed(dr)?;
        let next = Coord::new(col, row);
        self.contains(next).then_some(next)
    }

    /// In-bounds, unvisited neighbors of `coord` in top, right, bottom,
    /// left order, each paired with the direction taken to reach it.
    pub fn unvisited_neighbors(&self, coord: Coord) -> Neighbors {
        let mut neighbors = Neighbors::new();
        for dir in Direction::ALL {
            if let Some(next) = self.neighbor(coord, dir) {
                if self.cell(next).is_some_and(|cell| !cell.visited) {
                    neighbors.push(dir, next);
                }
            }
        }
        neighbors
    }

    /// True if a step from `coord` towards `dir` is not blocked by a wall.
    pub fn has_passage(&self, coord: Coord, dir: Direction) -> bool {
        self.cell(coord).is_some_and(|cell| !cell.has_wall(dir))
    }

    /// Clear the wall between two adjacent cells on both sides.
    ///
    /// Returns false and leaves the grid untouched when the pair is not
    /// axis-aligned adjacent.
    pub fn remove_walls(&mut self, a: Coord, b: Coord) -> bool {
        let Some(dir) = Direction::ALL
            .into_iter()
            .find(|&dir| self.neighbor(a, dir) == Some(b))
        else {
            return false;
        };

        if let Some(cell) = self.cell_mut(a) {
            cell.walls[dir.index()] = false;
        }
        if let Some(cell) = self.cell_mut(b) {
            cell.walls[dir.opposite().index()] = false;
        }
        true
    }

    pub(crate) fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    /// Number of open adjacent pairs. A perfect maze has `width * height - 1`.
    pub fn passage_count(&self) -> usize {
        // Count each pair once, from its left or upper member
        self.cells
            .iter()
            .map(|cell| {
                let east = !cell.has_wall(Direction::East) as usize;
                let south = !cell.has_wall(Direction::South) as usize;
                east + south
            })
            .sum()
    }

    /// Convert maze to binary grid representation
    ///
    /// Creates a grid where:
    /// - 0 = wall
    /// - 1 = path (walkable cell or open passage)
    ///
    /// For a maze with H rows and W columns:
    /// - Grid size is (H*2 + 1) × (W*2 + 1)
    /// - Cell centers are at (row*2+1, col*2+1)
    pub fn to_binary_grid(&self) -> Vec<Vec<u8>> {
        let mut grid = vec![vec![0u8; self.width * 2 + 1]; self.height * 2 + 1];

        for cell in &self.cells {
            // Cell center position in grid
            let gr = cell.row * 2 + 1;
            let gc = cell.col * 2 + 1;

            grid[gr][gc] = 1;

            // Open passages based on walls
            if !cell.has_wall(Direction::North) {
                grid[gr - 1][gc] = 1;
            }
            if !cell.has_wall(Direction::South) {
                grid[gr + 1][gc] = 1;
            }
            if !cell.has_wall(Direction::East) {
                grid[gr][gc + 1] = 1;
            }
            if !cell.has_wall(Direction::West) {
                grid[gr][gc - 1] = 1;
            }
        }

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_has_all_walls() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.cells().len(), 12);
        for cell in grid.cells() {
            assert_eq!(cell.walls, [true; 4]);
            assert!(!cell.visited);
        }
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn test_every_cell_sits_at_its_own_index() {
        for (width, height) in [(1, 1), (1, 7), (7, 1), (5, 3), (20, 20)] {
            let grid = Grid::new(width, height);
            assert_eq!(grid.cells().len(), width * height);
            for (i, cell) in grid.cells().iter().enumerate() {
                assert_eq!(cell.coord(), Coord::new(i % width, i / width));
                assert_eq!(grid.cell(cell.coord()), Some(cell));
                assert!(grid.unvisited_neighbors(cell.coord()).len() <= 4);
            }
            let binary = grid.to_binary_grid();
            assert_eq!(binary.len(), height * 2 + 1);
            assert!(binary.iter().all(|row| row.len() == width * 2 + 1));
        }
    }

    #[test]
    fn test_cell_count_rejects_zero_and_overflow() {
        assert_eq!(cell_count(4, 3), Ok(12));
        assert_eq!(
            cell_count(0, 3),
            Err(MazeError::InvalidDimensions { width: 0, height: 3 })
        );
        assert_eq!(
            cell_count(usize::MAX, 2),
            Err(MazeError::InvalidDimensions { width: usize::MAX, height: 2 })
        );
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = Grid::new(3, 2);
        for (i, cell) in grid.cells().iter().enumerate() {
            assert_eq!(cell.row * 3 + cell.col, i);
        }
        assert_eq!(grid.cells()[4].coord(), Coord::new(1, 1));
    }

    #[test]
    fn test_get_cell_out_of_bounds_is_none() {
        let grid = Grid::new(3, 2);
        assert!(grid.get_cell(-1, 0).is_none());
        assert!(grid.get_cell(0, -1).is_none());
        assert!(grid.get_cell(3, 0).is_none());
        assert!(grid.get_cell(0, 2).is_none());
        assert_eq!(grid.get_cell(2, 1).map(Cell::coord), Some(Coord::new(2, 1)));
    }

    #[test]
    fn test_unvisited_neighbors_order_and_bounds() {
        let grid = Grid::new(3, 3);

        let center: Vec<_> = grid.unvisited_neighbors(Coord::new(1, 1)).to_vec();
        assert_eq!(
            center,
            vec![
                (Direction::North, Coord::new(1, 0)),
                (Direction::East, Coord::new(2, 1)),
                (Direction::South, Coord::new(1, 2)),
                (Direction::West, Coord::new(0, 1)),
            ]
        );

        let corner: Vec<_> = grid.unvisited_neighbors(Coord::new(0, 0)).to_vec();
        assert_eq!(
            corner,
            vec![
                (Direction::East, Coord::new(1, 0)),
                (Direction::South, Coord::new(0, 1)),
            ]
        );
    }

    #[test]
    fn test_unvisited_neighbors_skips_visited() {
        let mut grid = Grid::new(3, 3);
        grid.cell_mut(Coord::new(1, 0)).unwrap().visited = true;
        grid.cell_mut(Coord::new(0, 1)).unwrap().visited = true;

        let dirs: Vec<_> = grid
            .unvisited_neighbors(Coord::new(1, 1))
            .iter()
            .map(|(dir, _)| *dir)
            .collect();
        assert_eq!(dirs, vec![Direction::East, Direction::South]);
    }

    #[test]
    fn test_remove_walls_is_symmetric() {
        let mut grid = Grid::new(2, 2);

        assert!(grid.remove_walls(Coord::new(0, 0), Coord::new(1, 0)));
        assert!(!grid.cell(Coord::new(0, 0)).unwrap().has_wall(Direction::East));
        assert!(!grid.cell(Coord::new(1, 0)).unwrap().has_wall(Direction::West));

        assert!(grid.remove_walls(Coord::new(1, 1), Coord::new(1, 0)));
        assert!(!grid.cell(Coord::new(1, 1)).unwrap().has_wall(Direction::North));
        assert!(!grid.cell(Coord::new(1, 0)).unwrap().has_wall(Direction::South));

        assert_eq!(grid.passage_count(), 2);
    }

    #[test]
    fn test_remove_walls_ignores_non_adjacent() {
        let mut grid = Grid::new(3, 3);
        let before = grid.clone();

        assert!(!grid.remove_walls(Coord::new(0, 0), Coord::new(1, 1)));
        assert!(!grid.remove_walls(Coord::new(0, 0), Coord::new(2, 0)));
        assert!(!grid.remove_walls(Coord::new(0, 0), Coord::new(0, 0)));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_direction_codes() {
        for dir in Direction::ALL {
            assert_eq!(Direction::try_from(dir.code()), Ok(dir));
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::try_from(4), Err(InvalidDirectionCode(4)));
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("Right".parse::<Direction>(), Ok(Direction::East));
        assert_eq!(" s ".parse::<Direction>(), Ok(Direction::South));
        assert_eq!("WEST".parse::<Direction>(), Ok(Direction::West));
        assert_eq!("diagonal".parse::<Direction>(), Err(ParseDirectionError));
    }

    #[test]
    fn test_binary_grid_layout() {
        let mut grid = Grid::new(2, 1);
        grid.remove_walls(Coord::new(0, 0), Coord::new(1, 0));

        assert_eq!(
            grid.to_binary_grid(),
            vec![
                vec![0, 0, 0, 0, 0],
                vec![0, 1, 1, 1, 0],
                vec![0, 0, 0, 0, 0],
            ]
        );
    }
}
