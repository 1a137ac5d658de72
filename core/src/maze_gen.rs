//! Maze generation using Recursive Backtracker algorithm
//!
//! Algorithm: Recursive Backtracker (DFS with backtracking)
//! 1. Mark the start cell as visited and make it current
//! 2. Loop:
//!    - Get unvisited neighbors of current cell
//!    - If neighbors exist:
//!      * Choose random neighbor, mark it visited
//!      * Push current to stack
//!      * Remove wall between current and neighbor
//!      * Move current to the neighbor
//!    - Else if stack is not empty: backtrack (pop into current)
//!    - Else: done
//! 3. Clear every visited flag
//!
//! Every carve joins a newly visited cell to exactly one visited cell, so
//! the open passages form a spanning tree: a perfect maze.

use alloc::vec::Vec;

use crate::error::MazeError;
use crate::grid::{cell_count, Coord, Grid};
use crate::rng::RandomSource;

/// Counters collected while carving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarveStats {
    /// Cells marked visited (equals `width * height` on completion)
    pub visited: usize,
    /// Walls removed between neighbors
    pub passages: usize,
    /// Stack pops
    pub backtracks: usize,
}

/// Generate a `width` x `height` perfect maze, carving from `start`.
///
/// # Errors
/// * [`MazeError::InvalidDimensions`] if either side is zero or the cell
///   count overflows `usize`
/// * [`MazeError::OutOfBounds`] if `start` is not on the grid
pub fn generate_maze<R: RandomSource>(
    width: usize,
    height: usize,
    start: Coord,
    rng: &mut R,
) -> Result<Grid, MazeError> {
    generate_maze_with_stats(width, height, start, rng).map(|(grid, _)| grid)
}

/// Same as [`generate_maze`], also returning carve counters.
pub fn generate_maze_with_stats<R: RandomSource>(
    width: usize,
    height: usize,
    start: Coord,
    rng: &mut R,
) -> Result<(Grid, CarveStats), MazeError> {
    cell_count(width, height)?;

    let mut grid = Grid::new(width, height);
    if !grid.contains(start) {
        return Err(MazeError::OutOfBounds {
            col: start.col,
            row: start.row,
        });
    }

    let stats = recursive_backtracker(&mut grid, start, rng);
    tracing::debug!(
        width,
        height,
        visited = stats.visited,
        passages = stats.passages,
        backtracks = stats.backtracks,
        "maze carved"
    );

    Ok((grid, stats))
}

/// Recursive backtracker algorithm (iterative with explicit stack)
///
/// `start` must be on the grid.
fn recursive_backtracker<R: RandomSource>(grid: &mut Grid, start: Coord, rng: &mut R) -> CarveStats {
    let mut stats = CarveStats::default();
    let mut stack: Vec<Coord> = Vec::with_capacity(grid.width() * grid.height());

    let mut current = start;
    mark_visited(grid, current, &mut stats);

    loop {
        let neighbors = grid.unvisited_neighbors(current);

        if !neighbors.is_empty() {
            let (_, next) = neighbors[rng.next_index(neighbors.len())];
            mark_visited(grid, next, &mut stats);
            stack.push(current);
            if grid.remove_walls(current, next) {
                stats.passages += 1;
            }
            current = next;
        } else if let Some(prev) = stack.pop() {
            stats.backtracks += 1;
            current = prev;
        } else {
            break;
        }
    }

    grid.reset_visited();
    stats
}

fn mark_visited(grid: &mut Grid, coord: Coord, stats: &mut CarveStats) {
    if let Some(cell) = grid.cell_mut(coord) {
        cell.visited = true;
        stats.visited += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use crate::rng::SimpleLCG;
    use alloc::collections::VecDeque;
    use alloc::vec;

    /// Breadth-first reach over open passages
    fn reachable_from(grid: &Grid, from: Coord) -> usize {
        let mut seen = vec![false; grid.width() * grid.height()];
        let mut queue = VecDeque::new();
        seen[from.row * grid.width() + from.col] = true;
        queue.push_back(from);
        let mut count = 0;

        while let Some(coord) = queue.pop_front() {
            count += 1;
            for dir in Direction::ALL {
                if !grid.has_passage(coord, dir) {
                    continue;
                }
                if let Some(next) = grid.neighbor(coord, dir) {
                    let idx = next.row * grid.width() + next.col;
                    if !seen[idx] {
                        seen[idx] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        count
    }

    fn assert_walls_symmetric(grid: &Grid) {
        for cell in grid.cells() {
            for dir in Direction::ALL {
                match grid.neighbor(cell.coord(), dir) {
                    Some(next) => {
                        let other = grid.cell(next).unwrap();
                        assert_eq!(
                            cell.has_wall(dir),
                            other.has_wall(dir.opposite()),
                            "asymmetric wall between {} and {}",
                            cell.coord(),
                            next
                        );
                    }
                    // Outer boundary stays closed
                    None => assert!(cell.has_wall(dir), "open border at {} {}", cell.coord(), dir),
                }
            }
        }
    }

    #[test]
    fn test_spanning_tree_property() {
        for (width, height, seed) in [(1, 1, 1), (1, 7, 2), (7, 1, 3), (5, 5, 12345), (20, 20, 2918957128), (13, 4, 99)] {
            let mut rng = SimpleLCG::new(seed);
            let grid = generate_maze(width, height, Coord::new(0, 0), &mut rng).unwrap();

            assert_eq!(grid.passage_count(), width * height - 1);
            assert_eq!(reachable_from(&grid, Coord::new(0, 0)), width * height);
        }
    }

    #[test]
    fn test_bfs_reaches_all_cells_5x5() {
        let mut rng = SimpleLCG::new(424242);
        let grid = generate_maze(5, 5, Coord::new(0, 0), &mut rng).unwrap();
        assert_eq!(reachable_from(&grid, Coord::new(0, 0)), 25);
    }

    #[test]
    fn test_full_coverage_visits_each_cell_once() {
        let mut rng = SimpleLCG::new(777);
        let (_, stats) = generate_maze_with_stats(9, 6, Coord::new(0, 0), &mut rng).unwrap();

        assert_eq!(stats.visited, 54);
        assert_eq!(stats.passages, 53);
        // Every push is eventually popped
        assert_eq!(stats.backtracks, stats.passages);
    }

    #[test]
    fn test_wall_symmetry() {
        let mut rng = SimpleLCG::new(31337);
        let grid = generate_maze(12, 8, Coord::new(0, 0), &mut rng).unwrap();
        assert_walls_symmetric(&grid);
    }

    #[test]
    fn test_visited_flags_reset() {
        let mut rng = SimpleLCG::new(8);
        let grid = generate_maze(6, 6, Coord::new(0, 0), &mut rng).unwrap();
        assert!(grid.cells().iter().all(|cell| !cell.visited));
    }

    #[test]
    fn test_other_start_cell() {
        let mut rng = SimpleLCG::new(5);
        let start = Coord::new(3, 2);
        let grid = generate_maze(4, 4, start, &mut rng).unwrap();
        assert_eq!(grid.passage_count(), 15);
        assert_eq!(reachable_from(&grid, start), 16);
    }

    #[test]
    fn test_determinism() {
        let maze1 = generate_maze(10, 10, Coord::new(0, 0), &mut SimpleLCG::new(99999)).unwrap();
        let maze2 = generate_maze(10, 10, Coord::new(0, 0), &mut SimpleLCG::new(99999)).unwrap();

        assert_eq!(maze1, maze2);
        assert_eq!(maze1.to_binary_grid(), maze2.to_binary_grid());
    }

    #[test]
    fn test_different_seeds() {
        let maze1 = generate_maze(10, 10, Coord::new(0, 0), &mut SimpleLCG::new(11111)).unwrap();
        let maze2 = generate_maze(10, 10, Coord::new(0, 0), &mut SimpleLCG::new(22222)).unwrap();

        // Different seeds should (almost certainly) produce different mazes
        assert_ne!(maze1, maze2);
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut rng = SimpleLCG::new(1);
        assert_eq!(
            generate_maze(0, 5, Coord::new(0, 0), &mut rng),
            Err(MazeError::InvalidDimensions { width: 0, height: 5 })
        );
        assert_eq!(
            generate_maze(5, 0, Coord::new(0, 0), &mut rng),
            Err(MazeError::InvalidDimensions { width: 5, height: 0 })
        );
    }

    #[test]
    fn test_overflowing_cell_count_is_rejected() {
        let mut rng = SimpleLCG::new(1);
        assert_eq!(
            generate_maze(usize::MAX, 2, Coord::new(0, 0), &mut rng),
            Err(MazeError::InvalidDimensions { width: usize::MAX, height: 2 })
        );
    }

    #[test]
    fn test_start_out_of_bounds() {
        let mut rng = SimpleLCG::new(1);
        assert_eq!(
            generate_maze(3, 3, Coord::new(3, 0), &mut rng),
            Err(MazeError::OutOfBounds { col: 3, row: 0 })
        );
    }

    /// Always takes the first candidate, which makes the walk predictable
    struct FirstChoice;

    impl RandomSource for FirstChoice {
        fn next_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    #[test]
    fn test_first_choice_walk_on_2x2() {
        // From (0,0): east to (1,0), south to (1,1), west to (0,1)
        let grid = generate_maze(2, 2, Coord::new(0, 0), &mut FirstChoice).unwrap();

        assert!(grid.has_passage(Coord::new(0, 0), Direction::East));
        assert!(grid.has_passage(Coord::new(1, 0), Direction::South));
        assert!(grid.has_passage(Coord::new(1, 1), Direction::West));
        assert!(!grid.has_passage(Coord::new(0, 0), Direction::South));
    }
}
