//! Episode setup and player movement.
//!
//! An episode is one maze plus its start, exit, and player position. It is
//! replaced wholesale on reset, never patched cell by cell.

use crate::error::MazeError;
use crate::grid::{cell_count, Coord, Direction, Grid};
use crate::maze_gen::generate_maze;
use crate::rng::RandomSource;
use crate::MAX_MOVES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a single move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MoveOutcome {
    Moved,
    /// A wall faces the requested direction; nothing changed
    Blocked,
    /// The move landed on the exit and ended the episode
    ReachedExit,
    /// The exit was already reached; nothing changed
    Finished,
}

fn check_episode_dims(width: usize, height: usize) -> Result<(), MazeError> {
    if cell_count(width, height)? < 2 {
        return Err(MazeError::DegenerateEpisode { width, height });
    }
    Ok(())
}

fn random_coord<R: RandomSource>(width: usize, height: usize, rng: &mut R) -> Coord {
    let col = rng.next_index(width);
    let row = rng.next_index(height);
    Coord::new(col, row)
}

/// Draw a start cell uniformly, then redraw the exit until it differs.
///
/// # Errors
/// * [`MazeError::InvalidDimensions`] if either side is zero or the cell
///   count overflows `usize`
/// * [`MazeError::DegenerateEpisode`] for a 1x1 grid, where no distinct
///   exit exists
pub fn pick_start_and_exit<R: RandomSource>(
    width: usize,
    height: usize,
    rng: &mut R,
) -> Result<(Coord, Coord), MazeError> {
    check_episode_dims(width, height)?;

    let start = random_coord(width, height, rng);
    let mut exit = random_coord(width, height, rng);
    while exit == start {
        exit = random_coord(width, height, rng);
    }
    Ok((start, exit))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    grid: Grid,
    start: Coord,
    exit: Coord,
    player: Coord,
    moves: usize,
    finished: bool,
}

impl Episode {
    /// Generate a fresh maze carved from (0, 0) and place start and exit.
    pub fn new<R: RandomSource>(width: usize, height: usize, rng: &mut R) -> Result<Self, MazeError> {
        // Reject degenerate sizes before any carving happens
        check_episode_dims(width, height)?;

        let grid = generate_maze(width, height, Coord::new(0, 0), rng)?;
        let (start, exit) = pick_start_and_exit(width, height, rng)?;
        tracing::debug!(%start, %exit, width, height, "episode ready");

        Ok(Self::from_parts(grid, start, exit))
    }

    /// Build an episode on an existing grid.
    pub fn with_grid(grid: Grid, start: Coord, exit: Coord) -> Result<Self, MazeError> {
        for coord in [start, exit] {
            if !grid.contains(coord) {
                return Err(MazeError::OutOfBounds {
                    col: coord.col,
                    row: coord.row,
                });
            }
        }
        if start == exit {
            return Err(MazeError::StartIsExit {
                col: start.col,
                row: start.row,
            });
        }
        Ok(Self::from_parts(grid, start, exit))
    }

    fn from_parts(grid: Grid, start: Coord, exit: Coord) -> Self {
        Self {
            grid,
            start,
            exit,
            player: start,
            moves: 0,
            finished: false,
        }
    }

    /// Replace this episode with a new maze of the same size.
    pub fn reset<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), MazeError> {
        *self = Self::new(self.grid.width(), self.grid.height(), rng)?;
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn exit(&self) -> Coord {
        self.exit
    }

    pub fn player(&self) -> Coord {
        self.player
    }

    /// Successful moves so far
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Move the player one cell if no wall faces `dir`.
    pub fn try_move(&mut self, dir: Direction) -> MoveOutcome {
        if self.finished {
            return MoveOutcome::Finished;
        }
        let next = match step(&self.grid, self.player, dir) {
            Some(next) => next,
            None => return MoveOutcome::Blocked,
        };

        self.player = next;
        self.moves += 1;

        if self.player == self.exit {
            self.finished = true;
            MoveOutcome::ReachedExit
        } else {
            MoveOutcome::Moved
        }
    }
}

/// The cell reached by moving from `from` towards `dir`, if no wall is in
/// the way.
fn step(grid: &Grid, from: Coord, dir: Direction) -> Option<Coord> {
    if !grid.has_passage(from, dir) {
        return None;
    }
    grid.neighbor(from, dir)
}

/// Outcome of replaying a recorded path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathReport {
    /// Whether the path arrived at the exit
    pub reached_exit: bool,
    /// Moves applied before the replay stopped
    pub moves_applied: usize,
    pub final_position: Coord,
}

/// Replay wire-coded moves (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST) from `start`.
///
/// The replay stops at the first arrival at `exit`. An unknown code or a
/// move into a wall invalidates the whole path, as does a path longer than
/// [`MAX_MOVES`].
pub fn replay_path(grid: &Grid, start: Coord, exit: Coord, moves: &[u8]) -> PathReport {
    let mut report = PathReport {
        reached_exit: false,
        moves_applied: 0,
        final_position: start,
    };

    if moves.len() > MAX_MOVES || !grid.contains(start) {
        return report;
    }

    for &code in moves {
        let Ok(dir) = Direction::try_from(code) else {
            tracing::debug!(code, "invalid move code");
            return report;
        };
        let Some(next) = step(grid, report.final_position, dir) else {
            tracing::debug!(at = %report.final_position, %dir, "move blocked by wall");
            return report;
        };

        report.final_position = next;
        report.moves_applied += 1;

        if next == exit {
            report.reached_exit = true;
            break;
        }
    }

    report
}
