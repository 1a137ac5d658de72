//! Configuration errors reported before any generation attempt.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Width or height is zero
    #[error("invalid maze dimensions {width}x{height}: both sides must be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    /// The grid has a single cell, so start and exit cannot differ
    #[error("a {width}x{height} maze cannot hold distinct start and exit cells")]
    DegenerateEpisode { width: usize, height: usize },

    /// A coordinate handed to the generator lies outside the grid
    #[error("coordinate ({col}, {row}) is outside the grid")]
    OutOfBounds { col: usize, row: usize },

    /// An episode was assembled with the exit on top of the start
    #[error("start and exit are both ({col}, {row})")]
    StartIsExit { col: usize, row: usize },
}
