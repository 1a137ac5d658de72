//! Shared types, constants, and logic for the maze game
//!
//! This crate provides the grid data structure, the recursive backtracker
//! maze generator, and episode setup (start/exit placement and move
//! validation). Rendering and input live in the host crates, which consume
//! the [`Grid`] and [`Episode`] produced here.
//!
//! The crate is no_std compatible (it needs `alloc`), with an optional
//! `std` feature for host-side convenience and a `serde` feature for
//! JSON snapshots.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod episode;
pub mod error;
pub mod grid;
pub mod maze_gen;
pub mod rng;

// Re-export commonly used types for convenience
pub use episode::{pick_start_and_exit, replay_path, Episode, MoveOutcome, PathReport};
pub use error::MazeError;
pub use grid::{Cell, Coord, Direction, Grid};
pub use maze_gen::{generate_maze, generate_maze_with_stats, CarveStats};
pub use rng::{RandomSource, SimpleLCG};

/// Default maze dimensions (cells, not including walls)
pub const DEFAULT_COLS: usize = 20;
pub const DEFAULT_ROWS: usize = 20;

/// Maximum number of moves accepted by path replay
pub const MAX_MOVES: usize = 10_000;
