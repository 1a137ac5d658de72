//! Game sessions, configuration, and snapshots for maze front-ends.
//!
//! The terminal binary and the HTTP API both drive the core through this
//! crate: a [`GameSession`] owns the current [`Episode`] and its timer, and
//! a [`MazeSnapshot`] is the serializable view handed to renderers.

pub mod render;

use std::time::{Duration, Instant};

use anyhow::{bail, ensure};
use maze_core::{
    replay_path, Coord, Direction, Episode, MazeError, MoveOutcome, PathReport, SimpleLCG,
    DEFAULT_COLS, DEFAULT_ROWS, MAX_MOVES,
};
use serde::{Deserialize, Serialize};

/// Largest accepted width or height
pub const MAX_DIMENSION: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("maze dimensions {width}x{height} exceed the maximum of {max}x{max}")]
    TooLarge { width: usize, height: usize, max: usize },
}

/// Dimensions and optional seed for a new game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Fixed seed for a reproducible maze; a fresh one is drawn when absent
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_COLS,
            height: DEFAULT_ROWS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Check dimensions before any generation attempt.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height }.into());
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ConfigError::TooLarge {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }
        if width * height < 2 {
            return Err(MazeError::DegenerateEpisode { width, height }.into());
        }
        Ok(())
    }

    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Rebuild the episode a seed describes. Same inputs, same maze.
pub fn episode_from_seed(width: usize, height: usize, seed: u32) -> Result<Episode, ConfigError> {
    GameConfig {
        width,
        height,
        seed: Some(seed),
    }
    .validate()?;
    let mut rng = SimpleLCG::new(seed);
    Ok(Episode::new(width, height, &mut rng)?)
}

/// A running game: the episode, the seed it came from, and its timer
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    seed: u32,
    episode: Episode,
    started_at: Instant,
    finished_in: Option<Duration>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.resolve_seed();
        let episode = episode_from_seed(config.width, config.height, seed)?;
        tracing::info!(
            "New {}x{} maze (seed {}): start {}, exit {}",
            config.width,
            config.height,
            seed,
            episode.start(),
            episode.exit()
        );

        Ok(Self {
            config,
            seed,
            episode,
            started_at: Instant::now(),
            finished_in: None,
        })
    }

    /// Start over on a freshly seeded maze of the same size.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        let fresh = GameConfig {
            seed: None,
            ..self.config
        };
        let mut next = Self::new(fresh)?;
        next.config = self.config;
        *self = next;
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    pub fn try_move(&mut self, dir: Direction) -> MoveOutcome {
        let outcome = self.episode.try_move(dir);
        if outcome == MoveOutcome::ReachedExit {
            let elapsed = self.started_at.elapsed();
            self.finished_in = Some(elapsed);
            tracing::info!(
                "Exit reached in {:.2}s after {} moves (seed {})",
                elapsed.as_secs_f64(),
                self.episode.moves(),
                self.seed
            );
        }
        outcome
    }

    /// Time since the episode began, frozen once the exit is reached
    pub fn elapsed(&self) -> Duration {
        self.finished_in.unwrap_or_else(|| self.started_at.elapsed())
    }

    pub fn is_finished(&self) -> bool {
        self.episode.is_finished()
    }

    pub fn snapshot(&self) -> MazeSnapshot {
        MazeSnapshot::new(&self.episode, self.seed)
    }
}

/// Serializable view of an episode for renderers and API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSnapshot {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub start: Coord,
    pub exit: Coord,
    pub player: Coord,
    /// Row-major wall flags [NORTH, EAST, SOUTH, WEST] per cell
    pub walls: Vec<[bool; 4]>,
    /// Binary grid (0=wall, 1=path), (2H+1) x (2W+1)
    pub grid: Vec<Vec<u8>>,
}

impl MazeSnapshot {
    pub fn new(episode: &Episode, seed: u32) -> Self {
        let grid = episode.grid();
        Self {
            width: grid.width(),
            height: grid.height(),
            seed,
            start: episode.start(),
            exit: episode.exit(),
            player: episode.player(),
            walls: grid.cells().iter().map(|cell| cell.walls).collect(),
            grid: grid.to_binary_grid(),
        }
    }
}

/// Parse move codes (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST) or direction words,
/// separated by whitespace or commas.
pub fn parse_moves(text: &str) -> anyhow::Result<Vec<u8>> {
    let moves = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<u8>() {
            Ok(code) => Direction::try_from(code).map(Direction::code).map_err(anyhow::Error::from),
            Err(_) => token.parse::<Direction>().map(Direction::code).map_err(anyhow::Error::from),
        })
        .collect::<anyhow::Result<Vec<u8>>>()?;

    ensure!(!moves.is_empty(), "Moves list is empty");
    ensure!(
        moves.len() <= MAX_MOVES,
        "Too many moves: {} (max {})",
        moves.len(),
        MAX_MOVES
    );

    Ok(moves)
}

/// Regenerate the maze for `seed` and replay `moves` from its start.
pub fn verify_seeded_path(
    width: usize,
    height: usize,
    seed: u32,
    moves: &[u8],
) -> Result<PathReport, ConfigError> {
    let episode = episode_from_seed(width, height, seed)?;
    let report = replay_path(episode.grid(), episode.start(), episode.exit(), moves);
    tracing::info!(
        "Replayed {} of {} moves for seed {}: reached exit = {}",
        report.moves_applied,
        moves.len(),
        seed,
        report.reached_exit
    );
    Ok(report)
}

/// Replay `moves` against the maze a snapshot describes.
///
/// The maze is regenerated from the snapshot's seed rather than trusted
/// from the caller; a snapshot whose grid disagrees with its seed is rejected.
pub fn verify_snapshot_path(snapshot: &MazeSnapshot, moves: &[u8]) -> anyhow::Result<PathReport> {
    let episode = episode_from_seed(snapshot.width, snapshot.height, snapshot.seed)?;
    let expected = MazeSnapshot::new(&episode, snapshot.seed);

    if expected.grid != snapshot.grid || expected.start != snapshot.start || expected.exit != snapshot.exit {
        bail!(
            "snapshot does not match seed {} ({}x{})",
            snapshot.seed,
            snapshot.width,
            snapshot.height
        );
    }

    Ok(verify_seeded_path(snapshot.width, snapshot.height, snapshot.seed, moves)?)
}
