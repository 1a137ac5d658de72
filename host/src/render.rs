//! Plain-text maze drawing for the terminal front-end.

use maze_core::{Coord, Episode};

const WALL: &str = "██";
const PATH: &str = "  ";
const START: &str = "S ";
const EXIT: &str = "E ";
const PLAYER: &str = "@ ";

/// Draw the maze with start, exit, and player markers.
///
/// Each binary-grid square becomes two characters wide so the maze keeps
/// roughly square proportions in a terminal.
pub fn render_episode(episode: &Episode) -> String {
    let grid = episode.grid().to_binary_grid();
    let center = |coord: Coord| (coord.row * 2 + 1, coord.col * 2 + 1);
    let player = center(episode.player());
    let start = center(episode.start());
    let exit = center(episode.exit());

    let mut out = String::with_capacity(grid.len() * (grid.first().map_or(0, Vec::len) * 6 + 1));
    for (r, row) in grid.iter().enumerate() {
        for (c, &square) in row.iter().enumerate() {
            let glyph = if (r, c) == player {
                PLAYER
            } else if (r, c) == exit {
                EXIT
            } else if (r, c) == start {
                START
            } else if square == 0 {
                WALL
            } else {
                PATH
            };
            out.push_str(glyph);
        }
        out.push('\n');
    }
    out
}
