//! Renderer-independent board state: the grid, run detection, generation and
//! the cascade engine that ties them together.

pub mod animator;
pub mod cascade;
pub mod config;
pub mod coord;
pub mod easing;
pub mod error;
pub mod generator;
pub mod gesture;
pub mod grid;
pub mod headless;
pub mod matching;
pub mod piece;
pub mod swap;

pub mod prelude {
    pub use super::animator::{Animator, ClearEffect, MoveRequest};
    pub use super::cascade::{CascadeEngine, CascadeState};
    pub use super::config::BoardConfig;
    pub use super::coord::{Axis, Coord, Step};
    pub use super::easing::Easing;
    pub use super::error::{ConfigError, EngineError, SwapRejected};
    pub use super::grid::{Grid, Tile};
    pub use super::headless::QueuedAnimator;
    pub use super::matching::{MatchFinder, MatchSet};
    pub use super::piece::{MatchValue, Piece, PieceId};
}

/// Builds a grid from rows listed top row first. `.` marks an empty cell and
/// `A`, `B`, ... map to match values 0, 1, ...
#[cfg(test)]
pub(crate) fn grid_from_rows(rows: &[&str]) -> grid::Grid {
    use coord::Coord;
    use piece::{MatchValue, Piece, PieceId};

    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.len()) as u32;
    let mut grid = grid::Grid::new(width, height);
    let mut id = 0;
    for (row_index, row) in rows.iter().enumerate() {
        let y = height as i32 - 1 - row_index as i32;
        for (x, symbol) in row.bytes().enumerate() {
            if symbol == b'.' {
                continue;
            }
            id += 1;
            let piece = Piece::new(PieceId(id), MatchValue(symbol - b'A'), Coord::default());
            grid.place(piece, Coord::new(x as i32, y));
        }
    }
    grid
}
