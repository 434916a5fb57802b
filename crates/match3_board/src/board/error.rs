use thiserror::Error;

use super::coord::Coord;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Board dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Board side {side} exceeds the maximum of {max}")]
    TooLarge { side: u32, max: u32 },

    #[error("Palette must hold at least one match value")]
    EmptyPalette,

    #[error("{name} must be a finite, non-negative number, got {value}")]
    InvalidDuration { name: &'static str, value: f32 },

    #[error("Cascade pass cap must be at least 1")]
    ZeroCascadeCap,
}

/// Why a swap request was ignored. The board is never mutated on rejection.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejected {
    #[error("Input is disabled while the board resolves")]
    InputDisabled,

    #[error("Cell {0} is outside the board")]
    OutOfBounds(Coord),

    #[error("Cell {0} holds no piece")]
    EmptyCell(Coord),

    #[error("Cannot swap cell {0} with itself")]
    SameCell(Coord),

    #[error("Cells {first} and {second} are not adjacent")]
    NotAdjacent { first: Coord, second: Coord },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Board did not settle after {steps} steps")]
    Stalled { steps: usize },
}
