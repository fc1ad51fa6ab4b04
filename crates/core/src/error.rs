//! Error taxonomy for the core.
//!
//! None of these cross the grid/engine boundary during play. Grid access errors are
//! programmer errors (asserted in debug builds, logged in release), pool anomalies are
//! logged and recovered from, and configuration or layout errors are returned once at
//! setup time.

use thiserror::Error;

use crate::piece::PieceId;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds { x: i8, y: i8, width: u8, height: u8 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("piece {id:?} was not spawned by this pool; discarding it")]
    UnknownInstance { id: PieceId },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 3x3, got {width}x{height}")]
    BoardTooSmall { width: u8, height: u8 },

    #[error("board must fit in 127x127, got {width}x{height}")]
    BoardTooLarge { width: u8, height: u8 },

    #[error("piece palette has no regular pieces")]
    EmptyPalette,

    #[error("palette entry {index} is a bomb; regular entries must be regular pieces")]
    RegularTemplateIsBomb { index: usize },

    #[error("bomb template is not a bomb")]
    BombTemplateNotBomb,

    #[error("bomb blast radius must be at least 1")]
    ZeroBlastRadius,

    #[error("bomb creation needs total >= regular >= 1, got total {total}, regular {regular}")]
    InvalidBombThreshold { total: usize, regular: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown piece symbol {symbol:?} at row {row}, column {column}")]
    UnknownSymbol {
        symbol: char,
        row: usize,
        column: usize,
    },

    #[error("layout is {width}x{height} but the board is {board_width}x{board_height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        board_width: u8,
        board_height: u8,
    },
}
