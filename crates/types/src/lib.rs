//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! They are plain data with no game logic, usable from the rule engine, the
//! terminal view and the input mapping alike.
//!
//! # Coordinates
//!
//! Boards are addressed as `(x, y)` with `x` growing to the right and `y` growing
//! **upwards**: row 0 is the bottom row, gravity pulls pieces towards smaller `y`.
//!
//! # Timing Defaults
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop fixed timestep (~60 FPS) |
//! | `GRAVITY_STEP_DELAY_MS` | 50 | Pause after each falling or refilled piece |
//! | `GRAVITY_START_DELAY_MS` | 200 | Pause between destruction and gravity |
//! | `BOMB_BLAST_DELAY_MS` | 200 | Pause before a bomb clears its neighborhood |
//! | `BOMB_SELF_DESTROY_DELAY_MS` | 200 | Pause before a bomb removes itself |
//! | `SWAP_SETTLE_MS` | 500 | Settle window after a swap before detection |
//! | `REFILL_SETTLE_MS` | 500 | Settle window around refill and re-detection |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{BombColor, Direction, PieceColor, PieceKind, Position};
//!
//! let red = PieceKind::Regular { color: PieceColor::Red };
//! let bomb = PieceKind::Bomb { color: BombColor::Any, blast_radius: 1 };
//! assert!(bomb.is_bomb());
//! assert_eq!(red.logical_color(), BombColor::Color(PieceColor::Red));
//!
//! let p = Position::new(3, 3).offset(Direction::Up);
//! assert_eq!(p, Position::new(3, 4));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width (7 columns)
pub const DEFAULT_BOARD_WIDTH: u8 = 7;

/// Default board height (7 rows)
pub const DEFAULT_BOARD_HEIGHT: u8 = 7;

/// Host loop fixed timestep in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Pause after every single falling piece and every refilled cell.
pub const GRAVITY_STEP_DELAY_MS: u32 = 50;

/// Pause between the last destruction of a cycle and the start of gravity.
pub const GRAVITY_START_DELAY_MS: u32 = 200;

/// Pause before a matched bomb clears its neighborhood.
pub const BOMB_BLAST_DELAY_MS: u32 = 200;

/// Pause between a bomb's blast and the bomb removing itself.
pub const BOMB_SELF_DESTROY_DELAY_MS: u32 = 200;

/// Settle window between a swap and the match check (also used before a revert completes).
pub const SWAP_SETTLE_MS: u32 = 500;

/// Settle window before and after refill, and before the next cascade starts.
pub const REFILL_SETTLE_MS: u32 = 500;

/// Displayed score units per second when easing towards the real score.
pub const SCORE_ANIMATION_SPEED: f32 = 5.0;

/// Lerp factor (per second) for piece display positions.
pub const PIECE_SPEED: f32 = 7.0;

/// Rows above its cell at which a freshly spawned piece starts its fall.
pub const DROP_HEIGHT: u8 = 0;

/// Resample attempts when a refill pick would complete an immediate match.
pub const SPAWN_RETRY_LIMIT: u32 = 100;

/// Score awarded for every destroyed piece.
pub const DEFAULT_PIECE_SCORE: u32 = 10;

/// Blast radius of the bomb template.
pub const DEFAULT_BLAST_RADIUS: u8 = 1;

/// Minimum total matched pieces (regular + bombs) to create a bomb.
pub const BOMB_CREATION_TOTAL: usize = 4;

/// Minimum regular matched pieces to create a bomb when a bomb was also matched.
pub const BOMB_CREATION_REGULAR: usize = 3;


/// The five regular piece colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    Blue,
    Green,
    Red,
    Purple,
    Yellow,
}

impl PieceColor {
    /// Every color, in palette order.
    pub const ALL: [PieceColor; 5] = [
        PieceColor::Blue,
        PieceColor::Green,
        PieceColor::Red,
        PieceColor::Purple,
        PieceColor::Yellow,
    ];
}

/// Logical color of a bomb.
///
/// - **Any**: generic bomb, interacts with every piece
/// - **Color**: interacts only with its own color group (and generic bombs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BombColor {
    Any,
    Color(PieceColor),
}

/// What a piece is: a regular colored piece or a bomb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PieceKind {
    Regular { color: PieceColor },
    Bomb { color: BombColor, blast_radius: u8 },
}

impl PieceKind {
    pub fn is_bomb(&self) -> bool {
        matches!(self, PieceKind::Bomb { .. })
    }

    pub fn blast_radius(&self) -> Option<u8> {
        match self {
            PieceKind::Bomb { blast_radius, .. } => Some(*blast_radius),
            PieceKind::Regular { .. } => None,
        }
    }

    /// Color a bomb created from this piece inherits.
    ///
    /// Regular pieces pass on their color, bombs pass on their own bomb color.
    pub fn logical_color(&self) -> BombColor {
        match self {
            PieceKind::Regular { color } => BombColor::Color(*color),
            PieceKind::Bomb { color, .. } => *color,
        }
    }
}

/// A cell address on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// The neighboring cell in `dir`. May lie off the board.
    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Swap directions (screen orientation: `Up` is towards larger `y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    /// Orthogonal neighbor order used by the bomb propagation pass.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Up,
    ];

    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Up => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }
}

/// Input gate of the game.
///
/// - **Move**: accepting swaps
/// - **Wait**: a swap is settling or a resolution cycle is running; input is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnState {
    #[default]
    Move,
    Wait,
}

/// Actions a host can feed into the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the selection cursor one cell
    MoveCursor(Direction),
    /// Swap the piece under the cursor with its neighbor
    Swap(Direction),
    /// Start a fresh board
    Restart,
}
