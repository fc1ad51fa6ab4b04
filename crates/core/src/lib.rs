//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board and the rules a match-3 board obeys. It has **zero
//! dependencies** on rendering, input or timing, making it:
//!
//! - **Deterministic**: Same seed and same swaps produce identical boards
//! - **Testable**: Boards can be built from text layouts and inspected cell by cell
//! - **Portable**: Runs under any host loop (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: the piece matrix, match detection, bomb propagation and gravity
//! - [`rules`]: the match-group predicate (colors and bomb interaction)
//! - [`piece`]: pieces, handles, templates and display easing
//! - [`spawner`]: the spawner interface and the pooled implementation
//! - [`config`]: session tunables, palette and bomb-creation thresholds
//! - [`score`]: running total, eased display score, cancellation
//! - [`rng`]: seeded palette sampling
//! - [`layout`]: text layouts for fixtures and debugging
//! - [`snapshot`]: a serializable view of the board for hosts
//!
//! # Game Rules
//!
//! - **Runs of three** horizontally or vertically match; longer runs are found as
//!   overlapping triples and merged
//! - **Bombs** match with pieces of their color group (a generic bomb with anything);
//!   a matched piece next to an interacting bomb sets off the bomb's blast square
//! - **Two bombs** side by side always match each other
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{Grid, Layout, Palette, PiecePool, Spawner};
//!
//! let layout = Layout::parse("RRR\nGBG\nBGB", 1).unwrap();
//! let palette = Palette::standard();
//! let mut pool = PiecePool::new();
//! let mut grid = Grid::new(3, 3);
//! for (pos, kind) in layout.pieces() {
//!     let template = palette.template_for(&kind).unwrap();
//!     grid.set(pos, pool.spawn(template, pos));
//! }
//!
//! assert_eq!(grid.find_all_matches().len(), 3);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod piece;
pub mod rng;
pub mod rules;
pub mod score;
pub mod snapshot;
pub mod spawner;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use config::{BombCreationRule, GameConfig, Palette};
pub use error::{ConfigError, GridError, LayoutError, PoolError};
pub use grid::{FallMove, Grid};
pub use layout::Layout;
pub use piece::{DisplayPos, Piece, PieceId, PieceRef, PieceTemplate, TemplateId};
pub use rng::PaletteRng;
pub use rules::{bomb_interacts, in_same_match_group};
pub use score::{CancelToken, ScoreKeeper, ScoreTicker, ScoreView, TickerStatus};
pub use snapshot::{CellSnapshot, GameSnapshot};
pub use spawner::{PiecePool, Spawner};
