//! Engine crate - resolution cycles and the turn state machine
//!
//! Built on the pure board logic in `tui-match3-core`, this crate adds time and
//! sequencing:
//!
//! - [`resolve`]: turns a match set into destruction steps (bombs, board clears,
//!   bomb creation)
//! - [`scheduler`]: the queue of steps and pauses a cycle is made of
//! - [`game`]: the [`Game`] state machine hosts drive with swaps and elapsed time
//! - [`event`]: what happened, for hosts to react to
//!
//! # Example
//!
//! ```
//! use tui_match3_core::GameConfig;
//! use tui_match3_engine::{Game, GameEvent};
//! use tui_match3_types::{Direction, Position, TurnState};
//!
//! let config = GameConfig::instant().with_board(4, 3);
//! let mut game = Game::from_layout(config, "GBRY\nRBYG\nBGBR", 3).unwrap();
//!
//! // The blue at the bottom-left moves right, completing a column of blues.
//! assert!(game.on_swap_gesture(Position::new(0, 0), Direction::Right));
//! game.run_until_settled();
//!
//! assert_eq!(game.state(), TurnState::Move);
//! assert!(game.score() >= 30);
//! assert!(game.grid().is_full());
//! ```

pub mod error;
pub mod event;
pub mod game;
pub mod resolve;
pub mod scheduler;

pub use error::SetupError;
pub use event::GameEvent;
pub use game::Game;
pub use resolve::{plan_resolution, ResolutionPlan};
pub use scheduler::{BombReservation, Scheduler, Step, SwapRecord};
