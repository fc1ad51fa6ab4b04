//! Events the engine reports to its host.
//!
//! Collected during [`Game::step`](crate::Game::step) and friends, drained by the host
//! with [`Game::drain_events`](crate::Game::drain_events).

use tui_match3_core::{FallMove, PieceId};
use tui_match3_types::{BombColor, PieceKind, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A swap was accepted; the game is now waiting.
    Swapped { from: Position, to: Position },
    /// The swap produced no match involving either piece and was undone.
    SwapReverted { from: Position, to: Position },
    /// A detection pass found matches. `cascade` is 0 for the swap's own match.
    MatchesFound { count: usize, cascade: u32 },
    PieceDestroyed {
        id: PieceId,
        position: Position,
        kind: PieceKind,
    },
    /// Points awarded for one destroyed piece.
    ScoreDelta(u32),
    BombCreated { position: Position, color: BombColor },
    /// Two or more bombs matched together; the whole board is being cleared.
    BoardCleared,
    PieceFell(FallMove),
    PieceSpawned {
        id: PieceId,
        position: Position,
        kind: PieceKind,
    },
    /// The resolution cycle ended and swaps are accepted again.
    Settled { cascades: u32 },
}
