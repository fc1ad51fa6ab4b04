//! Scoring: the running total and the eased display value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::piece::Piece;

/// Running score total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreKeeper {
    total: u32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a destroyed piece's value. Returns the delta.
    pub fn award(&mut self, piece: &Piece) -> u32 {
        self.total = self.total.saturating_add(piece.score_value);
        piece.score_value
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }
}

/// Cancellation signal shared between an owner and its background activity.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Receiver of the eased score (the display collaborator).
pub trait ScoreView {
    fn set_score(&mut self, value: f32);
}

/// Outcome of one [`ScoreTicker::advance`] iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickerStatus {
    /// Display moved towards the target; carries the new value.
    Running(f32),
    /// Display reached the target this iteration; carries the exact target.
    Finished(f32),
    /// Nothing to do.
    Idle,
    /// The owner went away; the ticker stopped where it was.
    Cancelled,
}

/// Eases a displayed score towards the real total.
#[derive(Debug, Clone)]
pub struct ScoreTicker {
    displayed: f32,
    settled: bool,
    token: CancelToken,
}

impl ScoreTicker {
    pub fn new(token: CancelToken) -> Self {
        Self {
            displayed: 0.0,
            settled: true,
            token,
        }
    }

    pub fn displayed(&self) -> f32 {
        self.displayed
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Jump straight to `value` (new game).
    pub fn reset_to(&mut self, value: f32) {
        self.displayed = value;
        self.settled = true;
    }

    /// One easing iteration: move at most `max_delta` towards `target`.
    ///
    /// Checks the cancellation token first on every call.
    pub fn advance(&mut self, target: u32, max_delta: f32) -> TickerStatus {
        if self.token.is_cancelled() {
            return TickerStatus::Cancelled;
        }

        let target = target as f32;
        if (target - self.displayed).abs() <= f32::EPSILON * target.abs().max(1.0) {
            if self.settled {
                return TickerStatus::Idle;
            }
            self.displayed = target;
            self.settled = true;
            return TickerStatus::Finished(target);
        }

        self.settled = false;
        self.displayed = move_towards(self.displayed, target, max_delta);
        TickerStatus::Running(self.displayed)
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
