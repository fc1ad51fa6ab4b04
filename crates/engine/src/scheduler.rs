//! Phase scheduler.
//!
//! A resolution cycle is a linear sequence of board mutations separated by pauses.
//! The sequence is kept as a queue of [`Step`]s. Pauses consume the host's elapsed
//! time; every other step is instantaneous and runs as soon as the pause before it
//! has elapsed.

use std::collections::VecDeque;

use tui_match3_core::PieceRef;
use tui_match3_types::{BombColor, Position};

/// The two pieces of an accepted swap, as they were before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRecord {
    /// The piece the gesture started on, now at `to`.
    pub moved: PieceRef,
    /// Its neighbor, now at `moved.position`.
    pub other: PieceRef,
    pub to: Position,
}

/// Where a new bomb will be created once destruction is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombReservation {
    pub at: Position,
    pub color: BombColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Wait this many milliseconds.
    Pause(u32),
    /// Re-detect after a swap and either resolve or revert it.
    CheckSwap(SwapRecord),
    /// Plan the destruction of the current match set.
    Resolve,
    /// Destroy these pieces (stale handles are skipped).
    Destroy(Vec<PieceRef>),
    /// Destroy everything in the blast square except `center` and `spare`.
    Blast {
        center: Position,
        radius: u8,
        spare: Option<Position>,
    },
    /// Destroy every piece on the board.
    ClearBoard,
    CreateBomb(BombReservation),
    /// Move one piece down; reschedules itself until the board is compact.
    Collapse,
    /// Fill one empty cell; reschedules itself until the board is full.
    Refill,
    /// Detect matches after a refill and either cascade or settle.
    Redetect,
    /// End the cycle and accept input again.
    Settle,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: VecDeque<Step>,
    wait_ms: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.queue.push_back(step);
    }

    /// Run `step` before anything already queued.
    pub fn push_front(&mut self, step: Step) {
        self.queue.push_front(step);
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = Step>) {
        self.queue.extend(steps);
    }

    /// Nothing queued and no pause pending.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.wait_ms == 0
    }

    pub fn pending_wait_ms(&self) -> u32 {
        self.wait_ms
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.wait_ms = 0;
    }

    /// Next step to execute within `budget_ms` of elapsed time.
    ///
    /// Pauses are consumed from the budget. Returns `None` once the queue is empty or
    /// a pause outlasts the remaining budget (the rest of it carries over).
    pub fn next(&mut self, budget_ms: &mut u32) -> Option<Step> {
        loop {
            let spent = self.wait_ms.min(*budget_ms);
            self.wait_ms -= spent;
            *budget_ms -= spent;
            if self.wait_ms > 0 {
                return None;
            }

            match self.queue.pop_front()? {
                Step::Pause(ms) => self.wait_ms = ms,
                step => return Some(step),
            }
        }
    }

    /// Next non-pause step, skipping every pending pause.
    pub fn next_immediate(&mut self) -> Option<Step> {
        self.wait_ms = 0;
        loop {
            match self.queue.pop_front()? {
                Step::Pause(_) => continue,
                step => return Some(step),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pauses_consume_budget_and_carry_over() {
        let mut scheduler = Scheduler::new();
        scheduler.extend([Step::Pause(50), Step::Collapse, Step::Pause(30), Step::Refill]);

        let mut budget = 40;
        assert_eq!(scheduler.next(&mut budget), None);
        assert_eq!(budget, 0);
        assert_eq!(scheduler.pending_wait_ms(), 10);

        let mut budget = 16;
        assert_eq!(scheduler.next(&mut budget), Some(Step::Collapse));
        assert_eq!(budget, 6);
        assert_eq!(scheduler.next(&mut budget), None);
        assert_eq!(scheduler.pending_wait_ms(), 24);

        let mut budget = 100;
        assert_eq!(scheduler.next(&mut budget), Some(Step::Refill));
        assert_eq!(budget, 76);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn zero_pauses_do_not_block() {
        let mut scheduler = Scheduler::new();
        scheduler.extend([Step::Pause(0), Step::Settle]);
        let mut budget = 0;
        assert_eq!(scheduler.next(&mut budget), Some(Step::Settle));
    }

    #[test]
    fn push_front_runs_first() {
        let mut scheduler = Scheduler::new();
        scheduler.push(Step::Redetect);
        scheduler.push_front(Step::Collapse);
        scheduler.push_front(Step::Pause(5));

        assert_eq!(scheduler.next_immediate(), Some(Step::Collapse));
        assert_eq!(scheduler.next_immediate(), Some(Step::Redetect));
        assert_eq!(scheduler.next_immediate(), None);
    }
}
