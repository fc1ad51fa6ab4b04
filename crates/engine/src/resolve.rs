//! Resolution planning - what a match set destroys and creates
//!
//! [`plan_resolution`] reads the grid's current match set and turns it into the
//! destruction half of a cycle as a list of [`Step`]s. Gravity, refill and
//! re-detection are appended by the game after the plan.
//!
//! # Rules
//!
//! | Matched bombs | Destruction | New bomb |
//! |---|---|---|
//! | 0 | every regular match | when `regular >= total` |
//! | 1 | regular matches, then blast square, then the bomb | when `regular + bombs >= total` and `regular >= regular_min` |
//! | 2+ | regular matches, then the whole board | never |
//!
//! The bomb source is always the first matched regular piece. Its cell is spared by
//! every destruction step and receives the new bomb at the end.

use tui_match3_core::{GameConfig, Grid, PieceRef};
use tui_match3_types::Position;

use crate::scheduler::{BombReservation, Step};

/// The destruction steps for one match set, plus what went into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPlan {
    pub steps: Vec<Step>,
    pub reserved: Option<BombReservation>,
    pub regular: usize,
    pub bombs: usize,
}

impl ResolutionPlan {
    pub fn is_double_bomb(&self) -> bool {
        self.bombs >= 2
    }

    pub fn is_empty(&self) -> bool {
        self.regular == 0 && self.bombs == 0
    }
}

/// Plan the destruction of the grid's current match set.
pub fn plan_resolution(grid: &Grid, config: &GameConfig) -> ResolutionPlan {
    let mut regular: Vec<PieceRef> = Vec::new();
    let mut bombs: Vec<(PieceRef, u8)> = Vec::new();
    for &handle in grid.current_matches() {
        let Some(piece) = grid.resolve(handle) else {
            continue;
        };
        match piece.kind.blast_radius() {
            Some(radius) => bombs.push((handle, radius)),
            None => regular.push(handle),
        }
    }

    let rule = config.bomb_creation;
    let double_bomb = bombs.len() >= 2;
    let wants_bomb = if bombs.is_empty() {
        rule.allows_regular_only(regular.len())
    } else {
        !double_bomb && rule.allows_with_bomb(regular.len(), bombs.len())
    };

    let reserved = regular
        .first()
        .filter(|_| wants_bomb)
        .and_then(|source| {
            let piece = grid.resolve(*source)?;
            Some(BombReservation {
                at: source.position,
                color: piece.kind.logical_color(),
            })
        });
    let spare: Option<Position> = reserved.map(|r| r.at);

    let mut steps = Vec::new();
    let doomed: Vec<PieceRef> = regular
        .iter()
        .copied()
        .filter(|handle| Some(handle.position) != spare)
        .collect();
    if !doomed.is_empty() {
        steps.push(Step::Destroy(doomed));
    }

    if double_bomb {
        steps.push(Step::Pause(config.bomb_blast_delay_ms));
        steps.push(Step::ClearBoard);
    } else {
        for &(bomb, radius) in &bombs {
            steps.push(Step::Pause(config.bomb_blast_delay_ms));
            steps.push(Step::Blast {
                center: bomb.position,
                radius,
                spare,
            });
            steps.push(Step::Pause(config.bomb_self_destroy_delay_ms));
            steps.push(Step::Destroy(vec![bomb]));
        }
    }

    if let Some(reservation) = reserved {
        steps.push(Step::CreateBomb(reservation));
    }

    ResolutionPlan {
        steps,
        reserved,
        regular: regular.len(),
        bombs: bombs.len(),
    }
}
