//! Read-only view of a game for renderers and tooling.
//!
//! The host keeps one snapshot and refreshes it every frame with
//! `Game::snapshot_into`, so the cell buffer is allocated once.

use serde::Serialize;

use crate::grid::Grid;
use crate::types::{PieceKind, TurnState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellSnapshot {
    pub kind: PieceKind,
    pub matched: bool,
    pub display_x: f32,
    pub display_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major, `y * width + x`, row 0 at the bottom.
    pub cells: Vec<Option<CellSnapshot>>,
    pub score: u32,
    pub displayed_score: f32,
    pub state: TurnState,
    pub cascade: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.score = 0;
        self.displayed_score = 0.0;
        self.state = TurnState::Move;
        self.cascade = 0;
        self.seed = 0;
    }

    /// Copy the board into `self.cells`, reusing the allocation.
    pub fn write_grid(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.height = grid.height();
        self.cells.clear();
        self.cells
            .resize(grid.width() as usize * grid.height() as usize, None);

        for piece in grid.pieces() {
            let idx = piece.position.y as usize * grid.width() as usize + piece.position.x as usize;
            self.cells[idx] = Some(CellSnapshot {
                kind: piece.kind,
                matched: piece.is_matched,
                display_x: piece.display.x,
                display_y: piece.display.y,
            });
        }
    }

    pub fn cell(&self, x: u8, y: u8) -> Option<&CellSnapshot> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize].as_ref()
    }

    pub fn accepting_input(&self) -> bool {
        self.state == TurnState::Move
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            score: 0,
            displayed_score: 0.0,
            state: TurnState::Move,
            cascade: 0,
            seed: 0,
        }
    }
}
