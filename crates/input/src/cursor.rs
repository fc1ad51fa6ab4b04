//! Board cursor: the cell a swap starts from.

use crate::types::{Direction, Position};

/// Selection cursor clamped to a `width x height` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    width: u8,
    height: u8,
}

impl Cursor {
    /// Cursor at the center of the board.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.clamp(1, i8::MAX as u8);
        let height = height.clamp(1, i8::MAX as u8);
        Self {
            position: Position::new((width / 2) as i8, (height / 2) as i8),
            width,
            height,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move one cell in `dir`. Returns false at the board edge.
    pub fn step(&mut self, dir: Direction) -> bool {
        let next = self.position.offset(dir);
        let inside =
            next.x >= 0 && next.y >= 0 && (next.x as u8) < self.width && (next.y as u8) < self.height;
        if inside {
            self.position = next;
        }
        inside
    }
}
