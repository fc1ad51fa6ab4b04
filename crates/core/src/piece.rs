//! Pieces, piece handles and spawn templates.

use serde::{Deserialize, Serialize};

use crate::types::{BombColor, PieceKind, Position};

/// Identity of a live piece instance (assigned by the spawner, stable while pooled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// Identity of a palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(pub u16);

/// A palette entry the spawner instantiates pieces from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceTemplate {
    pub id: TemplateId,
    pub kind: PieceKind,
    pub score_value: u32,
}

/// Non-owning reference to a piece on the board.
///
/// Only valid while the cell at `position` still holds the piece `id`;
/// see [`Grid::resolve`](crate::grid::Grid::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRef {
    pub id: PieceId,
    pub position: Position,
}

/// On-screen position in cell units, eased towards the logical position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayPos {
    pub x: f32,
    pub y: f32,
}

/// Distance under which an easing piece snaps onto its cell.
const SNAP_THRESHOLD: f32 = 0.01;

/// A live piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub id: PieceId,
    pub template: TemplateId,
    pub kind: PieceKind,
    /// Logical cell. Kept in sync by every grid mutation.
    pub position: Position,
    /// Set by the last detection pass, cleared at the start of the next one.
    pub is_matched: bool,
    pub score_value: u32,
    pub display: DisplayPos,
}

impl Piece {
    /// Create a piece resting on its cell.
    pub fn new(id: PieceId, template: &PieceTemplate, position: Position) -> Self {
        Self {
            id,
            template: template.id,
            kind: template.kind,
            position,
            is_matched: false,
            score_value: template.score_value,
            display: DisplayPos {
                x: position.x as f32,
                y: position.y as f32,
            },
        }
    }

    /// Reinitialize a pooled instance for reuse.
    pub fn reset(&mut self, template: &PieceTemplate, position: Position) {
        let id = self.id;
        *self = Self::new(id, template, position);
    }

    pub fn handle(&self) -> PieceRef {
        PieceRef {
            id: self.id,
            position: self.position,
        }
    }

    pub fn is_bomb(&self) -> bool {
        self.kind.is_bomb()
    }

    /// Change a bomb's logical color. No effect on regular pieces.
    pub fn set_bomb_color(&mut self, bomb_color: BombColor) {
        if let PieceKind::Bomb { color, .. } = &mut self.kind {
            *color = bomb_color;
        }
    }

    /// Whether the display position has reached the logical cell.
    pub fn is_settled(&self) -> bool {
        self.display.x == self.position.x as f32 && self.display.y == self.position.y as f32
    }

    /// Move the display position towards the logical cell.
    ///
    /// `factor` is the lerp fraction for this step (clamped to 1.0).
    pub fn ease(&mut self, factor: f32) {
        let tx = self.position.x as f32;
        let ty = self.position.y as f32;
        let dx = tx - self.display.x;
        let dy = ty - self.display.y;

        if dx * dx + dy * dy > SNAP_THRESHOLD * SNAP_THRESHOLD {
            let t = factor.clamp(0.0, 1.0);
            self.display.x += dx * t;
            self.display.y += dy * t;
        } else {
            self.display = DisplayPos { x: tx, y: ty };
        }
    }

    /// Put the display position directly onto the logical cell.
    pub fn snap(&mut self) {
        self.display = DisplayPos {
            x: self.position.x as f32,
            y: self.position.y as f32,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceColor;

    fn red() -> PieceTemplate {
        PieceTemplate {
            id: TemplateId(2),
            kind: PieceKind::Regular {
                color: PieceColor::Red,
            },
            score_value: 10,
        }
    }

    #[test]
    fn ease_converges_and_snaps() {
        let mut piece = Piece::new(PieceId(1), &red(), Position::new(2, 0));
        piece.display.y = 3.0;

        for _ in 0..200 {
            piece.ease(0.2);
        }
        assert!(piece.is_settled());
        assert_eq!(piece.display, DisplayPos { x: 2.0, y: 0.0 });
    }

    #[test]
    fn reset_keeps_identity() {
        let mut piece = Piece::new(PieceId(7), &red(), Position::new(0, 0));
        piece.is_matched = true;
        piece.reset(&red(), Position::new(4, 4));
        assert_eq!(piece.id, PieceId(7));
        assert!(!piece.is_matched);
        assert_eq!(piece.position, Position::new(4, 4));
    }

    #[test]
    fn set_bomb_color_ignores_regular_pieces() {
        let mut piece = Piece::new(PieceId(1), &red(), Position::new(0, 0));
        piece.set_bomb_color(BombColor::Any);
        assert_eq!(piece.kind, red().kind);
    }
}
