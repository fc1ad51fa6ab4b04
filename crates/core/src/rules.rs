//! Match-group rule: which pieces count as the same color for a run of three.

use crate::types::{BombColor, PieceKind};

/// Whether a bomb of `bomb_color` interacts with `other`.
///
/// - a generic bomb interacts with everything
/// - a colored bomb interacts with generic bombs and bombs of its color
/// - a colored bomb interacts with regular pieces of its color
pub fn bomb_interacts(bomb_color: BombColor, other: &PieceKind) -> bool {
    let BombColor::Color(color) = bomb_color else {
        return true;
    };

    match other {
        PieceKind::Bomb { color: other, .. } => {
            *other == BombColor::Any || *other == BombColor::Color(color)
        }
        PieceKind::Regular { color: other } => *other == color,
    }
}

/// Whether `a` and `b` belong to the same match group.
///
/// The bomb rule is only defined from the bomb's side, so whichever piece is the
/// bomb decides (the first one if both are).
pub fn in_same_match_group(a: Option<&PieceKind>, b: Option<&PieceKind>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };

    match (a, b) {
        (PieceKind::Bomb { color, .. }, other) => bomb_interacts(*color, other),
        (other, PieceKind::Bomb { color, .. }) => bomb_interacts(*color, other),
        (PieceKind::Regular { color: ca }, PieceKind::Regular { color: cb }) => ca == cb,
    }
}
