//! Grid module - owns the pieces and all match-detection geometry
//!
//! The grid is a `width x height` matrix of optional pieces stored in a flat array,
//! row-major (`y * width + x`). Row 0 is the bottom row.
//!
//! Besides the cells the grid holds the **current match set**: the pieces flagged by
//! the last [`Grid::find_all_matches`] pass, in discovery order and without duplicates.
//! A piece's `is_matched` flag and its membership in the set always agree.

use arrayvec::ArrayVec;

use crate::error::GridError;
use crate::piece::{Piece, PieceId, PieceRef};
use crate::rules::{bomb_interacts, in_same_match_group};
use crate::types::{Direction, PieceKind, Position};

/// One relocation performed by gravity compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallMove {
    pub id: PieceId,
    pub from: Position,
    pub to: Position,
}

/// The game grid
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<Piece>>,
    current_matches: Vec<PieceRef>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Dimensions are clamped to 127 so every cell is addressable with `i8`
    /// coordinates; [`GameConfig::validate`](crate::config::GameConfig::validate)
    /// rejects larger boards up front.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.min(i8::MAX as u8);
        let height = height.min(i8::MAX as u8);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            current_matches: Vec::new(),
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check if a position lies on the board
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u8) < self.width && (pos.y as u8) < self.height
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Index for a caller-supplied position. Off-board access is a programmer error.
    fn checked_index(&self, pos: Position) -> Option<usize> {
        let idx = self.index(pos);
        if idx.is_none() {
            let err = GridError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            };
            debug_assert!(false, "{err}");
            log::error!("{err}");
        }
        idx
    }

    /// Lenient lookup for neighbor probing: off-board reads as empty.
    #[inline(always)]
    fn cell(&self, pos: Position) -> Option<&Piece> {
        self.index(pos).and_then(|idx| self.cells[idx].as_ref())
    }

    fn kind_at(&self, pos: Position) -> Option<&PieceKind> {
        self.cell(pos).map(|piece| &piece.kind)
    }

    /// Get the piece at `pos`. An empty cell is `None`, not an error.
    pub fn get(&self, pos: Position) -> Option<&Piece> {
        self.checked_index(pos)
            .and_then(|idx| self.cells[idx].as_ref())
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Piece> {
        self.checked_index(pos)
            .and_then(|idx| self.cells[idx].as_mut())
    }

    /// Place `piece` at `pos`, updating its logical position.
    ///
    /// Returns the piece that is no longer on the board: the previous occupant, or
    /// `piece` itself when `pos` is off the board. Callers hand it back to the spawner.
    pub fn set(&mut self, pos: Position, mut piece: Piece) -> Option<Piece> {
        let Some(idx) = self.checked_index(pos) else {
            return Some(piece);
        };
        piece.position = pos;
        self.cells[idx].replace(piece)
    }

    /// Remove and return the piece at `pos`.
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        self.checked_index(pos)
            .and_then(|idx| self.cells[idx].take())
    }

    /// The piece a handle refers to, if it is still on its cell.
    pub fn resolve(&self, handle: PieceRef) -> Option<&Piece> {
        self.cell(handle.position)
            .filter(|piece| piece.id == handle.id)
    }

    /// Swap two occupied on-board cells. Returns false (and changes nothing) otherwise.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return false;
        };
        if ia == ib || self.cells[ia].is_none() || self.cells[ib].is_none() {
            return false;
        }

        self.cells.swap(ia, ib);
        if let Some(piece) = self.cells[ia].as_mut() {
            piece.position = a;
        }
        if let Some(piece) = self.cells[ib].as_mut() {
            piece.position = b;
        }
        true
    }

    /// All board positions in scan order: column by column, bottom to top.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width as i8, self.height as i8);
        (0..w).flat_map(move |x| (0..h).map(move |y| Position::new(x, y)))
    }

    /// Empty cells in scan order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&pos| self.cell(pos).is_none())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten()
    }

    pub fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.cells.iter_mut().flatten()
    }

    /// Remove every piece from the board.
    pub fn drain(&mut self) -> Vec<Piece> {
        self.current_matches.clear();
        self.cells.iter_mut().filter_map(Option::take).collect()
    }

    /// On-board orthogonal neighbors, in left/right/down/up order.
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        Direction::ALL
            .iter()
            .map(|&dir| pos.offset(dir))
            .filter(|&n| self.contains(n))
            .collect()
    }

    /// Would placing `candidate` at `pos` complete a run of three with the two cells
    /// to its left or the two cells below it?
    ///
    /// Used while filling the board column by column, bottom to top, so the cells to
    /// the right and above are not looked at.
    pub fn matches_at(&self, pos: Position, candidate: &PieceKind) -> bool {
        let run = |d1: Position, d2: Position| {
            self.kind_at(d1).is_some()
                && self.kind_at(d2).is_some()
                && in_same_match_group(Some(candidate), self.kind_at(d1))
                && in_same_match_group(Some(candidate), self.kind_at(d2))
        };

        (pos.x > 1
            && run(
                Position::new(pos.x - 1, pos.y),
                Position::new(pos.x - 2, pos.y),
            ))
            || (pos.y > 1
                && run(
                    Position::new(pos.x, pos.y - 1),
                    Position::new(pos.x, pos.y - 2),
                ))
    }

    /// The match set produced by the last detection pass.
    pub fn current_matches(&self) -> &[PieceRef] {
        &self.current_matches
    }

    pub fn clear_match_flags(&mut self) {
        self.current_matches.clear();
        for piece in self.pieces_mut() {
            piece.is_matched = false;
        }
    }

    /// Flag the piece at `pos` and add it to the match set unless it is already there.
    fn mark(&mut self, pos: Position) {
        let Some(idx) = self.index(pos) else {
            return;
        };
        if let Some(piece) = self.cells[idx].as_mut() {
            if !piece.is_matched {
                piece.is_matched = true;
                self.current_matches.push(piece.handle());
            }
        }
    }

    /// Full-board scan for matches.
    ///
    /// Cells are visited column by column (x outer, y inner). Each occupied cell is
    /// checked as the center of a horizontal and a vertical triple, then matched
    /// pieces next to an interacting bomb pull in that bomb's blast square.
    ///
    /// Calling this twice without mutating the board in between yields the same set.
    pub fn find_all_matches(&mut self) -> &[PieceRef] {
        self.clear_match_flags();

        let mut found: Vec<Position> = Vec::new();
        for pos in self.positions() {
            if self.cell(pos).is_none() {
                continue;
            }
            self.horizontal_match(pos, &mut found);
            self.vertical_match(pos, &mut found);
        }
        for pos in found {
            self.mark(pos);
        }

        self.propagate_bombs();
        &self.current_matches
    }

    fn horizontal_match(&self, center: Position, out: &mut Vec<Position>) {
        if center.x <= 0 || center.x as u8 + 1 >= self.width {
            return;
        }
        let left = Position::new(center.x - 1, center.y);
        let right = Position::new(center.x + 1, center.y);
        self.triple_match(center, right, left, [center, left, right], out);
    }

    fn vertical_match(&self, center: Position, out: &mut Vec<Position>) {
        if center.y <= 0 || center.y as u8 + 1 >= self.height {
            return;
        }
        let below = Position::new(center.x, center.y - 1);
        let above = Position::new(center.x, center.y + 1);
        self.triple_match(center, below, above, [center, above, below], out);
    }

    /// Shared triple check. `first`/`second` are probed in that order for a bomb
    /// pair; a plain triple is recorded in `order`.
    fn triple_match(
        &self,
        center: Position,
        first: Position,
        second: Position,
        order: [Position; 3],
        out: &mut Vec<Position>,
    ) {
        let (Some(c), Some(a), Some(b)) = (self.cell(center), self.cell(first), self.cell(second))
        else {
            return;
        };

        // Two adjacent bombs match as a pair, whatever their colors.
        if c.is_bomb() && a.is_bomb() {
            out.extend([center, first]);
            return;
        }
        if c.is_bomb() && b.is_bomb() {
            out.extend([center, second]);
            return;
        }

        if in_same_match_group(Some(&c.kind), Some(&a.kind))
            && in_same_match_group(Some(&c.kind), Some(&b.kind))
        {
            out.extend(order);
        }
    }

    /// Expand the match set with the blast square of every bomb orthogonally adjacent
    /// to a matched piece it interacts with.
    ///
    /// Only pieces matched before this pass trigger bombs; pieces pulled in by a blast
    /// do not chain further.
    fn propagate_bombs(&mut self) {
        if self.current_matches.is_empty() {
            return;
        }

        let mut blasts: Vec<(Position, u8)> = Vec::new();
        for matched in &self.current_matches {
            let Some(kind) = self.kind_at(matched.position) else {
                continue;
            };
            for n in self.neighbors(matched.position) {
                if let Some(PieceKind::Bomb {
                    color,
                    blast_radius,
                }) = self.kind_at(n)
                {
                    if bomb_interacts(*color, kind) {
                        blasts.push((n, *blast_radius));
                    }
                }
            }
        }

        for (center, radius) in blasts {
            for pos in self.blast_area(center, radius) {
                self.mark(pos);
            }
        }
    }

    /// On-board cells of the `(2r+1)^2` square centered on `center`, x outer, y inner.
    pub fn blast_area(&self, center: Position, radius: u8) -> Vec<Position> {
        let r = radius as i16;
        let (cx, cy) = (center.x as i16, center.y as i16);
        let (w, h) = (self.width as i16, self.height as i16);

        let mut area = Vec::new();
        for x in (cx - r).max(0)..=(cx + r).min(w - 1) {
            for y in (cy - r).max(0)..=(cy + r).min(h - 1) {
                area.push(Position::new(x as i8, y as i8));
            }
        }
        area
    }

    /// Perform the next gravity relocation, if any.
    ///
    /// Scans columns left to right, each bottom to top, counting empty cells; the first
    /// piece found above a gap drops by the gap count. Repeated calls process one full
    /// column before the next, bottom to top within the column.
    pub fn collapse_step(&mut self) -> Option<FallMove> {
        for x in 0..self.width as i8 {
            let mut falling: i8 = 0;
            for y in 0..self.height as i8 {
                let from = Position::new(x, y);
                if self.cell(from).is_none() {
                    falling += 1;
                    continue;
                }
                if falling > 0 {
                    let to = Position::new(x, y - falling);
                    let piece = self.take(from)?;
                    let id = piece.id;
                    self.set(to, piece);
                    return Some(FallMove { id, from, to });
                }
            }
        }
        None
    }

    /// Compact every column at once. Returns the relocations in the order performed.
    pub fn collapse_columns(&mut self) -> Vec<FallMove> {
        let mut moves = Vec::new();
        while let Some(step) = self.collapse_step() {
            moves.push(step);
        }
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{PieceTemplate, TemplateId};
    use crate::types::{BombColor, PieceColor};

    fn template(kind: PieceKind) -> PieceTemplate {
        PieceTemplate {
            id: TemplateId(0),
            kind,
            score_value: 10,
        }
    }

    fn regular(color: PieceColor) -> PieceKind {
        PieceKind::Regular { color }
    }

    fn put(grid: &mut Grid, id: u32, x: i8, y: i8, kind: PieceKind) {
        let pos = Position::new(x, y);
        grid.set(pos, Piece::new(PieceId(id), &template(kind), pos));
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(7, 5);
        assert_eq!(grid.index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index(Position::new(6, 0)), Some(6));
        assert_eq!(grid.index(Position::new(0, 1)), Some(7));
        assert_eq!(grid.index(Position::new(6, 4)), Some(34));
        assert_eq!(grid.index(Position::new(-1, 0)), None);
        assert_eq!(grid.index(Position::new(7, 0)), None);
        assert_eq!(grid.index(Position::new(0, 5)), None);
    }

    #[test]
    fn test_set_updates_position_and_returns_previous() {
        let mut grid = Grid::new(3, 3);
        put(&mut grid, 1, 0, 0, regular(PieceColor::Red));

        let stray = Piece::new(
            PieceId(2),
            &template(regular(PieceColor::Blue)),
            Position::new(2, 2),
        );
        let previous = grid.set(Position::new(0, 0), stray);

        assert_eq!(previous.map(|p| p.id), Some(PieceId(1)));
        let now = grid.get(Position::new(0, 0)).map(|p| (p.id, p.position));
        assert_eq!(now, Some((PieceId(2), Position::new(0, 0))));
    }

    #[test]
    fn test_resolve_rejects_stale_handles() {
        let mut grid = Grid::new(3, 3);
        put(&mut grid, 1, 1, 1, regular(PieceColor::Red));
        let handle = grid.get(Position::new(1, 1)).map(Piece::handle).unwrap();
        assert!(grid.resolve(handle).is_some());

        grid.take(Position::new(1, 1));
        put(&mut grid, 9, 1, 1, regular(PieceColor::Red));
        assert!(grid.resolve(handle).is_none());
    }

    #[test]
    fn test_double_bomb_pair_is_marked_without_third_piece() {
        let mut grid = Grid::new(3, 1);
        let bomb = PieceKind::Bomb {
            color: BombColor::Color(PieceColor::Red),
            blast_radius: 1,
        };
        put(&mut grid, 1, 0, 0, regular(PieceColor::Green));
        put(&mut grid, 2, 1, 0, bomb);
        put(&mut grid, 3, 2, 0, bomb);

        grid.find_all_matches();
        let ids: Vec<u32> = grid.current_matches().iter().map(|r| r.id.0).collect();
        // The pair is found directly, then each bomb sets off the other's blast,
        // which reaches the green piece.
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_blast_area_is_clipped() {
        let grid = Grid::new(4, 4);
        assert_eq!(grid.blast_area(Position::new(0, 0), 1).len(), 4);
        assert_eq!(grid.blast_area(Position::new(1, 1), 1).len(), 9);
        assert_eq!(grid.blast_area(Position::new(3, 0), 2).len(), 9);
    }
}
