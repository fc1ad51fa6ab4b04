//! Piece spawning and pooling.
//!
//! The engine never constructs pieces itself; it asks a [`Spawner`] for one and hands
//! destroyed pieces back. [`PiecePool`] is the default, pool-backed implementation.

use std::collections::HashMap;

use crate::error::PoolError;
use crate::piece::{Piece, PieceId, PieceTemplate, TemplateId};
use crate::types::Position;

/// Creation/release lifecycle of pieces.
pub trait Spawner {
    /// Produce a piece of `template` resting at `position`.
    fn spawn(&mut self, template: &PieceTemplate, position: Position) -> Piece;

    /// Take back a piece that left the board.
    fn release(&mut self, piece: Piece);
}

/// Pool of reusable piece instances, one free list per template.
#[derive(Debug, Default)]
pub struct PiecePool {
    free: HashMap<TemplateId, Vec<Piece>>,
    /// Template each instance was created from.
    origin: HashMap<PieceId, TemplateId>,
    next_id: u32,
    discarded: usize,
}

impl PiecePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `count` idle instances of `template` up front.
    pub fn prewarm(&mut self, template: &PieceTemplate, count: usize) {
        for _ in 0..count {
            let piece = self.create(template, Position::default());
            self.free.entry(template.id).or_default().push(piece);
        }
    }

    fn create(&mut self, template: &PieceTemplate, position: Position) -> Piece {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.origin.insert(id, template.id);
        Piece::new(id, template, position)
    }

    /// Idle instances of `template`.
    pub fn pooled(&self, template: TemplateId) -> usize {
        self.free.get(&template).map_or(0, Vec::len)
    }

    /// Instances ever created by this pool.
    pub fn created(&self) -> usize {
        self.origin.len()
    }

    /// Released pieces this pool did not recognize and dropped.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

impl Spawner for PiecePool {
    fn spawn(&mut self, template: &PieceTemplate, position: Position) -> Piece {
        match self.free.get_mut(&template.id).and_then(Vec::pop) {
            Some(mut piece) => {
                piece.reset(template, position);
                piece
            }
            None => self.create(template, position),
        }
    }

    fn release(&mut self, piece: Piece) {
        match self.origin.get(&piece.id) {
            Some(&template) => self.free.entry(template).or_default().push(piece),
            None => {
                // Unknown origin: drop it rather than pool it under the wrong template.
                log::warn!("{}", PoolError::UnknownInstance { id: piece.id });
                self.discarded += 1;
            }
        }
    }
}
