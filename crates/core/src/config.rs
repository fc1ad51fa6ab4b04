//! Game configuration.
//!
//! Read once when a game is created and never mutated afterwards. Every field has a
//! default, so a partial JSON document is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::piece::{PieceTemplate, TemplateId};
use crate::types::{self, BombColor, PieceColor, PieceKind};

/// Regular piece templates plus the bomb template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub regular: Vec<PieceTemplate>,
    pub bomb: PieceTemplate,
}

impl Palette {
    /// One template per color and a generic bomb.
    pub fn standard() -> Self {
        let regular = PieceColor::ALL
            .iter()
            .enumerate()
            .map(|(i, &color)| PieceTemplate {
                id: TemplateId(i as u16),
                kind: PieceKind::Regular { color },
                score_value: types::DEFAULT_PIECE_SCORE,
            })
            .collect::<Vec<_>>();

        let bomb = PieceTemplate {
            id: TemplateId(regular.len() as u16),
            kind: PieceKind::Bomb {
                color: BombColor::Any,
                blast_radius: types::DEFAULT_BLAST_RADIUS,
            },
            score_value: types::DEFAULT_PIECE_SCORE,
        };

        Self { regular, bomb }
    }

    /// Template that spawns pieces of `kind`. Any bomb kind maps to the bomb template.
    pub fn template_for(&self, kind: &PieceKind) -> Option<&PieceTemplate> {
        match kind {
            PieceKind::Bomb { .. } => Some(&self.bomb),
            PieceKind::Regular { .. } => self.regular.iter().find(|t| t.kind == *kind),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// How many matched pieces it takes to create a bomb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombCreationRule {
    /// Minimum matched pieces, regular and bombs together.
    pub total: usize,
    /// Minimum regular pieces when a bomb was matched too.
    pub regular: usize,
}

impl BombCreationRule {
    /// A match without bombs creates a bomb from this many regular pieces.
    pub fn allows_regular_only(&self, regular: usize) -> bool {
        regular >= self.total
    }

    /// A match with a single bomb creates a new one when both minimums are met.
    pub fn allows_with_bomb(&self, regular: usize, bombs: usize) -> bool {
        regular + bombs >= self.total && regular >= self.regular
    }
}

impl Default for BombCreationRule {
    fn default() -> Self {
        Self {
            total: types::BOMB_CREATION_TOTAL,
            regular: types::BOMB_CREATION_REGULAR,
        }
    }
}

/// All tunables of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u8,
    pub board_height: u8,
    pub gravity_step_delay_ms: u32,
    pub gravity_start_delay_ms: u32,
    pub bomb_blast_delay_ms: u32,
    pub bomb_self_destroy_delay_ms: u32,
    pub swap_settle_ms: u32,
    pub refill_settle_ms: u32,
    /// Displayed score units per second.
    pub score_animation_speed: f32,
    /// Lerp factor per second for piece display positions.
    pub piece_speed: f32,
    /// Rows above its cell at which a spawned piece starts falling.
    pub drop_height: u8,
    pub spawn_retry_limit: u32,
    pub palette: Palette,
    pub bomb_creation: BombCreationRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: types::DEFAULT_BOARD_WIDTH,
            board_height: types::DEFAULT_BOARD_HEIGHT,
            gravity_step_delay_ms: types::GRAVITY_STEP_DELAY_MS,
            gravity_start_delay_ms: types::GRAVITY_START_DELAY_MS,
            bomb_blast_delay_ms: types::BOMB_BLAST_DELAY_MS,
            bomb_self_destroy_delay_ms: types::BOMB_SELF_DESTROY_DELAY_MS,
            swap_settle_ms: types::SWAP_SETTLE_MS,
            refill_settle_ms: types::REFILL_SETTLE_MS,
            score_animation_speed: types::SCORE_ANIMATION_SPEED,
            piece_speed: types::PIECE_SPEED,
            drop_height: types::DROP_HEIGHT,
            spawn_retry_limit: types::SPAWN_RETRY_LIMIT,
            palette: Palette::standard(),
            bomb_creation: BombCreationRule::default(),
        }
    }
}

impl GameConfig {
    /// Same tunables with every delay set to zero (headless runs, tests).
    pub fn instant() -> Self {
        Self {
            gravity_step_delay_ms: 0,
            gravity_start_delay_ms: 0,
            bomb_blast_delay_ms: 0,
            bomb_self_destroy_delay_ms: 0,
            swap_settle_ms: 0,
            refill_settle_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_board(mut self, width: u8, height: u8) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.board_width, self.board_height);
        if width < 3 || height < 3 {
            return Err(ConfigError::BoardTooSmall { width, height });
        }
        if width > i8::MAX as u8 || height > i8::MAX as u8 {
            return Err(ConfigError::BoardTooLarge { width, height });
        }

        if self.palette.regular.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if let Some(index) = self.palette.regular.iter().position(|t| t.kind.is_bomb()) {
            return Err(ConfigError::RegularTemplateIsBomb { index });
        }
        match self.palette.bomb.kind {
            PieceKind::Bomb { blast_radius: 0, .. } => return Err(ConfigError::ZeroBlastRadius),
            PieceKind::Bomb { .. } => {}
            PieceKind::Regular { .. } => return Err(ConfigError::BombTemplateNotBomb),
        }

        let BombCreationRule { total, regular } = self.bomb_creation;
        if regular == 0 || total < regular {
            return Err(ConfigError::InvalidBombThreshold { total, regular });
        }

        Ok(())
    }
}
