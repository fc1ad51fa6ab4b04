use thiserror::Error;

use tui_match3_core::{ConfigError, LayoutError};

/// Why a game could not be set up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}
