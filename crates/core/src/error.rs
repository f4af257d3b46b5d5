//! Error types for level construction, turn stepping, and configuration loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Pos;

/// Failures raised by the simulation core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A free floor tile was required but every floor tile is occupied.
    #[error("no free floor tile left on the board")]
    NoFreeTile,

    /// The movement selector produced a cell outside the board.
    #[error("movement selected out-of-bounds cell {pos:?} from {from:?}")]
    OutOfBoundsSelection { from: Pos, pos: Pos },

    /// The board has no floor cell that could hold the exit.
    #[error("no floor cell can hold the exit")]
    NoExitCandidate,

    /// A manual move targeted a wall or a cell outside the board.
    #[error("manual move to {pos:?} is not a walkable cell")]
    InvalidManualMove { pos: Pos },

    /// Manual input arrived while the turn timer drives the player.
    #[error("manual movement is disabled while automatic movement is active")]
    AutoMovementActive,
}

/// Failures raised while reading a [`crate::config::SimConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
