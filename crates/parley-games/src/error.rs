//! Error types for the game widget.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::VariantId;
use crate::session::Status;

/// Result type for session and catalog lookups.
pub type GameResult<T> = Result<T, GameError>;

/// Result type for catalog loading.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A rejected command. The session is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No variant with this identifier exists in the catalog.
    #[error("game not found: \"{0}\"")]
    NotFound(String),

    /// The operation only applies to a different kind of variant.
    #[error("{0} has no difficulty levels")]
    InvalidVariant(VariantId),

    /// The level is not defined for the selected variant.
    #[error("unknown level \"{level}\" for {variant}")]
    InvalidLevel {
        /// The selected variant.
        variant: VariantId,
        /// The level name that was rejected.
        level: String,
    },

    /// The variant needs a level before it can start.
    #[error("please select a level for {0}")]
    MissingLevel(VariantId),

    /// The command is not valid for the current status or variant.
    #[error("cannot {command} while {status}")]
    InvalidState {
        /// The rejected command.
        command: &'static str,
        /// Status of the session when it was rejected.
        status: Status,
    },

    /// A word-chain guess that is not a letter.
    #[error("not a letter: {0:?}")]
    InvalidLetter(char),

    /// A text command that could not be parsed.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog {path}: {source}")]
    Io {
        /// Path of the catalog file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The catalog is not valid JSON for the catalog schema.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two definitions share a variant identifier.
    #[error("duplicate variant: {0}")]
    DuplicateVariant(VariantId),

    /// A content rule was violated.
    #[error("{variant}: {message}")]
    Invalid {
        /// The offending variant.
        variant: VariantId,
        /// What is wrong with it.
        message: String,
    },
}

impl CatalogError {
    /// Build an [`CatalogError::Invalid`] for a variant.
    pub fn invalid(variant: VariantId, message: impl Into<String>) -> Self {
        Self::Invalid {
            variant,
            message: message.into(),
        }
    }
}
