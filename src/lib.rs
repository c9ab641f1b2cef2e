//! vxcore - Configuration and session state for the vx desktop application.
//!
//! This library resolves where configuration lives on each platform, loads
//! and merges the layered JSON configuration, and persists session state.
//! The `vxc` binary is a thin CLI over the same API.

pub mod cli;
pub mod commands;
pub mod config;
pub mod paths;

use std::path::{Path, PathBuf};


/// Library-level error type for vxcore operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[source] serde_json::Error),

    #[error("Not initialized: config paths could not be resolved")]
    NotInitialized,

    #[error("Config migration failed: {0}")]
    Migration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Classification of this error without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::JsonParse { .. } => ErrorKind::JsonParse,
            Error::JsonSerialize(_) => ErrorKind::JsonSerialize,
            Error::NotInitialized => ErrorKind::NotInitialized,
            Error::Migration(_) => ErrorKind::Migration,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Error classes reported across the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    JsonParse,
    JsonSerialize,
    NotInitialized,
    Migration,
    InvalidInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Io => "io",
            ErrorKind::JsonParse => "json_parse",
            ErrorKind::JsonSerialize => "json_serialize",
            ErrorKind::NotInitialized => "not_initialized",
            ErrorKind::Migration => "migration",
            ErrorKind::InvalidInput => "invalid_input",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result type alias for vxcore operations.
pub type Result<T> = std::result::Result<T, Error>;
