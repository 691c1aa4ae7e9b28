//! Error types for typescanlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering input types
#[derive(Error, Debug)]
pub enum TypescanError {
    /// No enabled strategy produced a single type
    #[error("no input types found")]
    EmptyDiscovery,

    /// A named symbol could not be loaded
    #[error("failed to resolve type '{name}': {reason}")]
    Resolution { name: String, reason: String },

    /// The symbol scanner failed to enumerate the program's symbols
    #[error("failed to enumerate symbols: {0}")]
    Enumeration(String),

    /// Invalid filesystem glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed registry document
    #[error("invalid registry: {0}")]
    Registry(String),

    /// Malformed settings document
    #[error("invalid settings: {0}")]
    Settings(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TypescanError {
    /// Build a resolution error for `name`.
    pub fn resolution(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
