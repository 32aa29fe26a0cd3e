//! Error types for the neurogym core library.

use thiserror::Error;

use crate::types::ModuleKind;

/// Top-level error type for all core operations.
#[derive(Error, Debug)]
pub enum TrainError {
    /// The difficulty parameter is outside the range the module accepts.
    #[error("Invalid difficulty for {module}: {value} (allowed: {min}..={max})")]
    InvalidDifficulty {
        /// Which training module rejected the parameter.
        module: ModuleKind,
        /// The rejected value.
        value: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// A rule set produced no round items; such a session must never exist.
    #[error("Session for {0} would contain zero round items")]
    EmptySession(ModuleKind),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// SQLite record-store error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, TrainError>;
