//! Error types for rp-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for rp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for rp-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Object could not be resolved to a kind, group and name
    #[error("Decode error: {0}")]
    Decode(String),

    /// Resource not found in the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists in the store
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Decode(_) => 2, // UsageError
            Error::NotFound(_) => 5,                  // NotFound
            Error::AlreadyExists(_) => 6,             // Conflict
            _ => 1,                                   // GeneralError
        }
    }
}
