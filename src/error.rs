//! Error types for the HBnB console.
//!
//! Defines the application error enum used outside the command layer. Command
//! diagnostics shown to the user live in [`crate::commands::CommandError`].

use thiserror::Error;

/// Main error type for console operations.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Object store errors (unreadable or corrupt store file, failed save, etc.)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors (invalid config file, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    /// Creates a storage error with the given message.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Storage(_) => "Storage Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
        }
    }
}

/// Result type alias using ConsoleError.
pub type Result<T> = std::result::Result<T, ConsoleError>;
