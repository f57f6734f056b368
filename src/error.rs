//! Error types for EchoMind

use thiserror::Error;

/// Main error type for the journal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JournalError {
    /// Emotion label outside the fixed set
    #[error("Unknown emotion: {0}")]
    UnknownEmotion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JournalError>;
