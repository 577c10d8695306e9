//! Error types for the Agora simulation
//!
//! Provides a unified error type covering construction, strategy lookup,
//! and internal consistency failures

use thiserror::Error;

/// Result type alias using AgoraError
pub type Result<T> = std::result::Result<T, AgoraError>;

/// Unified error type for Agora operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgoraError {
    /// Malformed construction parameters. Fatal for the construction call only.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Unknown strategy tag. Means the strategy set and its callers disagree.
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// Internal invariant broken during a round. The round is abandoned.
    #[error("Consistency violation: {0}")]
    Consistency(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AgoraError {
    /// Shorthand for configuration errors
    pub fn config(msg: impl Into<String>) -> Self {
        AgoraError::InvalidConfiguration(msg.into())
    }

    /// Whether the error is a programming-error class failure
    pub fn is_fatal(&self) -> bool {
        matches!(self, AgoraError::InvalidStrategy(_) | AgoraError::Consistency(_))
    }
}

impl From<serde_json::Error> for AgoraError {
    fn from(err: serde_json::Error) -> Self {
        AgoraError::Serialization(err.to_string())
    }
}
