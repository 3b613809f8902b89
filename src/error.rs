//! Error types for the scenegen crate

use rig::completion::CompletionError;
use thiserror::Error;

/// Result type for scenegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for scenegen operations
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying completion model failed
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
