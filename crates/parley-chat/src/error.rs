//! Error types for the chat boundary.

use thiserror::Error;

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors raised while composing, sending, or analyzing messages.
#[derive(Debug, Error)]
pub enum ChatError {
    /// An attachment that is not an image data URL.
    #[error("please select an image file")]
    NotAnImage,

    /// Nothing to analyze.
    #[error("no message to analyze")]
    EmptyText,

    /// The request could not be sent or the body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The service did not answer in time.
    #[error("emotion service timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("emotion service returned HTTP {status}: {message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// The service's error text, if it sent one.
        message: String,
    },

    /// The response did not have the expected shape or values.
    #[error("invalid analysis: {0}")]
    InvalidResponse(String),

    /// Writing a message to its sink failed.
    #[error("failed to send message: {0}")]
    Io(#[from] std::io::Error),
}
