//! Client Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! These errors never cross the public provider surface: every provider
//! operation collapses failure into absence after logging. The structured
//! kinds exist so the log line can say *what* failed (transport, status,
//! decode) with enough context to diagnose.

use derive_more::{Display, Error};

/// A client error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[display("transport error: {_0}")]
    Transport(#[error(not(source))] String),
    /// The upstream answered with a non-success status code.
    #[display("upstream returned status {status}")]
    Status {
        status: u16,
        /// Raw response body, kept for the log line.
        body: String,
    },
    /// The response body could not be decoded into the expected shape.
    #[display("failed to decode response: {_0}")]
    Decode(#[error(not(source))] String),
    /// The request body could not be serialized.
    #[display("failed to encode request body: {_0}")]
    Encode(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) | Self::Encode(_) => false,
        }
    }
}
