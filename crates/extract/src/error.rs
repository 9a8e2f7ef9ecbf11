//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote metadata service could not be reached, timed out, or
    /// answered with a non-success status.
    #[display("remote metadata service request failed: {_0}")]
    Transport(#[error(not(source))] String),
    /// The remote service answered, but with an empty body.
    #[display("empty response from remote metadata service")]
    EmptyResponse,
    /// The response did not contain a preformatted metadata block.
    #[display("file metadata not found in response")]
    MetadataNotFound,
    /// The metadata block was present but no `label: value` entries could be read from it.
    #[display("could not extract any metadata fields from response")]
    Parse,
    /// Reading the input file, or materializing an upload to a temporary file, failed.
    #[display("I/O error while preparing upload")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::EmptyResponse)
    }
}
