//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use docmeta_extract::error::{Error as ExtractError, ErrorKind as ExtractErrorKind};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a failure.
///
/// A duplicate upload is *not* an error; see [`Ingest::Conflict`](crate::Ingest::Conflict).
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Submitting the file or reading the remote service's answer failed.
    #[display("extraction failed: {_0}")]
    Extract(ExtractErrorKind),
    /// A record store operation (listing or inserting) failed.
    #[display("record store operation failed")]
    Store,
    /// Writing the snapshot file failed.
    #[display("failed to write snapshot")]
    Snapshot,
}
impl ErrorKind {
    /// Convert an extraction error into a library error, preserving the
    /// extract crate's `Exn` frame (error tree) as a child in its own
    /// error tree.
    #[track_caller]
    pub fn extract(err: ExtractError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Extract(inner))
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Extract(inner) => inner.is_retryable(),
            Self::Store | Self::Snapshot => false,
        }
    }
}
