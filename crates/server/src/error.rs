//! Error types for the server: startup failures (`exn`), and request
//! failures ([`ApiError`]) with their mapping onto HTTP responses.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error};
use docmeta_extract::error::ErrorKind as ExtractErrorKind;
use docmeta_library::error::{Error as LibraryError, ErrorKind as LibraryErrorKind};
use serde::{Deserialize, Serialize};

/// A startup or shutdown failure.
pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("failed to set up the metadata service client")]
    Client,
    #[display("failed to open the record store")]
    Store,
    #[display("failed to bind to {_0}")]
    Bind(#[error(not(source))] String),
    #[display("server terminated unexpectedly")]
    Serve,
}

impl ErrorKind {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Bind(_))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A failed request.
///
/// Each variant maps to exactly one status code and one error code.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display("{_0}")]
    BadRequest(String),
    #[display("{_0}")]
    PayloadTooLarge(String),
    #[display("{_0}")]
    NotFound(String),
    /// Holds the filename of the existing record.
    #[display("a similar file is already stored: {_0}")]
    Conflict(String),
    #[display("{_0}")]
    Extract(ExtractErrorKind),
    #[display("record store operation failed")]
    Storage,
    #[display("failed to write snapshot")]
    Snapshot,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Extract(_) | Self::Storage | Self::Snapshot => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "VALIDATION_ERROR",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Extract(ExtractErrorKind::Transport(_)) => "TRANSPORT_ERROR",
            Self::Extract(ExtractErrorKind::EmptyResponse) => "EMPTY_RESPONSE",
            Self::Extract(ExtractErrorKind::MetadataNotFound) => "METADATA_NOT_FOUND",
            Self::Extract(ExtractErrorKind::Parse) => "PARSE_ERROR",
            Self::Extract(ExtractErrorKind::Io) => "INTERNAL_ERROR",
            Self::Storage => "STORAGE_ERROR",
            Self::Snapshot => "SNAPSHOT_ERROR",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Conflict(filename) => Some(serde_json::json!({ "filename": filename })),
            _ => None,
        }
    }
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        // The full error tree (with locations) only goes to the log.
        tracing::error!(error = ?err, retryable = err.is_retryable(), "Request failed");
        match &*err {
            LibraryErrorKind::Extract(kind) => Self::Extract(kind.clone()),
            LibraryErrorKind::Store => Self::Storage,
            LibraryErrorKind::Snapshot => Self::Snapshot,
        }
    }
}

impl ApiError {
    /// Classify a failed request body by the status axum assigned to it;
    /// anything other than an oversized body is a malformed request.
    fn from_body_error(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(message)
        } else {
            Self::BadRequest(message)
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::from_body_error(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::from_body_error(err.status(), err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        (self.status_code(), Json(body)).into_response()
    }
}
