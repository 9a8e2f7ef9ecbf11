//! HTTP API for docmeta.
//!
//! - `GET /records?filetype=<filter>`: stored records, most recent first
//! - `POST /records/parse`: multipart upload (field `file`); extracts,
//!   stores and snapshots the document's metadata
//! - `GET /health`: liveness check
//!
//! Failures are answered with `{"error": {"code": ..., "message": ...}}`.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use crate::error::{ApiError, ApiResult};
pub use crate::server::{build_router, start_server};
pub use crate::state::AppState;
