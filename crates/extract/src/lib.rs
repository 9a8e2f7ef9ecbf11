//! Document metadata extraction through a remote metadata service.
//!
//! The remote service accepts a file upload and answers with an HTML page
//! describing it, with its findings printed as `label: value` lines inside a
//! `<pre>` block. This crate covers the whole round trip:
//!
//! - [`Upload`]: a file on disk, or an upload stream that gets materialized
//!   into a temporary file (removed again on every exit path),
//! - [`MetadataService`]: submission of the file ([`SuipClient`] over HTTPS),
//! - [`Extractor`]: locating the metadata block and projecting it onto the
//!   fixed [`Metadata`](models::Metadata) field set.

mod client;
mod consts;
pub mod error;
mod extract;
pub mod models;
mod parse;
mod upload;

use tracing::instrument;

pub use crate::client::{ClientOptions, MetadataService, ServiceHandle, SuipClient};
pub use crate::consts::{DEFAULT_SERVICE_URL, DEFAULT_UPLOAD_FIELD};
use crate::error::Result;
pub use crate::extract::Extractor;
use crate::models::Metadata;
pub use crate::parse::Fields;
pub use crate::upload::Upload;

/// Easy, top-level entrypoint: submit an [`Upload`] to the remote service and
/// extract [`Metadata`] from its answer.
///
/// The filename of the upload always wins over whatever name the remote
/// service reports (it only ever sees temporary copies of streams).
#[instrument(skip_all, fields(service = service.name(), filename = %upload.filename()))]
pub async fn extract(service: &dyn MetadataService, upload: Upload) -> Result<Metadata> {
    let upload = upload.materialize().await?;
    let body = service.submit(&upload.path, &upload.filename).await?;
    let metadata = Extractor::from_response(&body)?.metadata(Some(&upload.filename))?;
    tracing::info!(filetype = metadata.filetype(), "Metadata extracted");
    Ok(metadata)
}
