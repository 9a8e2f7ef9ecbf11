use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use docmeta_extract::Upload;
use docmeta_library::Ingest;
use docmeta_store::Record;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::sync::Arc;

/// Multipart field holding the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub filetype: Option<String>,
}

/// A freshly stored record and where its snapshot was written.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParsedRecord {
    #[serde(flatten)]
    pub record: Record,
    pub saved_file_path: String,
}

/// List stored records, most recent first.
///
/// A non-empty `filetype` filter that matches nothing is a 404, not an empty
/// list.
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Record>>> {
    let filetype = params.filetype.as_deref();
    let records = state.pipeline.list(filetype).await?;
    match filetype {
        Some(filetype) if !filetype.is_empty() && records.is_empty() => {
            Err(ApiError::NotFound(format!("no records with file type '{filetype}'")))
        },
        _ => Ok(Json(records)),
    }
}

/// Extract metadata from an uploaded document and store it.
pub async fn parse_record(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ParsedRecord>> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let contents = field.bytes().await?;
        tracing::debug!(filename, bytes = contents.len(), "Upload received");

        return match state.pipeline.ingest(Upload::stream(filename, Cursor::new(contents))).await? {
            Ingest::Stored { record, snapshot } => {
                Ok(Json(ParsedRecord { record, saved_file_path: snapshot.display().to_string() }))
            },
            Ingest::Conflict(existing) => Err(ApiError::Conflict(existing.metadata.filename)),
        };
    }
    Err(ApiError::BadRequest(format!("missing multipart field '{UPLOAD_FIELD}'")))
}
