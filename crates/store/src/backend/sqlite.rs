use super::RecordStore;
use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::record::Record;
use crate::row::RecordRow;
use async_trait::async_trait;
use docmeta_extract::models::Metadata;
use exn::ResultExt;
use sqlx::SqlitePool;
use tracing::instrument;

/// Record store backed by the `metadata_records` table.
///
/// Identifiers come from SQLite's `AUTOINCREMENT` (never reused, even after
/// the highest row is gone) and the timestamp from the column default, both
/// assigned within a single `INSERT ... RETURNING` statement.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl From<&Database> for SqliteStore {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    #[instrument(skip_all, fields(filename = %metadata.filename))]
    async fn insert(&self, metadata: &Metadata) -> Result<Record> {
        let row: RecordRow = sqlx::query_as(include_str!("../../queries/insert_record.sql"))
            .bind(&metadata.filename)
            .bind(&metadata.catalog)
            .bind(&metadata.size_file)
            .bind(&metadata.date_edited_file)
            .bind(&metadata.date_access_file)
            .bind(&metadata.date_update_index_file)
            .bind(&metadata.resolution_file)
            .bind(&metadata.extension_file)
            .bind(&metadata.filetype)
            .bind(&metadata.mime_type)
            .bind(&metadata.version_file)
            .bind(&metadata.page_count)
            .bind(&metadata.creator)
            .bind(&metadata.producer)
            .bind(&metadata.date_digitization)
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let record = Record::try_from(row)?;
        tracing::debug!(id = record.id, "Record inserted");
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<Record>> {
        let rows: Vec<RecordRow> = sqlx::query_as(include_str!("../../queries/list_records.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(Record::try_from).collect()
    }
}
