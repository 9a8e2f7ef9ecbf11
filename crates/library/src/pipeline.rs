use crate::dedup::find_conflict;
use crate::error::{ErrorKind, Result};
use crate::filter::filter_by_filetype;
use crate::snapshot::SnapshotWriter;
use docmeta_extract::{ServiceHandle, Upload};
use docmeta_store::{Record, StoreHandle};
use exn::ResultExt;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::instrument;

/// Outcome of a successful [`Pipeline::ingest`].
#[derive(Debug, Clone, PartialEq)]
pub enum Ingest {
    /// The metadata was new: it has been stored, and a snapshot written.
    Stored { record: Record, snapshot: PathBuf },
    /// A duplicate of an existing record; nothing was stored. Holds the
    /// existing record that conflicted.
    Conflict(Record),
}

/// Ties the remote metadata service, the record store and the snapshot
/// writer together.
///
/// Ingestion of two duplicates racing each other stores exactly one of them:
/// the duplicate check and the insert happen under a single lock. Extraction
/// itself (the slow part) runs outside of it.
pub struct Pipeline {
    service: ServiceHandle,
    store: StoreHandle,
    snapshots: SnapshotWriter,
    insert_lock: Mutex<()>,
}

impl Pipeline {
    pub fn new(service: ServiceHandle, store: StoreHandle, snapshots: SnapshotWriter) -> Self {
        Self { service, store, snapshots, insert_lock: Mutex::new(()) }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Extract metadata from `upload`, then store it unless it duplicates an
    /// existing record.
    ///
    /// The snapshot is written after the record has been stored; if writing
    /// it fails, the record stays stored and an [`ErrorKind::Snapshot`] is
    /// returned.
    #[instrument(skip_all, fields(filename = %upload.filename()))]
    pub async fn ingest(&self, upload: Upload) -> Result<Ingest> {
        let metadata = docmeta_extract::extract(self.service.as_ref(), upload).await.map_err(ErrorKind::extract)?;

        let record = {
            let _guard = self.insert_lock.lock().await;
            let existing = self.store.list_all().await.or_raise(|| ErrorKind::Store)?;
            if let Some(conflict) = find_conflict(&existing, &metadata) {
                tracing::info!(existing = conflict.id, "Duplicate of an existing record, not storing");
                return Ok(Ingest::Conflict(conflict.clone()));
            }
            self.store.insert(&metadata).await.or_raise(|| ErrorKind::Store)?
        };
        tracing::info!(id = record.id, store = self.store.name(), "Record stored");

        let snapshot = self.snapshots.write(&record).await?;
        Ok(Ingest::Stored { record, snapshot })
    }

    /// All stored records, most recent first, optionally narrowed down to
    /// those whose filetype contains `filetype` (ignoring case).
    #[instrument(skip(self))]
    pub async fn list(&self, filetype: Option<&str>) -> Result<Vec<Record>> {
        let records = self.store.list_all().await.or_raise(|| ErrorKind::Store)?;
        Ok(match filetype {
            Some(filetype) => filter_by_filetype(records, filetype),
            None => records,
        })
    }
}
