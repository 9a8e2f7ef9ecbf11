//! In-memory record store.

use super::RecordStore;
use crate::error::Result;
use crate::record::Record;
use async_trait::async_trait;
use docmeta_extract::models::Metadata;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;

/// In-memory record store.
///
/// Records are kept in insertion order in a `Vec` behind a [`RwLock`], so all
/// trait methods can operate on `&self` without external synchronisation.
/// Everything is lost when the process exits.
///
/// # Examples
///
/// ```
/// use docmeta_extract::models::Metadata;
/// use docmeta_store::{MemoryStore, RecordStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::default();
/// let record = store.insert(&Metadata::new("report.pdf")).await?;
/// assert_eq!(record.id, 1);
/// # Ok(())
/// # }
/// ```
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    /// Create a store pre-populated with records, in the given insertion order.
    ///
    /// New records continue numbering after the highest seeded id.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        Self { records: RwLock::new(records.into_iter().collect()) }
    }

    /// A store seeded with a handful of sample records of assorted file types,
    /// created between a day and an hour ago.
    pub fn demo() -> Self {
        let now = OffsetDateTime::now_utc();
        let sample = |id: i64, filename: &str, filetype: &str, age: Duration| {
            Record::new(id, now - age, Metadata::new(filename).with_filetype(filetype))
        };
        Self::with_records([
            sample(1, "document_2024.pdf", ".pdf", Duration::days(1)),
            sample(2, "image_001.jpg", ".jpeg", Duration::hours(12)),
            sample(3, "report_2024.mp3", ".mp3", Duration::hours(6)),
            sample(4, "presentation.tar", ".tar", Duration::hours(3)),
            sample(5, "archive.torrent", ".torrent", Duration::hours(1)),
        ])
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_records([])
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&self, metadata: &Metadata) -> Result<Record> {
        // Id assignment and the append happen under the same write lock.
        let mut guard = self.records.write().await;
        let id = guard.iter().map(|record| record.id).max().unwrap_or(0) + 1;
        let record = Record::new(id, OffsetDateTime::now_utc(), metadata.clone());
        guard.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<Record>> {
        Ok(self.records.read().await.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_continue_after_seeded_maximum() {
        let store = MemoryStore::with_records([Record::new(
            41,
            OffsetDateTime::now_utc(),
            Metadata::new("seeded.pdf"),
        )]);
        let record = store.insert(&Metadata::new("next.pdf")).await.unwrap();
        assert_eq!(record.id, 42);
    }

    #[tokio::test]
    async fn test_demo_records() {
        let store = MemoryStore::demo();
        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].metadata.filename, "archive.torrent");
        assert!(records.windows(2).all(|pair| pair[0].created_at > pair[1].created_at));
        assert_eq!(store.insert(&Metadata::new("new.pdf")).await.unwrap().id, 6);
    }
}
