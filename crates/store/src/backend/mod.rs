//! Record store trait and implementations.
//!
//! Two interchangeable backends share the [`RecordStore`] contract: a SQLite
//! table ([`SqliteStore`]) and a per-process list ([`MemoryStore`]).

mod memory;
mod sqlite;

pub use self::memory::MemoryStore;
pub use self::sqlite::SqliteStore;
use crate::error::Result;
use crate::record::Record;
use async_trait::async_trait;
use docmeta_extract::models::Metadata;

/// Unified interface for record stores.
///
/// Records are append-only: there is no update or delete.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Name of the backend (used for logging only).
    fn name(&self) -> &str;

    /// Persist a new record.
    ///
    /// Assigns the next identifier and the creation timestamp, and returns the
    /// stored record. Identifier assignment is atomic: two concurrent inserts
    /// never receive the same id, and ids only ever increase.
    async fn insert(&self, metadata: &Metadata) -> Result<Record>;

    /// All records, most recently created first.
    ///
    /// Records created within the same second are ordered by descending id.
    async fn list_all(&self) -> Result<Vec<Record>>;
}
