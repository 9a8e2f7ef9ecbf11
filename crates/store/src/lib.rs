//! Persistence of extracted document metadata.
//!
//! The store exclusively owns the canonical collection of [`Record`]s; every
//! caller gets clones. Two interchangeable backends implement [`RecordStore`]:
//!
//! - [`SqliteStore`]: the `metadata_records` table of a SQLite [`Database`],
//!   whose schema is brought up to date on connect.
//! - [`MemoryStore`]: a per-process list, reset on restart.
//!
//! Both list records most recently created first.

mod backend;
mod db;
pub mod error;
mod record;
mod row;

pub use crate::backend::{MemoryStore, RecordStore, SqliteStore};
pub use crate::db::Database;
pub use crate::record::Record;
use std::sync::Arc;

pub type StoreHandle = Arc<dyn RecordStore + Send + Sync>;
