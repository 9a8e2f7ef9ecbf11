//! Everything that happens to document metadata after extraction: duplicate
//! detection, filtering, JSON snapshots, and the [`Pipeline`] tying those to
//! the remote metadata service and a record store.

mod dedup;
pub mod error;
mod filter;
mod pipeline;
mod snapshot;

pub use crate::dedup::{find_conflict, is_duplicate};
pub use crate::filter::filter_by_filetype;
pub use crate::pipeline::{Ingest, Pipeline};
pub use crate::snapshot::SnapshotWriter;
