use crate::error::{ErrorKind, Result};
use docmeta_config::{Config, StoreBackend};
use docmeta_extract::{ClientOptions, SuipClient};
use docmeta_library::{Pipeline, SnapshotWriter};
use docmeta_store::{Database, MemoryStore, SqliteStore, StoreHandle};
use exn::ResultExt;
use std::sync::Arc;

/// Shared state handed to every request handler.
pub struct AppState {
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Wire up the metadata service client, record store and snapshot writer
    /// described by `config`.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let service = SuipClient::new(ClientOptions {
            url: config.remote.url.clone(),
            field_name: config.remote.field_name.clone(),
            timeout: config.remote.timeout(),
            accept_invalid_certs: config.remote.accept_invalid_certs,
        })
        .or_raise(|| ErrorKind::Client)?;
        let store = open_store(config).await?;
        tracing::info!(store = store.name(), remote = service.url(), "Application state ready");
        let snapshots = SnapshotWriter::new(&config.snapshot.directory);
        Ok(Self::new(Pipeline::new(Arc::new(service), store, snapshots)))
    }
}

/// Open the configured record store.
pub async fn open_store(config: &Config) -> Result<StoreHandle> {
    Ok(match config.store.backend {
        StoreBackend::Sqlite => {
            let db = Database::connect(&config.store.path).await.or_raise(|| ErrorKind::Store)?;
            Arc::new(SqliteStore::from(&db))
        },
        StoreBackend::Memory if config.store.seed_demo => Arc::new(MemoryStore::demo()),
        StoreBackend::Memory => Arc::new(MemoryStore::default()),
    })
}
