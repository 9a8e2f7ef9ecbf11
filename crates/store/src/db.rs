//! SQLite pool for the record store, migrated on connect.

use exn::ResultExt;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use std::time::Duration;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
// Requests are short and writes are serialized by the ingest pipeline anyway.
const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_millis(1500);

/// Database connection pool for the record store.
///
/// Connecting always brings the schema up to date, so a freshly created
/// database file is usable straight away.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the record database stored at `path`.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let options = Self::options().filename(path.as_ref()).create_if_missing(true);
        Self::open(options, MAX_CONNECTIONS).await
    }

    /// Open a private database that lives only as long as the pool.
    ///
    /// Every `:memory:` connection is a separate database, so the pool holds
    /// exactly one.
    pub async fn connect_in_memory() -> Result<Self> {
        Self::open(Self::options().filename(":memory:"), 1).await
    }

    async fn open(options: SqliteConnectOptions, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    fn options() -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // Readers listing records may wait briefly on an insert.
            .busy_timeout(BUSY_TIMEOUT)
    }

    /// Bring the `metadata_records` schema up to date. Applied migrations
    /// are skipped.
    #[instrument("performing database migrations", skip(self))]
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.or_raise(|| ErrorKind::Migration)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for checked out connections and close the pool.
    pub async fn close(&self) {
        // Let SQLite update query planner statistics
        _ = sqlx::query("PRAGMA optimize").execute(&self.pool).await;
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let db = Database::connect_in_memory().await.unwrap();
        assert!(!db.pool().is_closed());
        db.close().await;
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db.close().await;
    }

    #[tokio::test]
    async fn test_in_memory_pool_shares_one_database() {
        let db = Database::connect_in_memory().await.unwrap();
        sqlx::query("INSERT INTO metadata_records (filename) VALUES ('a.pdf')").execute(db.pool()).await.unwrap();
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM metadata_records").fetch_one(db.pool()).await.unwrap();
        assert_eq!(count, 1);
        db.close().await;
    }

    #[tokio::test]
    async fn test_connect_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.sqlite");
        let db = Database::connect(&path).await.unwrap();
        assert!(path.exists());
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM metadata_records").fetch_one(db.pool()).await.unwrap();
        assert_eq!(count, 0);
        db.close().await;
    }
}
