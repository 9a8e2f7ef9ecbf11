//! JSON snapshots of freshly stored records.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt};

const TIMESTAMP: &[BorrowedFormatItem<'static>] = format_description!("[year][month][day]_[hour][minute][second]");
/// How many `_N` suffixes to try before giving up on a single second.
const MAX_SUFFIX: u32 = 100;

/// Writes each stored record to its own pretty-printed JSON file, named
/// `metadata_YYYYMMDD_HHMMSS.json` after the (UTC) time of writing.
///
/// Existing files are never overwritten: a second snapshot within the same
/// second is written to `metadata_YYYYMMDD_HHMMSS_1.json`, and so on.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    directory: PathBuf,
}

impl SnapshotWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write `value` to a new snapshot file, creating the snapshot directory
    /// if needed, and return the path written to.
    #[tracing::instrument(skip_all, fields(directory = %self.directory.display()))]
    pub async fn write<T: Serialize>(&self, value: &T) -> Result<PathBuf> {
        let contents = to_json(value)?;
        tokio::fs::create_dir_all(&self.directory).await.or_raise(|| ErrorKind::Snapshot)?;
        let stamp = OffsetDateTime::now_utc().format(TIMESTAMP).or_raise(|| ErrorKind::Snapshot)?;

        for suffix in 0..MAX_SUFFIX {
            let filename = match suffix {
                0 => format!("metadata_{stamp}.json"),
                n => format!("metadata_{stamp}_{n}.json"),
            };
            let path = self.directory.join(filename);
            let file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => file,
                Err(err) if err.kind() == IoErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err).or_raise(|| ErrorKind::Snapshot),
            };
            write_or_remove(&path, file, &contents).await?;
            tracing::debug!(path = %path.display(), "Snapshot written");
            return Ok(path);
        }
        exn::bail!(ErrorKind::Snapshot)
    }
}

/// Write `contents` to the freshly created file at `path`. A file that could
/// not be written in full is removed again.
async fn write_or_remove<W: AsyncWrite + Unpin>(path: &Path, mut file: W, contents: &[u8]) -> Result<()> {
    let written = async {
        file.write_all(contents).await?;
        file.flush().await
    }
    .await;
    drop(file);
    if let Err(err) = written {
        if let Err(cleanup) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %cleanup, "Failed to remove partial snapshot");
        }
        return Err(err).or_raise(|| ErrorKind::Snapshot);
    }
    Ok(())
}

/// Four-space indented JSON, non-ASCII characters written as-is.
fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer).or_raise(|| ErrorKind::Snapshot)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmeta_extract::models::Metadata;
    use docmeta_store::Record;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    fn record() -> Record {
        let mut metadata = Metadata::new("отчёт.pdf").with_filetype("pdf");
        metadata.size_file = Some("120KB".to_string());
        Record::new(4, OffsetDateTime::now_utc(), metadata)
    }

    #[tokio::test]
    async fn test_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("saved_metadata"));
        let path = writer.write(&record()).await.unwrap();

        assert_eq!(path.parent(), Some(writer.directory()));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("metadata_") && name.ends_with(".json"), "{name}");
        assert_eq!(name.len(), "metadata_20240101_120000.json".len());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\n    \"id\": 4"), "{contents}");
        assert!(contents.contains("отчёт.pdf"));
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["size_file"], "120KB");
    }

    #[tokio::test]
    async fn test_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path());
        let mut paths = Vec::new();
        for _ in 0..3 {
            paths.push(writer.write(&record()).await.unwrap());
        }
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 3);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    /// Accepts a few bytes, then fails like a full disk.
    struct FullDisk(usize);

    impl AsyncWrite for FullDisk {
        fn poll_write(mut self: Pin<&mut Self>, _: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
            if self.0 == 0 {
                return Poll::Ready(Err(io::Error::new(io::ErrorKind::StorageFull, "no space left")));
            }
            let n = buf.len().min(self.0);
            self.0 -= n;
            Poll::Ready(Ok(n))
        }

        fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata_20240101_120000.json");
        std::fs::write(&path, b"{").unwrap();

        let err = write_or_remove(&path, FullDisk(1), b"{\"id\": 4}").await.unwrap_err();
        assert!(matches!(*err, ErrorKind::Snapshot));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();
        let err = SnapshotWriter::new(blocker.join("nested")).write(&record()).await.unwrap_err();
        assert!(matches!(*err, ErrorKind::Snapshot));
    }
}
