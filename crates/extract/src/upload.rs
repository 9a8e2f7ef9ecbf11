//! Inputs to the extractor, and their materialization onto the filesystem.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fmt;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tempfile::NamedTempFile;
use tokio::io::{AsyncRead, AsyncWriteExt};

type BoxAsyncRead = Pin<Box<dyn AsyncRead + Send + 'static>>;

/// A file to extract metadata from.
pub enum Upload {
    /// A file already on the local filesystem; submitted in place.
    Path(PathBuf),
    /// An upload stream (e.g. a multipart request body) and the name the
    /// client gave it. Streams are written to a temporary file first.
    Stream { filename: String, reader: BoxAsyncRead },
}

impl Upload {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn stream(filename: impl Into<String>, reader: impl AsyncRead + Send + 'static) -> Self {
        Self::Stream { filename: filename.into(), reader: Box::pin(reader) }
    }

    /// Original name of the file.
    pub fn filename(&self) -> String {
        match self {
            Self::Path(path) => path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default(),
            Self::Stream { filename, .. } => filename.clone(),
        }
    }

    /// Make the upload addressable by path.
    ///
    /// For streams, the returned value owns the temporary file; dropping it
    /// removes the file, whichever way the caller exits.
    pub(crate) async fn materialize(self) -> Result<Materialized> {
        let filename = self.filename();
        match self {
            Self::Path(path) => Ok(Materialized { path, filename, temp: None }),
            Self::Stream { mut reader, .. } => {
                let suffix = Path::new(&filename)
                    .extension()
                    .map(|ext| format!(".{}", ext.to_string_lossy()))
                    .unwrap_or_default();
                let (temp, file) = tokio::task::spawn_blocking(move || {
                    let temp = tempfile::Builder::new().prefix("docmeta-").suffix(&suffix).tempfile()?;
                    let file = temp.as_file().try_clone()?;
                    Ok::<_, std::io::Error>((temp, file))
                })
                .await
                .or_raise(|| ErrorKind::Io)?
                .or_raise(|| ErrorKind::Io)?;
                let mut file = tokio::fs::File::from_std(file);
                let bytes = tokio::io::copy(&mut reader, &mut file).await.or_raise(|| ErrorKind::Io)?;
                file.flush().await.or_raise(|| ErrorKind::Io)?;
                tracing::trace!(path = %temp.path().display(), bytes, "Upload written to temporary file");
                Ok(Materialized { path: temp.path().to_path_buf(), filename, temp: Some(temp) })
            },
        }
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Stream { filename, .. } => f.debug_struct("Stream").field("filename", filename).finish_non_exhaustive(),
        }
    }
}

impl From<PathBuf> for Upload {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// An upload that can be addressed by path.
#[derive(Debug)]
pub(crate) struct Materialized {
    pub(crate) path: PathBuf,
    pub(crate) filename: String,
    // Held for its Drop impl.
    #[allow(dead_code)]
    temp: Option<NamedTempFile>,
}
