//! Submission of files to the remote metadata service.

use crate::consts::{DEFAULT_SERVICE_URL, DEFAULT_UPLOAD_FIELD};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::io::ReaderStream;
use tracing::instrument;

pub type ServiceHandle = Arc<dyn MetadataService + Send + Sync>;

/// Anything that accepts a file and answers with an HTML page describing it.
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Name of the service (used for logging only).
    fn name(&self) -> &str;

    /// Submit the file at `path` under the name `filename` and return the raw
    /// response body. The body is returned as-is, even if empty; judging the
    /// response is the [`Extractor`](crate::Extractor)'s job.
    async fn submit(&self, path: &Path, filename: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub url: String,
    pub field_name: String,
    /// Applied to the whole request: connecting, uploading and reading the response.
    pub timeout: Duration,
    /// Skip TLS certificate and hostname verification.
    pub accept_invalid_certs: bool,
}
impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            field_name: DEFAULT_UPLOAD_FIELD.to_string(),
            timeout: Duration::from_secs(60),
            accept_invalid_certs: false,
        }
    }
}

/// HTTP client for the remote metadata service.
#[derive(Debug, Clone)]
pub struct SuipClient {
    client: Client,
    url: String,
    field_name: String,
}
impl SuipClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        if options.accept_invalid_certs {
            tracing::warn!(
                url = %options.url,
                "TLS certificate verification is DISABLED for the remote metadata service"
            );
        }
        let client = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .or_raise(|| ErrorKind::Transport(options.url.clone()))?;
        Ok(Self { client, url: options.url, field_name: options.field_name })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn form(&self, path: &Path, filename: &str) -> Result<Form> {
        let file = tokio::fs::File::open(path).await.or_raise(|| ErrorKind::Io)?;
        let length = file.metadata().await.or_raise(|| ErrorKind::Io)?.len();
        let mime = mime_guess::from_path(filename).first_or_octet_stream();
        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), length)
            .file_name(filename.to_string())
            .mime_str(mime.essence_str())
            .or_raise(|| ErrorKind::Transport(self.url.clone()))?;
        Ok(Form::new().part(self.field_name.clone(), part))
    }
}

#[async_trait]
impl MetadataService for SuipClient {
    fn name(&self) -> &str {
        "suip"
    }

    #[instrument(skip(self, path), fields(url = %self.url))]
    async fn submit(&self, path: &Path, filename: &str) -> Result<String> {
        let form = self.form(path, filename).await?;
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .or_raise(|| ErrorKind::Transport(self.url.clone()))?;
        tracing::debug!(status = %response.status(), "Remote metadata service responded");
        response.text().await.or_raise(|| ErrorKind::Transport(self.url.clone()))
    }
}
