use crate::error::{ErrorKind, Result};
use docmeta_extract::{DEFAULT_SERVICE_URL, DEFAULT_UPLOAD_FIELD};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const BYTES_PER_MB: usize = 1024 * 1024;

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub remote: RemoteConfig,
    pub snapshot: SnapshotConfig,
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum request body size in MB
    pub max_body_size_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1".to_string(), port: 8000, timeout_secs: 120, max_body_size_mb: 50 }
    }
}

impl ServerConfig {
    /// Address to bind the listener to, as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb.saturating_mul(BYTES_PER_MB)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// SQLite database file; ignored by the memory backend.
    pub path: PathBuf,
    /// Seed the memory backend with five sample records.
    pub seed_demo: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { backend: StoreBackend::default(), path: PathBuf::from("docmeta.sqlite"), seed_demo: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub url: String,
    pub field_name: String,
    pub timeout_secs: u64,
    /// Skip TLS certificate verification for the remote service.
    pub accept_invalid_certs: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            field_name: DEFAULT_UPLOAD_FIELD.to_string(),
            timeout_secs: 60,
            accept_invalid_certs: false,
        }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub directory: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from("saved_metadata") }
    }
}

impl Config {
    /// Reject values that would only fail later, at first use.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| exn::Exn::from(ErrorKind::Invalid(message.to_string()));
        if self.server.port == 0 {
            return Err(invalid("server.port must not be 0"));
        }
        if self.server.timeout_secs == 0 {
            return Err(invalid("server.timeout_secs must be greater than 0"));
        }
        if self.server.max_body_size_mb == 0 {
            return Err(invalid("server.max_body_size_mb must be greater than 0"));
        }
        if self.server.max_body_size_mb.checked_mul(BYTES_PER_MB).is_none() {
            return Err(invalid("server.max_body_size_mb is too large"));
        }
        if self.remote.timeout_secs == 0 {
            return Err(invalid("remote.timeout_secs must be greater than 0"));
        }
        if !(self.remote.url.starts_with("http://") || self.remote.url.starts_with("https://")) {
            return Err(invalid("remote.url must be an http:// or https:// URL"));
        }
        if self.remote.field_name.trim().is_empty() {
            return Err(invalid("remote.field_name must not be empty"));
        }
        if self.store.backend == StoreBackend::Sqlite && self.store.path.as_os_str().is_empty() {
            return Err(invalid("store.path must not be empty for the sqlite backend"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            remote: RemoteConfig::default(),
            snapshot: SnapshotConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:8000");
        assert_eq!(config.server.max_body_size(), 50 * 1024 * 1024);
        assert_eq!(config.remote.timeout(), Duration::from_secs(60));
        assert!(!config.remote.accept_invalid_certs);
        let huge = ServerConfig { max_body_size_mb: usize::MAX, ..ServerConfig::default() };
        assert_eq!(huge.max_body_size(), usize::MAX);
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
    }

    #[rstest]
    #[case::port(|c: &mut Config| c.server.port = 0, "server.port")]
    #[case::server_timeout(|c: &mut Config| c.server.timeout_secs = 0, "server.timeout_secs")]
    #[case::body(|c: &mut Config| c.server.max_body_size_mb = 0, "server.max_body_size_mb")]
    #[case::body_overflow(|c: &mut Config| c.server.max_body_size_mb = usize::MAX, "server.max_body_size_mb")]
    #[case::remote_timeout(|c: &mut Config| c.remote.timeout_secs = 0, "remote.timeout_secs")]
    #[case::scheme(|c: &mut Config| c.remote.url = "ftp://example.com".to_string(), "remote.url")]
    #[case::field(|c: &mut Config| c.remote.field_name = " ".to_string(), "remote.field_name")]
    #[case::path(|c: &mut Config| c.store.path = PathBuf::new(), "store.path")]
    fn test_validate_rejects(#[case] change: fn(&mut Config), #[case] field: &str) {
        let mut config = Config::default();
        change(&mut config);
        let err = config.validate().unwrap_err();
        let ErrorKind::Invalid(message) = &*err else {
            panic!("expected an Invalid error, got {err:?}");
        };
        assert!(message.starts_with(field), "{message}");
    }

    #[test]
    fn test_memory_backend_ignores_path() {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Memory;
        config.store.path = PathBuf::new();
        config.validate().unwrap();
    }
}
