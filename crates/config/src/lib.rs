//! Configuration for docmeta.
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults,
//! 2. a configuration file (TOML, YAML or JSON, chosen by extension): either
//!    the one passed explicitly, or `docmeta.toml` in the platform config
//!    directory and then in the working directory, whichever exist,
//! 3. `DOCMETA_`-prefixed environment variables, with `__` separating nested
//!    keys (`DOCMETA_SERVER__PORT=9000`).

pub mod error;
mod settings;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use std::path::{Path, PathBuf};

pub use crate::settings::{Config, RemoteConfig, ServerConfig, SnapshotConfig, StoreBackend, StoreConfig};

pub const ENV_PREFIX: &str = "DOCMETA_";
pub const FILE_NAME: &str = "docmeta.toml";

/// Load and validate the configuration.
///
/// An explicit `file` must exist; the default locations are optional.
pub fn load(file: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    match file {
        Some(path) => {
            if !path.is_file() {
                exn::bail!(ErrorKind::Invalid(format!("configuration file {} does not exist", path.display())));
            }
            figment = merge_file(figment, path)?;
        },
        None => {
            for path in default_files().into_iter().filter(|path| path.is_file()) {
                figment = merge_file(figment, &path)?;
            }
        },
    }
    let config: Config = figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract().or_raise(|| ErrorKind::Load)?;
    config.validate()?;
    Ok(config)
}

/// Candidate configuration files, lowest precedence first.
pub fn default_files() -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(2);
    if let Some(dirs) = ProjectDirs::from("", "", "docmeta") {
        files.push(dirs.config_dir().join(FILE_NAME));
    }
    files.push(PathBuf::from(FILE_NAME));
    files
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    tracing::debug!(path = %path.display(), "Reading configuration file");
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default().to_ascii_lowercase();
    Ok(match extension.as_str() {
        "toml" => figment.merge(Toml::file_exact(path)),
        "yaml" | "yml" => figment.merge(Yaml::file_exact(path)),
        "json" => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::Invalid(format!(
            "unsupported configuration file format: {} (expected .toml, .yaml or .json)",
            path.display()
        ))),
    })
}
