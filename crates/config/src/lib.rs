//! Configuration loading and validation for cursegate.
//!
//! Configuration is merged from three layers, later layers winning:
//! built-in defaults, an optional TOML file, and `CURSEGATE_*` environment
//! variables (nested keys separated by `__`, e.g. `CURSEGATE_API__TOKEN`).
//!
//! The loaded [`Config`] is meant to be constructed once at process start
//! and passed by reference into whatever needs it; nothing in this
//! workspace reads ambient global state.

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default base path of the hosted upstream API.
const DEFAULT_BASE_URL: &str = "https://addons-v2.forgesvc.net/api";
const ENV_PREFIX: &str = "CURSEGATE_";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base path all endpoint URLs are joined onto.
    pub base_url: String,
    /// Opaque authentication token forwarded verbatim on every request.
    /// Absent means unauthenticated.
    pub token: Option<String>,
    /// Page size used when walking paged search results.
    pub page_size: u32,
}

/// Local store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Path of the SQLite database file.
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                token: None,
                page_size: 1000,
            },
            cache: CacheConfig { path: default_cache_path() },
        }
    }
}

/// Platform data directory, falling back to the working directory when the
/// platform reports none.
fn default_cache_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "cursegate")
        .map(|dirs| dirs.data_dir().join("addons.db"))
        .unwrap_or_else(|| PathBuf::from("cursegate.db"))
}

impl Config {
    /// Load and validate the merged configuration.
    ///
    /// `file` is optional; a missing file is not an error (figment treats
    /// a nonexistent TOML file as an empty layer).
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        debug!(base_url = %config.api.base_url, cache = %config.cache.path.display(), "configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("api.base_url must not be empty"));
        }
        if self.api.page_size == 0 {
            // A zero page size would make the search pagination loop spin
            // forever on its own output.
            exn::bail!(ErrorKind::Invalid("api.page_size must be at least 1"));
        }
        Ok(())
    }
}
