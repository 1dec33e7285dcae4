//! Configuration System
//!
//! Layered configuration for pagesctl: built-in defaults, the global config file, an explicit
//! `--config` file, then `PAGESCTL_*` environment variables. CLI flags are applied on top by the
//! route layer.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::merge_policy::{DEFAULT_API_BASE_URL, DEFAULT_DASHBOARD_URL, DEFAULT_TIMEOUT_SECS};
pub use sources::global_file::global_config_path;

/// Directory, relative to the working directory, holding cache files by default.
pub const DEFAULT_CACHE_DIR: &str = ".pagesctl/cache";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Explicit account to run commands against (used when the cache has none)
    #[serde(default)]
    pub account_id: Option<String>,

    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Local context cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    /// Base URL of the dashboard, used to build per-deployment links
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_dashboard_url() -> String {
    DEFAULT_DASHBOARD_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            dashboard_url: default_dashboard_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Validate API settings
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [("api.base_url", &self.base_url), ("api.dashboard_url", &self.dashboard_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }
        if self.timeout_secs == 0 {
            return Err("api.timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Local context cache settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory; relative paths resolve against the working directory
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl CacheConfig {
    /// Resolve the cache directory for a working directory.
    pub fn resolve_dir(&self, cwd: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join(DEFAULT_CACHE_DIR),
        }
    }
}

impl PagesConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.api.validate()?;
        if let Some(account_id) = &self.account_id {
            if account_id.trim().is_empty() {
                return Err("account_id cannot be empty".to_string());
            }
        }
        Ok(())
    }
}
