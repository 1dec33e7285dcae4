//! Merge rules: built-in defaults applied before any file or environment source.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const DEFAULT_DASHBOARD_URL: &str = "https://dash.cloudflare.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.base_url", DEFAULT_API_BASE_URL)?
        .set_default("api.dashboard_url", DEFAULT_DASHBOARD_URL)?
        .set_default("api.timeout_secs", DEFAULT_TIMEOUT_SECS)
}
