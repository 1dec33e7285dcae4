//! Environment source: PAGESCTL_* variables, `__` separating nested keys.
//!
//! `PAGESCTL_ACCOUNT_ID` sets `account_id`; `PAGESCTL_API__TOKEN` sets `api.token`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "PAGESCTL";

/// Add the environment source to the builder. Applied last so it overrides files.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__"),
    )
}
