//! ConfigLoader: builds a validated `PagesConfig` from every configured source.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{environment, global_file};
use super::PagesConfig;
use crate::error::PagesError;
use config::File;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, an optional explicit file, and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<PagesConfig, PagesError> {
        let global = global_file::global_config_path();
        Self::load_from_sources(global.as_deref(), explicit)
    }

    /// Load configuration from the given global and explicit file paths plus the environment.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_from_sources(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<PagesConfig, PagesError> {
        let mut builder = builder_with_defaults()?;
        builder = global_file::add_to_builder(builder, global)?;

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(PagesError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!(config_path = %path.display(), "Loading explicit configuration");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = environment::add_to_builder(builder);

        let config: PagesConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(PagesError::Config)?;
        Ok(config)
    }
}
