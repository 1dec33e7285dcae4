//! Context Cache
//!
//! Small JSON records persisted under the cache directory, one file per logical cache name.
//! Reads never fail: a missing, unreadable, or malformed file reads as an empty record.
//! Writes merge the given partial record field by field onto what is already persisted and
//! replace the file atomically (temporary file + rename).

use crate::error::PagesError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Logical cache name used by the project and deployment commands.
pub const PAGES_CACHE_NAME: &str = "pages.json";

/// Persisted command context. Fields this crate does not know about are kept in `extra`
/// and survive merge-writes untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContextRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_project_name(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }

    /// Field-wise merge: every field present in `partial` overwrites, absent fields are kept.
    pub fn merged_with(&self, partial: &ContextRecord) -> ContextRecord {
        let mut extra = self.extra.clone();
        for (key, value) in &partial.extra {
            extra.insert(key.clone(), value.clone());
        }
        ContextRecord {
            account_id: partial.account_id.clone().or_else(|| self.account_id.clone()),
            project_name: partial
                .project_name
                .clone()
                .or_else(|| self.project_name.clone()),
            extra,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.account_id.is_none() && self.project_name.is_none() && self.extra.is_empty()
    }
}

/// File-backed store of context records.
#[derive(Debug, Clone)]
pub struct ContextCache {
    dir: PathBuf,
}

impl ContextCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a cache name.
    pub fn path_for(&self, cache_name: &str) -> Result<PathBuf, PagesError> {
        let valid = !cache_name.is_empty()
            && cache_name != "."
            && cache_name != ".."
            && !cache_name.contains(['/', '\\']);
        if !valid {
            return Err(PagesError::Cache(format!(
                "Invalid cache name: {:?}",
                cache_name
            )));
        }
        Ok(self.dir.join(cache_name))
    }

    /// Read a record. Missing or malformed files yield an empty record.
    pub fn read(&self, cache_name: &str) -> ContextRecord {
        let path = match self.path_for(cache_name) {
            Ok(path) => path,
            Err(e) => {
                warn!("{}", e);
                return ContextRecord::default();
            }
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No cached context");
                return ContextRecord::default();
            }
            Err(e) => {
                warn!(path = %path.display(), "Failed to read cached context: {}", e);
                return ContextRecord::default();
            }
        };

        match serde_json::from_str::<ContextRecord>(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), "Ignoring malformed cached context: {}", e);
                ContextRecord::default()
            }
        }
    }

    /// Merge `partial` onto the persisted record and write the result atomically.
    ///
    /// Returns the record as persisted.
    pub fn write(
        &self,
        cache_name: &str,
        partial: &ContextRecord,
    ) -> Result<ContextRecord, PagesError> {
        let path = self.path_for(cache_name)?;
        let merged = self.read(cache_name).merged_with(partial);

        fs::create_dir_all(&self.dir).map_err(|e| {
            PagesError::Cache(format!(
                "Failed to create cache directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let serialized = serde_json::to_string_pretty(&merged)
            .map_err(|e| PagesError::Cache(format!("Failed to serialize context: {}", e)))?;

        let temp_path = self.dir.join(format!(".{}.tmp", cache_name));
        fs::write(&temp_path, serialized).map_err(|e| {
            PagesError::Cache(format!(
                "Failed to write cache file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            PagesError::Cache(format!(
                "Failed to replace cache file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "Saved context");
        Ok(merged)
    }
}
