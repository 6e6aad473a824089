//! TOML-file persistence for the result cache.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::CacheEntry;
use crate::domain::errors::PipelineError;
use crate::domain::ports::CacheStorePort;

use super::config::storage::write_toml_atomic;

#[derive(Debug, Default, Deserialize)]
struct PersistedState {
    #[serde(default)]
    gifr_cache: Vec<CacheEntry>,
}

#[derive(Serialize)]
struct PersistedStateRef<'a> {
    gifr_cache: &'a [CacheEntry],
}

/// Stores cache entries under the `gifr_cache` key of a TOML file.
#[derive(Debug, Clone)]
pub struct TomlCacheStore {
    path: PathBuf,
}

impl TomlCacheStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CacheStorePort for TomlCacheStore {
    async fn load(&self) -> Result<Vec<CacheEntry>, PipelineError> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!(path = %self.path.display(), "No persisted cache, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| PipelineError::storage(format!("failed to read state file: {e}")))?;

        match toml::from_str::<PersistedState>(&content) {
            Ok(state) => Ok(state.gifr_cache),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to parse state file. Resetting cache."
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, entries: &[CacheEntry]) -> Result<(), PipelineError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                PipelineError::storage(format!("failed to create state directory: {e}"))
            })?;
        }

        write_toml_atomic(&self.path, &PersistedStateRef {
            gifr_cache: entries,
        })
        .map_err(|e| PipelineError::storage(format!("failed to write state file: {e}")))?;

        debug!(path = %self.path.display(), count = entries.len(), "Persisted result cache");
        Ok(())
    }
}
