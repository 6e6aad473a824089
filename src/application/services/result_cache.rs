//! Memoized source-to-result mappings and their on-disk artifacts.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::seq::IndexedRandom;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::domain::entities::{CacheEntry, SourceUrl};
use crate::domain::errors::PipelineError;
use crate::domain::ports::CacheStorePort;

/// Ordered list of cache entries backed by a [`CacheStorePort`].
///
/// Entries are loaded lazily on first access and written back after every
/// mutation. The in-memory list only changes once the store accepted it.
///
/// The run lock returned by [`ResultCache::exclusive`] is held by whole
/// pipeline runs and by zaps, so an artifact is never deleted between its
/// transform and its upload. Always take it before any entry operation.
pub struct ResultCache {
    store: Arc<dyn CacheStorePort>,
    cache_root: PathBuf,
    runs: Mutex<()>,
    entries: Mutex<Option<Vec<CacheEntry>>>,
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("cache_root", &self.cache_root)
            .finish_non_exhaustive()
    }
}

impl ResultCache {
    /// Creates a cache whose artifacts live under `cache_root`.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStorePort>, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            cache_root: cache_root.into(),
            runs: Mutex::new(()),
            entries: Mutex::new(None),
        }
    }

    /// Returns the artifact directory.
    #[must_use]
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Waits for the run lock, serializing pipeline runs against zaps.
    pub async fn exclusive(&self) -> MutexGuard<'_, ()> {
        self.runs.lock().await
    }

    async fn loaded(&self) -> Result<MutexGuard<'_, Option<Vec<CacheEntry>>>, PipelineError> {
        let mut guard = self.entries.lock().await;
        if guard.is_none() {
            let entries = self.store.load().await?;
            debug!(count = entries.len(), "Loaded result cache");
            *guard = Some(entries);
        }
        Ok(guard)
    }

    /// Returns the result URL recorded for `source`.
    ///
    /// # Errors
    /// Returns error if the persisted entries cannot be loaded.
    pub async fn lookup(&self, source: &SourceUrl) -> Result<Option<String>, PipelineError> {
        let mut guard = self.loaded().await?;
        let entries = guard.get_or_insert_with(Vec::new);

        debug!(count = entries.len(), source = %source, "Inspecting result cache");

        Ok(entries
            .iter()
            .find(|entry| entry.source == source.as_str())
            .map(|entry| entry.result.clone()))
    }

    /// Records `source -> result`.
    ///
    /// An existing entry for the same source keeps its position and has its
    /// result replaced.
    ///
    /// # Errors
    /// Returns error if the entries cannot be loaded or persisted.
    pub async fn insert(&self, source: &SourceUrl, result: String) -> Result<(), PipelineError> {
        let mut guard = self.loaded().await?;
        let entries = guard.get_or_insert_with(Vec::new);
        let mut updated = entries.clone();

        if let Some(existing) = updated
            .iter_mut()
            .find(|entry| entry.source == source.as_str())
        {
            warn!(
                source = %source,
                old = %existing.result,
                new = %result,
                "Replacing cached result"
            );
            existing.result = result;
        } else {
            updated.push(CacheEntry::new(source.as_str(), result));
        }

        self.store.save(&updated).await?;
        *entries = updated;

        debug!(count = entries.len(), source = %source, "Recorded cache entry");
        Ok(())
    }

    /// Returns `count` distinct entries chosen uniformly at random.
    ///
    /// # Errors
    /// Returns [`PipelineError::InsufficientEntries`] when `count` exceeds the
    /// number of entries.
    pub async fn sample(&self, count: usize) -> Result<Vec<CacheEntry>, PipelineError> {
        let mut guard = self.loaded().await?;
        let entries = guard.get_or_insert_with(Vec::new);

        if count > entries.len() {
            return Err(PipelineError::InsufficientEntries {
                requested: count,
                available: entries.len(),
            });
        }

        Ok(entries
            .choose_multiple(&mut rand::rng(), count)
            .cloned()
            .collect())
    }

    /// Returns every entry in insertion order.
    ///
    /// # Errors
    /// Returns error if the persisted entries cannot be loaded.
    pub async fn list_all(&self) -> Result<Vec<CacheEntry>, PipelineError> {
        let mut guard = self.loaded().await?;
        Ok(guard.get_or_insert_with(Vec::new).clone())
    }

    /// Returns the number of entries.
    ///
    /// # Errors
    /// Returns error if the persisted entries cannot be loaded.
    pub async fn len(&self) -> Result<usize, PipelineError> {
        let guard = self.loaded().await?;
        Ok(guard.as_ref().map_or(0, Vec::len))
    }

    /// Removes the entry for `source` and its artifact.
    ///
    /// Artifact removal is best effort and happens only after the shortened
    /// list was persisted; a missing file is not an error.
    ///
    /// # Errors
    /// Returns [`PipelineError::NotFound`] if no entry matches, or a storage
    /// error if the shortened list cannot be persisted.
    pub async fn delete_one(&self, source: &SourceUrl) -> Result<CacheEntry, PipelineError> {
        let mut guard = self.loaded().await?;
        let entries = guard.get_or_insert_with(Vec::new);

        let position = entries
            .iter()
            .position(|entry| entry.source == source.as_str())
            .ok_or_else(|| PipelineError::not_found(source.as_str()))?;

        let mut updated = entries.clone();
        let removed = updated.remove(position);
        self.store.save(&updated).await?;
        *entries = updated;

        self.remove_artifact(source).await;

        info!(source = %source, "Zapped cache entry");
        Ok(removed)
    }

    /// Deletes the artifact directory and forgets every entry.
    ///
    /// Directory removal is best effort; the directory is recreated by the
    /// next transform.
    ///
    /// # Errors
    /// Returns error if the emptied list cannot be persisted.
    pub async fn clear_all(&self) -> Result<(), PipelineError> {
        let mut guard = self.entries.lock().await;

        match fs::remove_dir_all(&self.cache_root).await {
            Ok(()) => debug!(path = %self.cache_root.display(), "Removed cache root"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.cache_root.display(), "Cache root already absent");
            }
            Err(e) => {
                warn!(
                    path = %self.cache_root.display(),
                    error = %e,
                    "Failed to remove cache root"
                );
            }
        }

        self.store.save(&[]).await?;
        *guard = Some(Vec::new());

        info!("Cleared result cache");
        Ok(())
    }

    async fn remove_artifact(&self, source: &SourceUrl) {
        let path = source.artifact_path(&self.cache_root);
        match fs::remove_file(&path).await {
            Ok(()) => debug!(path = %path.display(), "Removed cached artifact"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Cached artifact already absent");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove cached artifact");
            }
        }
    }
}
