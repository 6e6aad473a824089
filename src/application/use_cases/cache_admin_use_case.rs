//! Cache inspection and eviction.

use std::sync::Arc;

use tracing::debug;

use crate::application::dto::{ZapOutcome, ZapTarget};
use crate::application::services::ResultCache;
use crate::domain::entities::CacheEntry;
use crate::domain::errors::PipelineError;

/// Lists, samples and zaps result cache entries.
#[derive(Debug, Clone)]
pub struct CacheAdminUseCase {
    cache: Arc<ResultCache>,
}

impl CacheAdminUseCase {
    /// Creates new cache admin use case.
    #[must_use]
    pub const fn new(cache: Arc<ResultCache>) -> Self {
        Self { cache }
    }

    /// Returns `count` random entries.
    ///
    /// # Errors
    /// Returns error if the cache holds fewer than `count` entries.
    pub async fn sample(&self, count: usize) -> Result<Vec<CacheEntry>, PipelineError> {
        debug!(count, "Sampling result cache");
        self.cache.sample(count).await
    }

    /// Returns every entry in insertion order.
    ///
    /// # Errors
    /// Returns error if the entries cannot be loaded.
    pub async fn list_all(&self) -> Result<Vec<CacheEntry>, PipelineError> {
        self.cache.list_all().await
    }

    /// Removes one entry, or everything.
    ///
    /// Waits for a running randomization to finish first.
    ///
    /// # Errors
    /// Returns error if a single target is not cached or the change cannot
    /// be persisted.
    pub async fn zap(&self, target: ZapTarget) -> Result<ZapOutcome, PipelineError> {
        let _running = self.cache.exclusive().await;
        debug!(?target, "Zapping result cache");

        match target {
            ZapTarget::All => {
                self.cache.clear_all().await?;
                Ok(ZapOutcome::Cleared)
            }
            ZapTarget::Source(source) => {
                let removed = self.cache.delete_one(&source).await?;
                Ok(ZapOutcome::Removed(removed))
            }
        }
    }
}
