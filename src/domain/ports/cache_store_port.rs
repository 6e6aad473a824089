//! Port for persisting the result cache.

use async_trait::async_trait;

use crate::domain::entities::CacheEntry;
use crate::domain::errors::PipelineError;

/// Durable storage for the ordered list of cache entries.
#[async_trait]
pub trait CacheStorePort: Send + Sync {
    /// Loads every persisted entry in insertion order.
    /// Returns an empty list when nothing has been stored yet.
    async fn load(&self) -> Result<Vec<CacheEntry>, PipelineError>;

    /// Replaces the persisted entries.
    async fn save(&self, entries: &[CacheEntry]) -> Result<(), PipelineError>;
}
