//! Cached source-to-result mapping.

use serde::{Deserialize, Serialize};

/// One memoized randomization: the submitted URL and where its shuffled
/// variant is hosted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Source URL as submitted.
    pub source: String,
    /// Hosted result URL.
    pub result: String,
}

impl CacheEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(source: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            result: result.into(),
        }
    }
}
