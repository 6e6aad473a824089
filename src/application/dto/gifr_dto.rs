//! Randomization and cache administration DTOs.

use crate::domain::entities::{CacheEntry, SourceUrl};

/// Keyword selecting every cache entry in a zap request.
pub const ZAP_ALL_KEYWORD: &str = "all";

/// Where a randomization result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrigin {
    /// Answered from the result cache.
    Cache,
    /// Produced by a full fetch, shuffle and upload.
    Pipeline,
}

impl std::fmt::Display for ResultOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Pipeline => write!(f, "pipeline"),
        }
    }
}

/// Outcome of a successful randomization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomizeResponse {
    /// Hosted URL of the shuffled image.
    pub result_url: String,
    /// Whether the result was cached or freshly produced.
    pub origin: ResultOrigin,
}

impl RandomizeResponse {
    /// Creates a response served from the cache.
    #[must_use]
    pub const fn cached(result_url: String) -> Self {
        Self {
            result_url,
            origin: ResultOrigin::Cache,
        }
    }

    /// Creates a response produced by the pipeline.
    #[must_use]
    pub const fn produced(result_url: String) -> Self {
        Self {
            result_url,
            origin: ResultOrigin::Pipeline,
        }
    }

    /// Returns true if no work was done.
    #[must_use]
    pub const fn is_cache_hit(&self) -> bool {
        matches!(self.origin, ResultOrigin::Cache)
    }
}

/// What a zap request removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZapTarget {
    /// Every entry and the whole artifact directory.
    All,
    /// The entry for one source.
    Source(SourceUrl),
}

impl ZapTarget {
    /// Parses a zap argument; the literal `all` selects everything.
    #[must_use]
    pub fn parse(argument: &str) -> Self {
        if argument == ZAP_ALL_KEYWORD {
            Self::All
        } else {
            Self::Source(SourceUrl::new(argument))
        }
    }
}

/// Result of a zap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZapOutcome {
    /// The cache was emptied.
    Cleared,
    /// One entry was removed.
    Removed(CacheEntry),
}
