//! Stages a randomization request moves through.

use std::fmt;

/// Position of a request in the randomization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Looking the source up in the result cache.
    CacheCheck,
    /// Downloading the source image.
    Fetching,
    /// Decoding and counting frames.
    Validating,
    /// Running the frame shuffle.
    Transforming,
    /// Publishing the artifact.
    Uploading,
    /// Writing the cache entry.
    Recording,
    /// Finished, successfully or not.
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CacheCheck => "cache_check",
            Self::Fetching => "fetching",
            Self::Validating => "validating",
            Self::Transforming => "transforming",
            Self::Uploading => "uploading",
            Self::Recording => "recording",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}
