//! Port for the frame reordering transform.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::SourceUrl;
use crate::domain::errors::PipelineError;

/// Port for producing a frame-shuffled copy of an animated image.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FrameShufflerPort: Send + Sync {
    /// Shuffles the `frame_count` frames of `image` and writes the result to
    /// the content-addressed path for `source`, returning that path.
    ///
    /// Repeated calls for the same source overwrite the same file.
    async fn randomize(
        &self,
        source: &SourceUrl,
        image: Bytes,
        frame_count: usize,
    ) -> Result<PathBuf, PipelineError>;
}
