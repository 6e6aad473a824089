//! Port for retrieving source images.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::SourceUrl;
use crate::domain::errors::PipelineError;

/// Port for downloading the raw bytes behind a source URL.
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Downloads the body at `url`.
    ///
    /// Only transport failures are errors; the body is returned whatever it
    /// contains and validated by the caller.
    async fn fetch(&self, url: &SourceUrl) -> Result<Bytes, PipelineError>;
}
