//! Port for publishing artifacts.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::PipelineError;

/// Port for pushing a local file to a hosting service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploaderPort: Send + Sync {
    /// Uploads `file`, naming it after the hash of `name_seed`, and returns
    /// its public URL. A single attempt is made.
    async fn upload(&self, file: &Path, name_seed: &str) -> Result<String, PipelineError>;
}
