//! Randomization pipeline and cache error types.

use std::fmt::Display;

use thiserror::Error;

/// Error variants for the randomization pipeline and cache administration.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PipelineError {
    #[error("failed to fetch image: {message}")]
    Fetch { message: String },

    #[error("not an image: {message}")]
    NotAnImage { message: String },

    #[error("image is not animated")]
    NotAnimated,

    #[error("frame shuffle failed: {message}")]
    Transform { message: String },

    #[error("upload failed (status {}): {body}", .status.map_or_else(|| "none".to_string(), |s| s.to_string()))]
    Upload { status: Option<u16>, body: String },

    #[error("cannot sample {requested} entries from a cache of {available}")]
    InsufficientEntries { requested: usize, available: usize },

    #[error("no cache entry for {url}")]
    NotFound { url: String },

    #[error("cache storage error: {message}")]
    Storage { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl PipelineError {
    /// Creates fetch error.
    #[must_use]
    pub fn fetch(message: impl Display) -> Self {
        Self::Fetch {
            message: message.to_string(),
        }
    }

    /// Creates not-an-image error from the underlying decode failure.
    #[must_use]
    pub fn not_an_image(message: impl Display) -> Self {
        Self::NotAnImage {
            message: message.to_string(),
        }
    }

    /// Creates transform error.
    #[must_use]
    pub fn transform(message: impl Display) -> Self {
        Self::Transform {
            message: message.to_string(),
        }
    }

    /// Creates upload error.
    #[must_use]
    pub fn upload(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Upload {
            status,
            body: body.into(),
        }
    }

    /// Creates not found error.
    #[must_use]
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    /// Creates storage error.
    #[must_use]
    pub fn storage(message: impl Display) -> Self {
        Self::Storage {
            message: message.to_string(),
        }
    }

    /// Creates invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Display) -> Self {
        Self::InvalidArgument {
            message: message.to_string(),
        }
    }

    /// Returns whether the error was caused by the submitted image itself
    /// rather than by a collaborator.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::NotAnImage { .. } | Self::NotAnimated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_display_with_status() {
        let err = PipelineError::upload(Some(400), "bad request");
        assert_eq!(err.to_string(), "upload failed (status 400): bad request");
    }

    #[test]
    fn test_upload_display_without_status() {
        let err = PipelineError::upload(None, "file missing");
        assert_eq!(err.to_string(), "upload failed (status none): file missing");
    }

    #[test]
    fn test_rejections() {
        assert!(PipelineError::NotAnimated.is_rejection());
        assert!(PipelineError::not_an_image("bad magic").is_rejection());
        assert!(!PipelineError::fetch("refused").is_rejection());
    }
}
