//! Source URL value object and the content address derived from it.

use std::fmt;
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};

/// Extension of every transformed artifact in the cache root.
const ARTIFACT_EXTENSION: &str = "gif";

/// Returns the lowercase hex SHA-1 of `seed`.
///
/// Used both for artifact file names and for the name reported to the
/// hosting service.
#[must_use]
pub fn content_key(seed: &str) -> String {
    hex::encode(Sha1::digest(seed.as_bytes()))
}

/// Address of an image submitted for randomization.
///
/// Equality is exact string equality; no normalization is applied, so two
/// spellings of the same resource are cached separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUrl(String);

impl SourceUrl {
    /// Wraps a URL string.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the SHA-1 content key of the URL.
    #[must_use]
    pub fn content_key(&self) -> String {
        content_key(&self.0)
    }

    /// Returns the artifact file name, `sha1(url).gif`.
    #[must_use]
    pub fn artifact_file_name(&self) -> String {
        format!("{}.{ARTIFACT_EXTENSION}", self.content_key())
    }

    /// Returns the artifact path under `cache_root`.
    #[must_use]
    pub fn artifact_path(&self, cache_root: &Path) -> PathBuf {
        cache_root.join(self.artifact_file_name())
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SourceUrl {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SourceUrl {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
