//! Imgur API response shapes.

use serde::Deserialize;

/// Envelope of an upload response.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub data: UploadData,
}

/// Payload of an upload response.
#[derive(Debug, Deserialize)]
pub struct UploadData {
    #[serde(default)]
    pub link: Option<String>,
}
