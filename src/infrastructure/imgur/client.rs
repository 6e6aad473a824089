//! Imgur API HTTP client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::dto::UploadResponse;
use crate::domain::entities::content_key;
use crate::domain::errors::PipelineError;
use crate::domain::ports::UploaderPort;
use crate::infrastructure::config::{ApiKey, ImgurConfig};

/// Uploads artifacts to Imgur as base64 form posts.
pub struct ImgurUploader {
    client: Client,
    endpoint: String,
    client_id: String,
    api_key: ApiKey,
}

impl std::fmt::Debug for ImgurUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImgurUploader")
            .field("endpoint", &self.endpoint)
            .field("client_id", &self.client_id)
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl ImgurUploader {
    /// Creates an uploader from Imgur configuration.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(config: &ImgurConfig, timeout_secs: u64) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .user_agent(concat!("gifr/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                PipelineError::upload(None, format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            client_id: config.client_id.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl UploaderPort for ImgurUploader {
    async fn upload(&self, file: &Path, name_seed: &str) -> Result<String, PipelineError> {
        let bytes = tokio::fs::read(file).await.map_err(|e| {
            PipelineError::upload(None, format!("failed to read {}: {e}", file.display()))
        })?;
        let encoded = general_purpose::STANDARD.encode(&bytes);
        let name = content_key(name_seed);

        debug!(
            path = %file.display(),
            size = bytes.len(),
            name = %name,
            "Uploading to Imgur"
        );

        let form = [
            ("key", self.api_key.expose()),
            ("image", encoded.as_str()),
            ("type", "base64"),
            ("name", name.as_str()),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("Client-ID {}", self.client_id))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Imgur");
                PipelineError::upload(None, e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::upload(Some(status.as_u16()), e.to_string()))?;

        debug!(status = %status, body = %body, "Imgur response");

        if status != StatusCode::OK {
            return Err(PipelineError::upload(Some(status.as_u16()), body));
        }

        let link = serde_json::from_str::<UploadResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.data.link);

        link.ok_or_else(|| PipelineError::upload(Some(status.as_u16()), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ImgurConfig {
        ImgurConfig {
            client_id: "client-123".to_string(),
            api_key: ApiKey::new("key-456"),
            endpoint: format!("{}/3/upload", server.uri()),
        }
    }

    fn artifact(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("artifact.gif");
        std::fs::write(&path, b"GIF89a").unwrap();
        path
    }

    #[tokio::test]
    async fn test_successful_upload_returns_link() {
        let server = MockServer::start().await;
        let seed = "https://example.com/dance.gif";
        Mock::given(method("POST"))
            .and(path("/3/upload"))
            .and(header_eq("authorization", "Client-ID client-123"))
            .and(body_string_contains("key=key-456"))
            .and(body_string_contains("type=base64"))
            .and(body_string_contains(format!("name={}", content_key(seed))))
            .and(body_string_contains("image=R0lGODlh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"link": "https://i.imgur.com/abc.gif"},
                "success": true,
                "status": 200
            })))
            .expect(1)
            .mount(&server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let uploader = ImgurUploader::new(&config_for(&server), 5).unwrap();

        let link = uploader.upload(&artifact(temp.path()), seed).await.unwrap();

        assert_eq!(link, "https://i.imgur.com/abc.gif");
    }

    #[tokio::test]
    async fn test_error_status_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "data": {"error": "Invalid client_id"},
                "success": false,
                "status": 403
            })))
            .expect(1)
            .mount(&server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let uploader = ImgurUploader::new(&config_for(&server), 5).unwrap();

        let result = uploader.upload(&artifact(temp.path()), "seed").await;

        match result {
            Err(PipelineError::Upload { status, body }) => {
                assert_eq!(status, Some(403));
                assert!(body.contains("Invalid client_id"));
            }
            other => panic!("expected upload error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ok_without_link_is_upload_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let uploader = ImgurUploader::new(&config_for(&server), 5).unwrap();

        let result = uploader.upload(&artifact(temp.path()), "seed").await;

        assert!(matches!(
            result,
            Err(PipelineError::Upload {
                status: Some(200),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_upload_error() {
        let server = MockServer::start().await;
        let temp = tempfile::tempdir().unwrap();
        let uploader = ImgurUploader::new(&config_for(&server), 5).unwrap();

        let result = uploader
            .upload(&temp.path().join("missing.gif"), "seed")
            .await;

        assert!(matches!(result, Err(PipelineError::Upload { status: None, .. })));
    }
}
