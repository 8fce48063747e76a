//! Client for the external gallery upload endpoint.
//!
//! The endpoint takes a multipart form (`file`, `title`, `description`)
//! and answers `{ "id", "url" }` on success or `{ "error" }` on failure.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use studio_core::forms::UploadFile;

use crate::realtime::path_segments;

/// Default endpoint for local development.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "http://localhost:5000/upload";

/// Message used when a rejection carries no `error` field.
pub const UPLOAD_FAILED: &str = "Upload failed";

/// What the endpoint returned for an accepted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub id: String,
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The endpoint answered with a non-2xx status.
    #[error("{0}")]
    Rejected(String),

    /// The HTTP request itself failed.
    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A 2xx answer without the expected fields.
    #[error("Unexpected upload response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct Accepted {
    id: Value,
    url: String,
}

#[derive(Deserialize)]
struct Rejected {
    error: Option<String>,
}

pub struct UploadClient {
    client: reqwest::Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Send one file with its title and description.
    pub async fn upload(
        &self,
        file: &UploadFile,
        title: &str,
        description: &str,
    ) -> Result<UploadReceipt, UploadError> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("title", title.to_string())
            .text("description", description.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<Rejected>(&body)
                .ok()
                .and_then(|r| r.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UPLOAD_FAILED.to_string());
            tracing::warn!(status = status.as_u16(), error = %message, "Upload rejected");
            return Err(UploadError::Rejected(message));
        }

        let accepted: Accepted =
            serde_json::from_str(&body).map_err(|e| UploadError::Decode(e.to_string()))?;
        let id = match accepted.id {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => return Err(UploadError::Decode(format!("unusable id {other}"))),
        };
        // The id becomes a single key under the gallery collection.
        if !matches!(path_segments(&id), Ok(segments) if segments == [id.as_str()]) {
            tracing::warn!(id = %id, "Upload id is not a usable record key");
            return Err(UploadError::Decode(format!("id '{id}' is not a record key")));
        }
        Ok(UploadReceipt {
            id,
            url: accepted.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn file() -> UploadFile {
        UploadFile {
            file_name: "dance.jpg".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        }
    }

    async fn endpoint(response: ResponseTemplate) -> (MockServer, UploadClient) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(response)
            .mount(&server)
            .await;
        let client = UploadClient::new(format!("{}/upload", server.uri()));
        (server, client)
    }

    #[tokio::test]
    async fn accepted_upload_returns_receipt() {
        let (server, client) = endpoint(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 42, "url": "https://cdn/x.jpg" })),
        )
        .await;

        let receipt = client.upload(&file(), "First Dance", "wedding").await.unwrap();
        assert_eq!(receipt, UploadReceipt { id: "42".into(), url: "https://cdn/x.jpg".into() });

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"file\"; filename=\"dance.jpg\""));
        assert!(body.contains("name=\"title\"\r\n\r\nFirst Dance"));
        assert!(body.contains("name=\"description\"\r\n\r\nwedding"));
    }

    #[tokio::test]
    async fn rejection_carries_endpoint_error() {
        let (_server, client) = endpoint(
            ResponseTemplate::new(413).set_body_json(json!({ "error": "File too large" })),
        )
        .await;
        assert_matches!(
            client.upload(&file(), "t", "d").await,
            Err(UploadError::Rejected(m)) if m == "File too large"
        );
    }

    #[tokio::test]
    async fn rejection_without_error_field_uses_generic_message() {
        let (_server, client) = endpoint(ResponseTemplate::new(500).set_body_string("boom")).await;
        assert_matches!(
            client.upload(&file(), "t", "d").await,
            Err(UploadError::Rejected(m)) if m == UPLOAD_FAILED
        );
    }

    #[tokio::test]
    async fn malformed_success_is_a_decode_error() {
        let (_server, client) =
            endpoint(ResponseTemplate::new(200).set_body_json(json!({ "ok": true }))).await;
        assert_matches!(client.upload(&file(), "t", "d").await, Err(UploadError::Decode(_)));
    }

    #[tokio::test]
    async fn ids_that_are_not_single_keys_are_decode_errors() {
        for id in ["gallery/abc123", "1700000_photo.jpg", "/lead"] {
            let (_server, client) = endpoint(
                ResponseTemplate::new(200).set_body_json(json!({ "id": id, "url": "https://cdn/x.jpg" })),
            )
            .await;
            assert_matches!(
                client.upload(&file(), "t", "d").await,
                Err(UploadError::Decode(_)),
                "id {id:?} should be refused"
            );
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        let client = UploadClient::new("http://127.0.0.1:1/upload");
        assert_matches!(client.upload(&file(), "t", "d").await, Err(UploadError::Request(_)));
    }
}
