//! Binary object storage for project images.
//!
//! Objects are addressed by slash-separated names such as
//! `projects/1700000000000_beach.jpg` and served from a public URL.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

/// Where a stored object lives and how the public fetches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
    pub url: String,
}

/// Errors from the object storage layer.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("Object storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Object storage error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Object storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected object storage response: {0}")]
    Decode(String),

    #[error("Invalid object name '{0}'")]
    InvalidName(String),
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `path`, replacing any previous object.
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, ObjectError>;

    /// Delete the object at `path`. Deleting a missing object succeeds.
    async fn delete(&self, path: &str) -> Result<(), ObjectError>;
}

/// Name a new object: `<folder>/<unix-millis>_<sanitized file name>`.
pub fn object_name(folder: &str, file_name: &str, millis: i64) -> String {
    format!("{folder}/{millis}_{}", sanitize_file_name(file_name))
}

/// Keep ASCII letters, digits, `.`, `-` and `_`; replace anything else.
pub fn sanitize_file_name(file_name: &str) -> String {
    // Browsers may send a full client-side path.
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

fn checked_name(path: &str) -> Result<&str, ObjectError> {
    let trimmed = path.trim_matches('/');
    let valid = !trimmed.is_empty()
        && trimmed
            .split('/')
            .all(|s| !s.is_empty() && s != "." && s != ".." && !s.contains('\\'));
    if valid {
        Ok(trimmed)
    } else {
        Err(ObjectError::InvalidName(path.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Hosted bucket
// ---------------------------------------------------------------------------

/// Default host of the hosted storage REST API.
pub const FIREBASE_STORAGE_HOST: &str = "https://firebasestorage.googleapis.com";

/// A hosted storage bucket reached over its REST API.
pub struct FirebaseStorage {
    client: reqwest::Client,
    host: String,
    bucket: String,
    token: Option<String>,
}

/// Metadata returned after an upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    name: String,
    #[serde(default)]
    download_tokens: Option<String>,
}

impl FirebaseStorage {
    /// * `bucket` - bucket name, e.g. `<project>.appspot.com`.
    /// * `token`  - optional bearer token for authenticated writes.
    pub fn new(bucket: impl Into<String>, token: Option<String>) -> Self {
        Self::with_host(reqwest::Client::new(), FIREBASE_STORAGE_HOST, bucket, token)
    }

    pub fn with_host(
        client: reqwest::Client,
        host: impl Into<String>,
        bucket: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            token,
        }
    }

    fn objects_url(&self) -> String {
        format!("{}/v0/b/{}/o", self.host, self.bucket)
    }

    fn object_url(&self, name: &str) -> String {
        format!("{}/{}", self.objects_url(), urlencoding::encode(name))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Public download URL for an object and its first download token.
    fn download_url(&self, name: &str, tokens: Option<&str>) -> String {
        let mut url = format!("{}?alt=media", self.object_url(name));
        if let Some(token) = tokens.and_then(|t| t.split(',').next()).filter(|t| !t.is_empty()) {
            url.push_str("&token=");
            url.push_str(token);
        }
        url
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ObjectError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ObjectError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ObjectStorage for FirebaseStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, ObjectError> {
        let name = checked_name(path)?;
        let request = self
            .client
            .post(self.objects_url())
            .query(&[("name", name)])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        let response = Self::ensure_success(self.authorize(request).send().await?).await?;
        let body = response.text().await?;
        let metadata: ObjectMetadata =
            serde_json::from_str(&body).map_err(|e| ObjectError::Decode(e.to_string()))?;

        tracing::debug!(object = %metadata.name, "Object uploaded");
        Ok(StoredObject {
            url: self.download_url(&metadata.name, metadata.download_tokens.as_deref()),
            path: metadata.name,
        })
    }

    async fn delete(&self, path: &str) -> Result<(), ObjectError> {
        let name = checked_name(path)?;
        let request = self.client.delete(self.object_url(name));
        let response = self.authorize(request).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::ensure_success(response).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Local directory
// ---------------------------------------------------------------------------

/// Objects kept as files under a directory that the server exposes at
/// `public_base`.
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn file_path(&self, name: &str) -> PathBuf {
        name.split('/').fold(self.root.clone(), |p, s| p.join(s))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<StoredObject, ObjectError> {
        let name = checked_name(path)?;
        let file = self.file_path(name);
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&file, bytes).await?;

        tracing::debug!(object = %name, file = %file.display(), "Object written");
        Ok(StoredObject {
            path: name.to_string(),
            url: format!("{}/{name}", self.public_base),
        })
    }

    async fn delete(&self, path: &str) -> Result<(), ObjectError> {
        let name = checked_name(path)?;
        match tokio::fs::remove_file(self.file_path(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
