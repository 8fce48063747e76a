//! The realtime content store.
//!
//! Content lives in one JSON tree addressed by slash-separated paths
//! (`admin/gallery/<id>`). [`ContentStore`] is the seam the rest of the
//! workspace codes against; [`RealtimeDbStore`] talks to the hosted
//! database and [`MemoryStore`] keeps the tree in process.

mod backoff;
mod hosted;
mod memory;
pub mod push_id;
pub mod sse;
mod subscription;
pub mod tree;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use backoff::ReconnectConfig;
pub use hosted::RealtimeDbStore;
pub use memory::MemoryStore;
pub use subscription::Subscription;

/// Errors from the realtime store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("Store error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The store answered with something that is not the expected JSON.
    #[error("Unexpected store response: {0}")]
    Decode(String),

    /// The path cannot address a location in the store.
    #[error("Invalid store path '{0}'")]
    InvalidPath(String),
}

/// Read, write and watch locations in the content tree.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Current value at `path`, `Null` when nothing is stored there.
    async fn get(&self, path: &str) -> Result<Value, StoreError>;

    /// Overwrite the value at `path`.
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Append `value` as a new child of `path` and return the generated id.
    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError>;

    /// Overwrite only the named children of `path`.
    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError>;

    /// Delete the value at `path`.
    async fn remove(&self, path: &str) -> Result<(), StoreError>;

    /// Watch `path`. The subscription holds the latest snapshot and is
    /// released when dropped.
    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError>;
}

/// Characters the store refuses in keys.
const FORBIDDEN: [char; 5] = ['.', '#', '$', '[', ']'];

/// Validate a store path and return its segments.
///
/// The empty path addresses the root. Leading and trailing slashes are
/// ignored; empty interior segments are not.
pub fn path_segments(path: &str) -> Result<Vec<&str>, StoreError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let segments: Vec<&str> = trimmed.split('/').collect();
    let valid = segments
        .iter()
        .all(|s| !s.is_empty() && !s.contains(FORBIDDEN) && !s.chars().any(char::is_control));
    if !valid {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

/// Join a child key onto a store path.
pub(crate) fn child_path(path: &str, key: &str) -> String {
    let parent = path.trim_matches('/');
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}/{key}")
    }
}
