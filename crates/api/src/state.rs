use std::sync::Arc;
use std::time::Instant;

use studio_store::identity::{IdentityProvider, OperatorPassword, PasswordSignIn, StaticIdentity};
use studio_store::objects::{FirebaseStorage, LocalObjectStorage, ObjectStorage};
use studio_store::upload::UploadClient;
use studio_store::{ContentFeed, ContentStore, MemoryStore, RealtimeDbStore, StoreError};
use tokio_util::sync::CancellationToken;

use crate::config::{BackendConfig, ConfigError, ServerConfig};

/// URL prefix under which locally stored objects are served.
pub const MEDIA_ROUTE: &str = "/media";

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// The realtime content store (writes and admin reads).
    pub store: Arc<dyn ContentStore>,
    /// Live ordered content (public site reads).
    pub feed: Arc<ContentFeed>,
    /// Where project images are kept.
    pub objects: Arc<dyn ObjectStorage>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Client for the external gallery upload endpoint.
    pub uploader: Arc<UploadClient>,
    /// Process start, which drives the testimonial carousel.
    pub started_at: Instant,
    /// Cancelled when the server begins shutting down.
    pub shutdown: CancellationToken,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Content feed could not start: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid HOST address '{0}'")]
    InvalidHost(String),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppState {
    /// Connect to the configured collaborators and start the content feed.
    pub async fn connect(config: ServerConfig) -> Result<Self, StartupError> {
        let backends = &config.backends;
        let store = content_store(backends);
        let objects = object_storage(backends);
        let identity = identity_provider(backends)?;
        let uploader = Arc::new(UploadClient::new(backends.upload_endpoint_url.clone()));

        let feed = Arc::new(ContentFeed::start(Arc::clone(&store)).await?);

        Ok(Self {
            config: Arc::new(config),
            store,
            feed,
            objects,
            identity,
            uploader,
            started_at: Instant::now(),
            shutdown: CancellationToken::new(),
        })
    }
}

fn content_store(backends: &BackendConfig) -> Arc<dyn ContentStore> {
    match &backends.firebase_database_url {
        Some(url) => {
            tracing::info!(url = %url, "Using hosted realtime database");
            Arc::new(RealtimeDbStore::new(
                url.clone(),
                backends.firebase_database_secret.clone(),
            ))
        }
        None => {
            tracing::warn!("FIREBASE_DATABASE_URL not set, content is kept in memory");
            Arc::new(MemoryStore::new())
        }
    }
}

fn object_storage(backends: &BackendConfig) -> Arc<dyn ObjectStorage> {
    match &backends.firebase_storage_bucket {
        Some(bucket) => {
            if backends.firebase_storage_token.is_none() {
                tracing::warn!(bucket = %bucket, "FIREBASE_STORAGE_TOKEN not set, bucket writes are anonymous");
            }
            tracing::info!(bucket = %bucket, "Using hosted object storage");
            Arc::new(FirebaseStorage::new(
                bucket.clone(),
                backends.firebase_storage_token.clone(),
            ))
        }
        None => {
            tracing::info!(dir = %backends.media_dir.display(), "Storing media on local disk");
            Arc::new(LocalObjectStorage::new(backends.media_dir.clone(), MEDIA_ROUTE))
        }
    }
}

fn identity_provider(backends: &BackendConfig) -> Result<Arc<dyn IdentityProvider>, ConfigError> {
    if let Some(api_key) = &backends.firebase_api_key {
        tracing::info!("Using hosted email/password sign-in");
        return Ok(Arc::new(PasswordSignIn::new(api_key.clone())));
    }
    match (&backends.admin_email, &backends.admin_password_hash) {
        (Some(email), Some(hash)) => {
            let password = OperatorPassword::parse(hash).map_err(|e| ConfigError::Invalid {
                name: "ADMIN_PASSWORD_HASH",
                expected: "an argon2id hash from `studio-api hash-password`",
                value: e.to_string(),
            })?;
            tracing::info!(email = %email, "Using locally configured operator");
            Ok(Arc::new(StaticIdentity::new(email.clone(), password)))
        }
        _ => Err(ConfigError::Missing(
            "FIREBASE_API_KEY (or ADMIN_EMAIL and ADMIN_PASSWORD_HASH)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn local_operator(hash: &str) -> BackendConfig {
        BackendConfig {
            admin_email: Some("owner@studio.test".into()),
            admin_password_hash: Some(hash.into()),
            ..BackendConfig::default()
        }
    }

    #[test]
    fn malformed_operator_hash_stops_startup() {
        assert_matches!(
            identity_provider(&local_operator("hunter2")).err(),
            Some(ConfigError::Invalid { name: "ADMIN_PASSWORD_HASH", .. })
        );
    }

    #[test]
    fn generated_operator_hash_is_accepted() {
        let hash = OperatorPassword::hash("hunter2").unwrap().to_string();
        assert!(identity_provider(&local_operator(&hash)).is_ok());
    }

    #[test]
    fn no_identity_settings_is_a_missing_setting() {
        assert_matches!(
            identity_provider(&BackendConfig::default()).err(),
            Some(ConfigError::Missing(_))
        );
    }
}
