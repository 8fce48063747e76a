use std::path::PathBuf;
use std::str::FromStr;

use studio_store::upload::DEFAULT_UPLOAD_ENDPOINT;

use crate::auth::session::SessionConfig;

/// A required setting is missing or a value does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub session: SessionConfig,
    pub backends: BackendConfig,
}

/// Which external services to talk to.
///
/// Unset hosted settings select the local stand-ins: an in-memory store,
/// a media directory, and a single configured operator.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub firebase_database_url: Option<String>,
    pub firebase_database_secret: Option<String>,
    pub firebase_api_key: Option<String>,
    pub firebase_storage_bucket: Option<String>,
    /// Bearer token for bucket writes; without one the bucket rules must
    /// allow unauthenticated uploads.
    pub firebase_storage_token: Option<String>,
    /// Gallery upload endpoint (default: `http://localhost:5000/upload`).
    pub upload_endpoint_url: String,
    /// Directory served at `/media` when no bucket is configured (default: `./media`).
    pub media_dir: PathBuf,
    /// Built site bundle served for every non-API path, if set.
    pub static_dir: Option<PathBuf>,
    pub admin_email: Option<String>,
    /// Argon2id PHC hash of the local operator's password.
    pub admin_password_hash: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                        |
    /// |-----------------------------|--------------------------------|
    /// | `HOST`                      | `0.0.0.0`                      |
    /// | `PORT`                      | `3000`                         |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                           |
    /// | `SHUTDOWN_TIMEOUT_SECS`     | `30`                           |
    /// | `SESSION_SECRET`            | required                       |
    /// | `SESSION_EXPIRY_MINS`       | `720`                          |
    /// | `FIREBASE_DATABASE_URL`     | unset: in-memory store         |
    /// | `FIREBASE_DATABASE_SECRET`  | unset                          |
    /// | `FIREBASE_API_KEY`          | unset: local operator sign-in  |
    /// | `FIREBASE_STORAGE_BUCKET`   | unset: files under `MEDIA_DIR` |
    /// | `FIREBASE_STORAGE_TOKEN`    | unset: anonymous writes        |
    /// | `UPLOAD_ENDPOINT_URL`       | `http://localhost:5000/upload` |
    /// | `MEDIA_DIR`                 | `./media`                      |
    /// | `STATIC_DIR`                | unset                          |
    /// | `ADMIN_EMAIL`               | unset                          |
    /// | `ADMIN_PASSWORD_HASH`       | unset                          |
    pub fn from_env() -> Result<Self, ConfigError> {
        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 3000, "a valid port number")?,
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30, "a whole number of seconds")?,
            shutdown_timeout_secs: parse_env(
                "SHUTDOWN_TIMEOUT_SECS",
                30,
                "a whole number of seconds",
            )?,
            session: SessionConfig::from_env()?,
            backends: BackendConfig::from_env(),
        })
    }
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self {
            firebase_database_url: env_opt("FIREBASE_DATABASE_URL"),
            firebase_database_secret: env_opt("FIREBASE_DATABASE_SECRET"),
            firebase_api_key: env_opt("FIREBASE_API_KEY"),
            firebase_storage_bucket: env_opt("FIREBASE_STORAGE_BUCKET"),
            firebase_storage_token: env_opt("FIREBASE_STORAGE_TOKEN"),
            upload_endpoint_url: env_or("UPLOAD_ENDPOINT_URL", DEFAULT_UPLOAD_ENDPOINT),
            media_dir: PathBuf::from(env_or("MEDIA_DIR", "./media")),
            static_dir: env_opt("STATIC_DIR").map(PathBuf::from),
            admin_email: env_opt("ADMIN_EMAIL"),
            admin_password_hash: env_opt("ADMIN_PASSWORD_HASH"),
        }
    }
}

/// A set, non-blank environment variable.
pub(crate) fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Parse an optional variable, falling back to `default` when unset.
pub(crate) fn parse_env<T: FromStr>(
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match env_opt(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
