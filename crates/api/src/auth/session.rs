//! Operator session tokens.
//!
//! A session is an HS256-signed JWT carrying the operator's uid and email.
//! It is handed out on login, both in the response body and as an
//! HTTP-only cookie, and checked on every admin request.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use studio_store::identity::Identity;
use uuid::Uuid;

use crate::config::{env_opt, parse_env, ConfigError};

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "studio_session";

/// Default session lifetime: a working day.
const DEFAULT_SESSION_EXPIRY_MINS: i64 = 12 * 60;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Operator uid from the identity service.
    pub sub: String,
    pub email: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit logs.
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in minutes.
    pub expiry_mins: i64,
}

impl SessionConfig {
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `SESSION_SECRET`      | **yes**  | --      |
    /// | `SESSION_EXPIRY_MINS` | no       | `720`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env_opt("SESSION_SECRET").ok_or(ConfigError::Missing("SESSION_SECRET"))?;
        let expiry_mins = parse_env(
            "SESSION_EXPIRY_MINS",
            DEFAULT_SESSION_EXPIRY_MINS,
            "a whole number of minutes",
        )?;
        Ok(Self {
            secret,
            expiry_mins,
        })
    }

    /// Session lifetime in seconds.
    pub fn expires_in(&self) -> i64 {
        self.expiry_mins * 60
    }
}

/// Sign a session token for a signed-in operator.
pub fn issue_session(
    identity: &Identity,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: identity.uid.clone(),
        email: identity.email.clone(),
        exp: now + config.expires_in(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry, returning the embedded claims.
pub fn validate_session(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// `Set-Cookie` value that stores `token` for `max_age` seconds.
pub fn session_cookie(token: &str, max_age: i64) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}")
}

/// `Set-Cookie` value that removes the session cookie.
pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// The session token carried by the `Cookie` header, if any.
pub fn token_from_cookies(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
