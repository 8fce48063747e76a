//! Operator sign-in.
//!
//! [`PasswordSignIn`] delegates to the hosted email/password identity
//! service. [`StaticIdentity`] checks a single configured operator
//! locally.

pub mod password;

use async_trait::async_trait;
pub use password::{OperatorPassword, PasswordError};
use serde::{Deserialize, Serialize};

/// A signed-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Wrong email or password, or the account cannot sign in.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The identity service could not be asked.
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError>;
}

// ---------------------------------------------------------------------------
// Hosted email/password sign-in
// ---------------------------------------------------------------------------

/// Default host of the hosted identity REST API.
pub const IDENTITY_TOOLKIT_HOST: &str = "https://identitytoolkit.googleapis.com";

pub struct PasswordSignIn {
    client: reqwest::Client,
    host: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: String,
}

impl PasswordSignIn {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_host(reqwest::Client::new(), IDENTITY_TOOLKIT_HOST, api_key)
    }

    pub fn with_host(
        client: reqwest::Client,
        host: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for PasswordSignIn {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        let response = self
            .client
            .post(format!("{}/v1/accounts:signInWithPassword", self.host))
            .query(&[("key", &self.api_key)])
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "Sign-in rejected");
            return Err(IdentityError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(IdentityError::Unavailable(format!(
                "identity service returned {status}"
            )));
        }

        let body: SignInResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
        Ok(Identity {
            uid: body.local_id,
            email: if body.email.is_empty() {
                email.to_string()
            } else {
                body.email
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Single configured operator
// ---------------------------------------------------------------------------

/// One operator whose Argon2id hash is known locally.
pub struct StaticIdentity {
    email: String,
    password: OperatorPassword,
}

impl StaticIdentity {
    pub fn new(email: impl Into<String>, password: OperatorPassword) -> Self {
        Self {
            email: email.into().trim().to_lowercase(),
            password,
        }
    }

    /// Stable uid derived from the operator email.
    fn uid(&self) -> String {
        format!("local:{}", self.email)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, IdentityError> {
        if email.trim().to_lowercase() != self.email {
            return Err(IdentityError::InvalidCredentials);
        }

        let attempt = password.to_string();
        let stored = self.password.clone();
        let verified = tokio::task::spawn_blocking(move || stored.matches(&attempt))
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        if !verified {
            return Err(IdentityError::InvalidCredentials);
        }
        Ok(Identity {
            uid: self.uid(),
            email: self.email.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn static_identity_accepts_configured_operator() {
        let identity = StaticIdentity::new("Admin@Studio.test", OperatorPassword::hash("pw-123").unwrap());

        let who = identity.sign_in(" admin@studio.test ", "pw-123").await.unwrap();
        assert_eq!(who.email, "admin@studio.test");
        assert_eq!(who.uid, "local:admin@studio.test");

        assert_matches!(
            identity.sign_in("admin@studio.test", "nope").await,
            Err(IdentityError::InvalidCredentials)
        );
        assert_matches!(
            identity.sign_in("other@studio.test", "pw-123").await,
            Err(IdentityError::InvalidCredentials)
        );
    }

    async fn hosted(status: u16, body: serde_json::Value) -> (MockServer, PasswordSignIn) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", "api-key"))
            .and(body_partial_json(json!({ "email": "a@b.c", "returnSecureToken": true })))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        let client = PasswordSignIn::with_host(reqwest::Client::new(), server.uri(), "api-key");
        (server, client)
    }

    #[tokio::test]
    async fn hosted_sign_in_returns_uid() {
        let (_server, client) =
            hosted(200, json!({ "localId": "uid-1", "email": "a@b.c", "idToken": "t" })).await;
        let who = client.sign_in("a@b.c", "pw").await.unwrap();
        assert_eq!(who, Identity { uid: "uid-1".into(), email: "a@b.c".into() });
    }

    #[tokio::test]
    async fn hosted_client_errors_are_invalid_credentials() {
        let (_server, client) =
            hosted(400, json!({ "error": { "message": "INVALID_PASSWORD" } })).await;
        assert_matches!(
            client.sign_in("a@b.c", "pw").await,
            Err(IdentityError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn hosted_server_errors_are_unavailable() {
        let (_server, client) = hosted(503, json!({})).await;
        assert_matches!(client.sign_in("a@b.c", "pw").await, Err(IdentityError::Unavailable(_)));
    }
}
