//! Handlers for the `/auth` resource (login, session, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_store::identity::IdentityError;

use crate::auth::session::{cleared_session_cookie, issue_session, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthOperator;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub operator: OperatorInfo,
}

#[derive(Debug, Serialize)]
pub struct OperatorInfo {
    pub uid: String,
    pub email: String,
}

/// Response for `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub operator: OperatorInfo,
    /// Session expiry (UTC Unix timestamp).
    pub expires_at: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Check the credentials with the identity service and open a session.
/// The token is returned in the body and set as an HTTP-only cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::Identity(IdentityError::InvalidCredentials));
    }

    let identity = match state.identity.sign_in(input.email.trim(), &input.password).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(email = %input.email.trim(), error = %e, "Sign-in rejected");
            return Err(e.into());
        }
    };

    let session = &state.config.session;
    let token = issue_session(&identity, session)
        .map_err(|e| AppError::InternalError(format!("Session signing error: {e}")))?;

    tracing::info!(operator = %identity.uid, "Operator signed in");

    let cookie = session_cookie(&token, session.expires_in());
    let body = LoginResponse {
        token,
        expires_in: session.expires_in(),
        operator: OperatorInfo {
            uid: identity.uid,
            email: identity.email,
        },
    };

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(DataResponse::new(body)),
    ))
}

/// GET /api/v1/auth/session
///
/// Re-check the presented session; 401 when it is missing or expired.
pub async fn session(operator: AuthOperator) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse::new(SessionInfo {
        operator: OperatorInfo {
            uid: operator.uid,
            email: operator.email,
        },
        expires_at: operator.expires_at,
    }))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie. Tokens are stateless, so a copied bearer
/// token stays valid until it expires.
pub async fn logout() -> impl IntoResponse {
    tracing::debug!("Session cookie cleared");
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, cleared_session_cookie())]),
    )
}
