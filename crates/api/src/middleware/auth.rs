//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use studio_core::error::CoreError;

use crate::auth::session::{token_from_cookies, validate_session};
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in operator.
///
/// Taken from `Authorization: Bearer <token>` when present, otherwise
/// from the `studio_session` cookie. Any handler that takes this
/// extractor rejects anonymous requests with 401:
///
/// ```ignore
/// async fn my_handler(operator: AuthOperator) -> AppResult<Json<()>> {
///     tracing::info!(operator = %operator.uid, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthOperator {
    pub uid: String,
    pub email: String,
    /// Expiry of the presented session (UTC Unix timestamp).
    pub expires_at: i64,
}

impl FromRequestParts<AppState> for AuthOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTHORIZATION) {
            Some(header) => header
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization format. Expected: Bearer <token>".into(),
                    ))
                })?,
            None => token_from_cookies(&parts.headers).ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Sign in required".into()))
            })?,
        };

        let claims = validate_session(token, &state.config.session).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        Ok(AuthOperator {
            uid: claims.sub,
            email: claims.email,
            expires_at: claims.exp,
        })
    }
}
