use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use studio_core::error::CoreError;
use studio_store::identity::IdentityError;
use studio_store::objects::ObjectError;
use studio_store::upload::{UploadError, UPLOAD_FAILED};
use studio_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps each layer's error and implements [`IntoResponse`] to produce
/// consistent `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `studio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The content store refused or could not be reached.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The external upload endpoint refused or could not be reached.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Object storage refused or could not be reached.
    #[error(transparent)]
    Objects(#[from] ObjectError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// A destructive request sent without explicit confirmation.
    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Collaborators ---
            AppError::Store(err) => classify_store_error(err),
            AppError::Upload(err) => {
                let message = match err {
                    UploadError::Rejected(msg) => msg.clone(),
                    other => {
                        tracing::error!(error = %other, "Upload endpoint failure");
                        UPLOAD_FAILED.to_string()
                    }
                };
                (StatusCode::BAD_GATEWAY, "UPLOAD_FAILED", message)
            }
            AppError::Objects(err) => match err {
                ObjectError::InvalidName(_) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string())
                }
                other => {
                    tracing::error!(error = %other, "Object storage failure");
                    (
                        StatusCode::BAD_GATEWAY,
                        "STORAGE_FAILED",
                        "Could not store the file".to_string(),
                    )
                }
            },
            AppError::Identity(err) => match err {
                IdentityError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string())
                }
                IdentityError::Unavailable(detail) => {
                    tracing::error!(error = %detail, "Identity service unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "IDENTITY_UNAVAILABLE",
                        "Sign-in is temporarily unavailable".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::ConfirmationRequired(msg) => {
                (StatusCode::CONFLICT, "CONFIRMATION_REQUIRED", msg.clone())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - An unusable path (a bad id in the URL) maps to 400.
/// - Everything else means the store is unhealthy and maps to 502 with a
///   sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::InvalidPath(path) => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            format!("Invalid record path '{path}'"),
        ),
        other => {
            tracing::error!(error = %other, "Content store error");
            (
                StatusCode::BAD_GATEWAY,
                "STORE_UNAVAILABLE",
                "The content store could not complete the request".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn domain_errors_map_to_client_statuses() {
        assert_eq!(
            status_of(AppError::Core(CoreError::NotFound {
                entity: "Service",
                id: "-S1".into()
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Validation("bad".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::ConfirmationRequired("sure?".into())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn collaborator_failures_map_to_gateway_statuses() {
        assert_eq!(
            status_of(AppError::Store(StoreError::Decode("junk".into()))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Store(StoreError::InvalidPath("a.b".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Upload(UploadError::Rejected("Disk full".into()))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Identity(IdentityError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Identity(IdentityError::Unavailable("timeout".into()))),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
