use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use studio_core::collection::Collection;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the content store answered a read.
    pub store_healthy: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = match state.store.get(&Collection::Profile.path()).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check read failed");
            false
        }
    };

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_healthy,
    })
}

/// Mounted at the root, outside `/api/v1`, for load balancer checks.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
