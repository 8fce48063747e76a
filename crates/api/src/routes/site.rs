//! Route definitions for the public site.

use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/site`.
///
/// ```text
/// GET /          -> page
/// GET /gallery   -> gallery
/// GET /booking   -> booking
/// GET /live      -> live_handler (WebSocket)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(site::page))
        .route("/gallery", get(site::gallery))
        .route("/booking", get(site::booking))
        .route("/live", get(ws::live_handler))
}
