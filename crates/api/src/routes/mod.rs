pub mod admin;
pub mod auth;
pub mod health;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                       login (public)
/// /auth/session                     current session (requires auth)
/// /auth/logout                      clear the session cookie
///
/// /site                             page view model (public)
/// /site/gallery                     filtered gallery
/// /site/booking                     booking deep link
/// /site/live                        WebSocket content push
///
/// /admin/dashboard                  counts and profile (requires auth)
/// /admin/gallery                    list, upload
/// /admin/gallery/{id}               delete
/// /admin/projects                   list, create
/// /admin/projects/{id}              delete
/// /admin/services                   list, create
/// /admin/services/{id}              update, delete (?confirm=true)
/// /admin/profile                    get, save
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/site", site::router())
        .nest("/admin", admin::router())
}
