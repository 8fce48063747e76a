//! Route definitions for the admin panel. Every handler requires a session.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::multipart::MAX_UPLOAD_BYTES;
use crate::handlers::{dashboard, gallery, profile, projects, services};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /dashboard        -> dashboard
/// GET    /gallery          -> list_gallery
/// POST   /gallery          -> upload_gallery_item (multipart)
/// DELETE /gallery/{id}     -> delete_gallery_item
/// GET    /projects         -> list_projects
/// POST   /projects         -> create_project (multipart)
/// DELETE /projects/{id}    -> delete_project
/// GET    /services         -> list_services
/// POST   /services         -> create_service
/// PUT    /services/{id}    -> update_service
/// DELETE /services/{id}    -> delete_service (?confirm=true)
/// GET    /profile          -> get_profile
/// PUT    /profile          -> save_profile
/// ```
pub fn router() -> Router<AppState> {
    let uploads = Router::new()
        .route(
            "/gallery",
            get(gallery::list_gallery).post(gallery::upload_gallery_item),
        )
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .merge(uploads)
        .route("/gallery/{id}", delete(gallery::delete_gallery_item))
        .route("/projects/{id}", delete(projects::delete_project))
        .route(
            "/services",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/services/{id}",
            put(services::update_service).delete(services::delete_service),
        )
        .route(
            "/profile",
            get(profile::get_profile).put(profile::save_profile),
        )
}
