use axum::extract::State;
use axum::Json;
use serde::Serialize;
use studio_core::collection::Collection;
use studio_core::content::{GalleryItem, Profile, Project, Service};

use super::{load_collection, load_profile};
use crate::error::AppResult;
use crate::middleware::auth::AuthOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Landing view of the admin panel.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub gallery_count: usize,
    pub project_count: usize,
    pub service_count: usize,
    pub profile: Profile,
}

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    _operator: AuthOperator,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardView>>> {
    let store = state.store.as_ref();
    let gallery: Vec<GalleryItem> = load_collection(store, Collection::Gallery).await?;
    let projects: Vec<Project> = load_collection(store, Collection::Projects).await?;
    let services: Vec<Service> = load_collection(store, Collection::Services).await?;
    let profile = load_profile(store).await?;

    Ok(Json(DataResponse::new(DashboardView {
        gallery_count: gallery.len(),
        project_count: projects.len(),
        service_count: services.len(),
        profile,
    })))
}
