//! Admin handlers for the services collection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use studio_core::collection::{Collection, Keyed};
use studio_core::content::Service;
use studio_core::forms::{ServiceEdit, ServiceForm};

use super::{load_collection, load_record, to_record};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `DELETE /admin/services/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

/// GET /api/v1/admin/services
pub async fn list_services(
    _operator: AuthOperator,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = load_collection(state.store.as_ref(), Collection::Services).await?;
    Ok(Json(DataResponse::new(services)))
}

/// POST /api/v1/admin/services
pub async fn create_service(
    operator: AuthOperator,
    State(state): State<AppState>,
    Json(input): Json<ServiceForm>,
) -> AppResult<impl IntoResponse> {
    let record = input.into_service()?;
    let id = state
        .store
        .push(&Collection::Services.path(), to_record(&record)?)
        .await?;

    tracing::info!(operator = %operator.uid, id = %id, title = %record.title, "Service added");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(record.into_service(id))),
    ))
}

/// PUT /api/v1/admin/services/{id}
///
/// Merges title, description and price; icon and features are kept.
pub async fn update_service(
    operator: AuthOperator,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ServiceEdit>,
) -> AppResult<Json<DataResponse<Service>>> {
    let patch = input.into_patch()?;
    load_record(state.store.as_ref(), Collection::Services, "Service", &id).await?;

    let fields = match to_record(&patch)? {
        Value::Object(fields) => fields,
        _ => return Err(AppError::InternalError("Service patch is not an object".into())),
    };
    let path = Collection::Services.record_path(&id);
    state.store.update(&path, fields).await?;

    let updated = state.store.get(&path).await?;
    let mut service: Service = serde_json::from_value(updated)
        .map_err(|e| AppError::InternalError(format!("Stored service is malformed: {e}")))?;
    service.set_id(id.clone());

    tracing::info!(operator = %operator.uid, id = %id, "Service updated");

    Ok(Json(DataResponse::new(service)))
}

/// DELETE /api/v1/admin/services/{id}?confirm=true
///
/// Without `confirm=true` nothing is written and 409 is returned.
pub async fn delete_service(
    operator: AuthOperator,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> AppResult<StatusCode> {
    if !params.confirm {
        return Err(AppError::ConfirmationRequired(
            "Are you sure you want to delete this service? Repeat with ?confirm=true".into(),
        ));
    }

    load_record(state.store.as_ref(), Collection::Services, "Service", &id).await?;
    state.store.remove(&Collection::Services.record_path(&id)).await?;

    tracing::info!(operator = %operator.uid, id = %id, "Service deleted");

    Ok(StatusCode::NO_CONTENT)
}
