//! Admin handlers for portfolio projects.
//!
//! Project images are kept in object storage under `projects/`; the record
//! remembers the object path so deleting a project can remove its image.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use studio_core::collection::Collection;
use studio_core::content::{NewProject, Project};
use studio_core::error::CoreError;
use studio_core::forms::ProjectForm;
use studio_store::objects::object_name;

use super::multipart::read_form;
use super::{load_collection, load_record, to_record};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Object storage folder for project images.
const PROJECT_FOLDER: &str = "projects";

/// GET /api/v1/admin/projects
pub async fn list_projects(
    _operator: AuthOperator,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = load_collection(state.store.as_ref(), Collection::Projects).await?;
    Ok(Json(DataResponse::new(projects)))
}

/// POST /api/v1/admin/projects
///
/// Multipart fields: `file`, `title`, `category`, `client`. The file must
/// start with a recognised image signature.
pub async fn create_project(
    operator: AuthOperator,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let fields = read_form(multipart).await?;
    let form = ProjectForm {
        title: fields.text("title").to_string(),
        category: fields.text("category").to_string(),
        client: fields.text("client").trim().to_string(),
        file: fields.file,
    };
    let file = form.validate()?;

    let format = image::guess_format(&file.bytes).map_err(|_| {
        AppError::Core(CoreError::Validation(
            "Project file must be an image".into(),
        ))
    })?;

    let path = object_name(PROJECT_FOLDER, &file.file_name, Utc::now().timestamp_millis());
    let stored = state
        .objects
        .put(&path, file.bytes.clone(), format.to_mime_type())
        .await?;

    let record = NewProject {
        title: form.title.trim().to_string(),
        category: form.category_or_default(),
        client: form.client.clone(),
        image_url: stored.url,
        image_path: stored.path,
    };
    let id = match state
        .store
        .push(&Collection::Projects.path(), to_record(&record)?)
        .await
    {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(path = %record.image_path, "Project image stored without a record");
            return Err(e.into());
        }
    };

    tracing::info!(operator = %operator.uid, id = %id, "Project added");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(record.into_project(id))),
    ))
}

/// DELETE /api/v1/admin/projects/{id}
///
/// Removes the record, then tries to delete the stored image. A failed
/// image delete is logged and does not fail the request.
pub async fn delete_project(
    operator: AuthOperator,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let value = load_record(state.store.as_ref(), Collection::Projects, "Project", &id).await?;
    let image_path = value
        .get("imagePath")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    state.store.remove(&Collection::Projects.record_path(&id)).await?;

    if !image_path.is_empty() {
        if let Err(e) = state.objects.delete(&image_path).await {
            tracing::warn!(id = %id, path = %image_path, error = %e, "Project image not deleted");
        }
    }

    tracing::info!(operator = %operator.uid, id = %id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}
