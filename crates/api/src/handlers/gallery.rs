//! Admin handlers for the gallery collection.
//!
//! New items go through the external upload endpoint first; the record is
//! then written under the id that endpoint returned.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use studio_core::collection::Collection;
use studio_core::content::{Category, GalleryItem, MediaType};
use studio_core::forms::GalleryUploadForm;

use super::multipart::read_form;
use super::{load_collection, load_record, to_record};
use crate::error::AppResult;
use crate::middleware::auth::AuthOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/gallery
///
/// Newest first, read straight from the store.
pub async fn list_gallery(
    _operator: AuthOperator,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<GalleryItem>>>> {
    let items = load_collection(state.store.as_ref(), Collection::Gallery).await?;
    Ok(Json(DataResponse::new(items)))
}

/// POST /api/v1/admin/gallery
///
/// Multipart fields: `file`, `title`, `category`, `type`.
pub async fn upload_gallery_item(
    operator: AuthOperator,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let fields = read_form(multipart).await?;
    let form = GalleryUploadForm {
        title: fields.text("title").to_string(),
        category: fields.text_or("category", Category::Wedding.as_str()).parse()?,
        media_type: fields.text_or("type", MediaType::Image.as_str()).parse()?,
        file: fields.file,
    };
    let file = form.validate()?;

    let receipt = state
        .uploader
        .upload(file, form.title.trim(), form.category.as_str())
        .await?;

    let record = form.to_record(receipt.url);
    state
        .store
        .set(&Collection::Gallery.record_path(&receipt.id), to_record(&record)?)
        .await?;

    tracing::info!(
        operator = %operator.uid,
        id = %receipt.id,
        category = %record.category,
        "Gallery item added",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(record.into_item(receipt.id))),
    ))
}

/// DELETE /api/v1/admin/gallery/{id}
///
/// Only the record is removed; the uploaded file stays with the endpoint.
pub async fn delete_gallery_item(
    operator: AuthOperator,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    load_record(state.store.as_ref(), Collection::Gallery, "Gallery item", &id).await?;
    state.store.remove(&Collection::Gallery.record_path(&id)).await?;

    tracing::info!(operator = %operator.uid, id = %id, "Gallery item deleted");

    Ok(StatusCode::NO_CONTENT)
}
