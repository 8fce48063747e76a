use axum::extract::State;
use axum::Json;
use studio_core::collection::Collection;
use studio_core::content::Profile;
use studio_core::forms::ProfileForm;

use super::{load_profile, to_record};
use crate::error::AppResult;
use crate::middleware::auth::AuthOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/profile
///
/// The stored profile, or the defaults when none was saved yet.
pub async fn get_profile(
    _operator: AuthOperator,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = load_profile(state.store.as_ref()).await?;
    Ok(Json(DataResponse::new(profile)))
}

/// PUT /api/v1/admin/profile
///
/// Replaces the whole profile record.
pub async fn save_profile(
    operator: AuthOperator,
    State(state): State<AppState>,
    Json(input): Json<ProfileForm>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = input.into_profile()?;
    state
        .store
        .set(&Collection::Profile.path(), to_record(&profile)?)
        .await?;

    tracing::info!(operator = %operator.uid, "Profile saved");

    Ok(Json(DataResponse::new(profile)))
}
