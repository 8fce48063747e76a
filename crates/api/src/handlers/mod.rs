pub mod auth;
pub mod dashboard;
pub mod gallery;
pub mod multipart;
pub mod profile;
pub mod projects;
pub mod services;
pub mod site;

use serde::Serialize;
use serde_json::Value;
use studio_core::collection::{decode_collection, profile_from_snapshot, Collection, Keyed};
use studio_core::content::Profile;
use studio_core::error::CoreError;
use studio_store::ContentStore;

use crate::error::{AppError, AppResult};

/// Read a whole collection straight from the store, in display order.
pub(crate) async fn load_collection<T: Keyed>(
    store: &dyn ContentStore,
    collection: Collection,
) -> AppResult<Vec<T>> {
    let snapshot = store.get(&collection.path()).await?;
    Ok(decode_collection(&snapshot, collection.ordering()))
}

/// Read the profile, or the defaults when none is stored.
pub(crate) async fn load_profile(store: &dyn ContentStore) -> AppResult<Profile> {
    let snapshot = store.get(&Collection::Profile.path()).await?;
    Ok(profile_from_snapshot(&snapshot).unwrap_or_default())
}

/// Read one record, failing with 404 when nothing is stored at its path.
pub(crate) async fn load_record(
    store: &dyn ContentStore,
    collection: Collection,
    entity: &'static str,
    id: &str,
) -> AppResult<Value> {
    let value = store.get(&collection.record_path(id)).await?;
    if value.is_null() {
        return Err(AppError::Core(CoreError::NotFound {
            entity,
            id: id.to_string(),
        }));
    }
    Ok(value)
}

/// Serialize a write DTO into the JSON the store keeps.
pub(crate) fn to_record<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Record serialization error: {e}")))
}
