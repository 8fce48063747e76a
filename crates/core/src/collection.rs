//! The four store collections and snapshot-to-list translation.
//!
//! Every remote change replaces the local list wholesale. Gallery and
//! project lists are shown newest first; services keep store order.

use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::content::{GalleryItem, Profile, Project, Service};
use crate::types::RecordId;

/// Root under which all content lives.
pub const CONTENT_ROOT: &str = "admin";

/// A top-level content path in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Gallery,
    Projects,
    Services,
    Profile,
}

/// How a snapshot's entries are ordered once listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Store key order (push ids sort chronologically).
    StoreOrder,
    /// Reverse store key order.
    NewestFirst,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Gallery,
        Collection::Projects,
        Collection::Services,
        Collection::Profile,
    ];

    /// Short name used in logs and push messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::Projects => "projects",
            Self::Services => "services",
            Self::Profile => "profile",
        }
    }

    /// Store path, e.g. `admin/gallery`.
    pub fn path(self) -> String {
        format!("{CONTENT_ROOT}/{}", self.name())
    }

    /// Store path of a single record in this collection.
    pub fn record_path(self, id: &str) -> String {
        format!("{CONTENT_ROOT}/{}/{id}", self.name())
    }

    pub fn ordering(self) -> ListOrder {
        match self {
            Self::Gallery | Self::Projects => ListOrder::NewestFirst,
            Self::Services | Self::Profile => ListOrder::StoreOrder,
        }
    }
}

/// Compare two keys the way the realtime store orders children: keys that
/// parse as 32-bit integers come first in numeric order, then the rest
/// lexicographically.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<i32>(), b.parse::<i32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// List the children of a collection snapshot as `(id, value)` pairs.
///
/// A `null` snapshot (empty collection) yields an empty list. Arrays are
/// keyed by index, which is how the store reports integer-keyed children.
pub fn records_from_snapshot(snapshot: &Value, order: ListOrder) -> Vec<(RecordId, Value)> {
    let mut entries: Vec<(RecordId, Value)> = match snapshot {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v.clone()))
            .collect(),
        _ => Vec::new(),
    };
    entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    if order == ListOrder::NewestFirst {
        entries.reverse();
    }
    entries
}

/// A record type that can be rebuilt from a keyed snapshot entry.
pub trait Keyed: DeserializeOwned {
    fn set_id(&mut self, id: RecordId);
}

impl Keyed for GalleryItem {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Keyed for Project {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Keyed for Service {
    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Decode every child of `snapshot` into `T`, keyed by its store id.
///
/// Children that are not objects are skipped: the store accepts arbitrary
/// shapes and a stray scalar must not hide the rest of the collection.
pub fn decode_collection<T: Keyed>(snapshot: &Value, order: ListOrder) -> Vec<T> {
    records_from_snapshot(snapshot, order)
        .into_iter()
        .filter_map(|(id, value)| {
            if !value.is_object() {
                tracing::warn!(id = %id, "Skipping non-object record");
                return None;
            }
            match serde_json::from_value::<T>(value) {
                Ok(mut record) => {
                    record.set_id(id);
                    Some(record)
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Skipping undecodable record");
                    None
                }
            }
        })
        .collect()
}

/// Decode the profile snapshot.
///
/// Returns `None` for an empty or non-object snapshot so the caller keeps
/// whatever profile it already had.
pub fn profile_from_snapshot(snapshot: &Value) -> Option<Profile> {
    if !snapshot.is_object() {
        return None;
    }
    match serde_json::from_value::<Profile>(snapshot.clone()) {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring undecodable profile");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paths_live_under_admin() {
        assert_eq!(Collection::Gallery.path(), "admin/gallery");
        assert_eq!(Collection::Profile.path(), "admin/profile");
        assert_eq!(Collection::Services.record_path("-Nabc"), "admin/services/-Nabc");
    }

    #[test]
    fn null_snapshot_is_empty() {
        assert!(records_from_snapshot(&Value::Null, ListOrder::StoreOrder).is_empty());
    }

    #[test]
    fn newest_first_reverses_key_order() {
        let snap = json!({ "-Na": {"title": "old"}, "-Nb": {"title": "mid"}, "-Nc": {"title": "new"} });
        let ids: Vec<_> = records_from_snapshot(&snap, ListOrder::NewestFirst)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["-Nc", "-Nb", "-Na"]);
    }

    #[test]
    fn integer_keys_sort_numerically_before_strings() {
        let snap = json!({ "10": 1, "9": 2, "abc": 3 });
        let ids: Vec<_> = records_from_snapshot(&snap, ListOrder::StoreOrder)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["9", "10", "abc"]);
    }

    #[test]
    fn decode_collection_sets_ids_and_skips_scalars() {
        let snap = json!({
            "-Na": { "title": "Wedding", "category": "wedding" },
            "-Nb": "garbage",
        });
        let items: Vec<GalleryItem> = decode_collection(&snap, ListOrder::NewestFirst);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "-Na");
        assert_eq!(items[0].title, "Wedding");
    }

    #[test]
    fn services_keep_store_order() {
        let snap = json!({
            "-Na": { "title": "Wedding" },
            "-Nb": { "title": "Portrait" },
        });
        let services: Vec<Service> =
            decode_collection(&snap, Collection::Services.ordering());
        assert_eq!(services[0].title, "Wedding");
        assert_eq!(services[1].title, "Portrait");
    }

    #[test]
    fn empty_profile_snapshot_keeps_previous() {
        assert!(profile_from_snapshot(&Value::Null).is_none());
        let profile = profile_from_snapshot(&json!({ "studioName": "Shutter" })).unwrap();
        assert_eq!(profile.studio_name, "Shutter");
    }
}
