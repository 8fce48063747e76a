//! Content records stored under the `admin/*` collections.
//!
//! The store accepts arbitrary shapes, so decoding is lenient: every
//! attribute may be missing or carry an unexpected scalar type. Each entity
//! has a read model (keyed by its store id) and a write DTO without the id,
//! since the id is the record's key rather than one of its attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::collection::compare_keys;
use crate::error::CoreError;
use crate::types::RecordId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Gallery categories offered by the studio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Wedding,
    Portrait,
    Event,
    Commercial,
    Creative,
    Video,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Wedding,
        Category::Portrait,
        Category::Event,
        Category::Commercial,
        Category::Creative,
        Category::Video,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Portrait => "portrait",
            Self::Event => "event",
            Self::Commercial => "commercial",
            Self::Creative => "creative",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown category '{s}'. Must be one of: wedding, portrait, event, commercial, creative, video"
                ))
            })
    }
}

/// Media kind of a gallery item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl FromStr for MediaType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(CoreError::Validation(format!(
                "Unknown media type '{other}'. Must be one of: image, video"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// A gallery record from `admin/gallery`.
///
/// `category` keeps the raw stored string so filtering compares exactly what
/// the store holds; use [`GalleryItem::category`] for the typed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryItem {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "category", deserialize_with = "lenient_string")]
    pub category_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub media_type: String,
}

impl GalleryItem {
    /// Typed category, if the stored string names one.
    pub fn category(&self) -> Option<Category> {
        self.category_name.parse().ok()
    }
}

/// Write DTO for a gallery record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGalleryItem {
    pub title: String,
    pub category: Category,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

impl NewGalleryItem {
    /// The read model this record becomes once stored under `id`.
    pub fn into_item(self, id: RecordId) -> GalleryItem {
        GalleryItem {
            id,
            title: self.title,
            category_name: self.category.as_str().to_string(),
            url: self.url,
            media_type: self.media_type.as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// A portfolio project from `admin/projects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub client: String,
    #[serde(rename = "image", deserialize_with = "lenient_string")]
    pub image_url: String,
    /// Object-store path of the uploaded image, when the server stored it.
    #[serde(
        rename = "imagePath",
        deserialize_with = "lenient_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub image_path: String,
}

/// Write DTO for a project record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub category: String,
    pub client: String,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(rename = "imagePath")]
    pub image_path: String,
}

impl NewProject {
    pub fn into_project(self, id: RecordId) -> Project {
        Project {
            id,
            title: self.title,
            category: self.category,
            client: self.client,
            image_url: self.image_url,
            image_path: self.image_path,
        }
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// A service offering from `admin/services`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient_string")]
    pub icon: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(deserialize_with = "lenient_strings")]
    pub features: Vec<String>,
}

/// Write DTO for a service record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewService {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub features: Vec<String>,
}

impl NewService {
    pub fn into_service(self, id: RecordId) -> Service {
        Service {
            id,
            icon: self.icon,
            title: self.title,
            description: self.description,
            price: self.price,
            features: self.features,
        }
    }
}

/// Fields merged into an existing service on edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicePatch {
    pub title: String,
    pub description: String,
    pub price: String,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Default studio name used when the profile leaves it blank.
pub const DEFAULT_STUDIO_NAME: &str = "Dev Studio";
/// Default contact phone used when the profile leaves it blank.
pub const DEFAULT_PHONE: &str = "0795926508";
/// Default contact email used when the profile leaves it blank.
pub const DEFAULT_EMAIL: &str = "isingizwebonheur@gmail.com";

/// The singleton studio profile at `admin/profile`.
///
/// Saved as a whole; there are no partial-field updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub studio_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: DEFAULT_EMAIL.to_string(),
            phone: DEFAULT_PHONE.to_string(),
            studio_name: DEFAULT_STUDIO_NAME.to_string(),
            address: "123 Creative Avenue, Studio City, SC 90210".to_string(),
            description: String::new(),
        }
    }
}

impl Profile {
    pub fn studio_name_or_default(&self) -> &str {
        non_blank(&self.studio_name).unwrap_or(DEFAULT_STUDIO_NAME)
    }

    pub fn phone_or_default(&self) -> &str {
        non_blank(&self.phone).unwrap_or(DEFAULT_PHONE)
    }

    pub fn email_or_default(&self) -> &str {
        non_blank(&self.email).unwrap_or(DEFAULT_EMAIL)
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// ---------------------------------------------------------------------------
// Lenient decoding helpers
// ---------------------------------------------------------------------------

/// Accept strings, numbers, and booleans as text; anything else is empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

/// Accept an array of scalars or a single comma-separated string.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        // The store may hold arrays as index-keyed objects.
        serde_json::Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            entries.into_iter().filter_map(|(_, v)| scalar_text(v)).collect()
        }
        serde_json::Value::String(s) => split_list(&s),
        _ => Vec::new(),
    })
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Split a comma-separated list, trimming each entry.
///
/// An empty input yields an empty list; interior empty entries are kept,
/// matching what an operator typed.
pub fn split_list(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(',').map(|f| f.trim().to_string()).collect()
}
