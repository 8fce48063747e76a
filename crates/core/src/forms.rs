//! Admin form input and its validation.
//!
//! Validation happens before any network call: an invalid form never
//! reaches the upload endpoint or the store.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::content::{
    split_list, Category, MediaType, NewGalleryItem, NewService, Profile, ServicePatch,
};
use crate::error::CoreError;

/// Icon written when the operator leaves the service icon blank.
pub const DEFAULT_SERVICE_ICON: &str = "🎯";

/// Project category preselected in the admin form.
pub const DEFAULT_PROJECT_CATEGORY: &str = "Wedding";

/// Message shown when the gallery or project form lacks a title or file.
pub const MISSING_TITLE_OR_FILE: &str = "Please select a file and enter a title.";

/// A file received from the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Gallery upload
// ---------------------------------------------------------------------------

/// The gallery upload form.
#[derive(Debug, Clone)]
pub struct GalleryUploadForm {
    pub title: String,
    pub category: Category,
    pub media_type: MediaType,
    pub file: Option<UploadFile>,
}

impl Default for GalleryUploadForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: Category::Wedding,
            media_type: MediaType::Image,
            file: None,
        }
    }
}

impl GalleryUploadForm {
    /// Require a non-blank title and a non-empty file.
    ///
    /// Returns the file so the caller can hand it to the uploader.
    pub fn validate(&self) -> Result<&UploadFile, CoreError> {
        match &self.file {
            Some(file) if !self.title.trim().is_empty() && !file.is_empty() => Ok(file),
            _ => Err(CoreError::Validation(MISSING_TITLE_OR_FILE.into())),
        }
    }

    /// Build the record stored once the upload endpoint returned `url`.
    pub fn to_record(&self, url: String) -> NewGalleryItem {
        NewGalleryItem {
            title: self.title.trim().to_string(),
            category: self.category,
            url,
            media_type: self.media_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// The project form: a titled image with free-text category and client.
#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub title: String,
    pub category: String,
    pub client: String,
    pub file: Option<UploadFile>,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: DEFAULT_PROJECT_CATEGORY.to_string(),
            client: String::new(),
            file: None,
        }
    }
}

impl ProjectForm {
    pub fn validate(&self) -> Result<&UploadFile, CoreError> {
        match &self.file {
            Some(file) if !self.title.trim().is_empty() && !file.is_empty() => Ok(file),
            _ => Err(CoreError::Validation(MISSING_TITLE_OR_FILE.into())),
        }
    }

    pub fn category_or_default(&self) -> String {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            DEFAULT_PROJECT_CATEGORY.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// The add-service form. `features` is a comma-separated list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ServiceForm {
    pub icon: String,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    pub price: String,
    pub features: String,
}

impl ServiceForm {
    /// Validate and build the record to push.
    pub fn into_service(self) -> Result<NewService, CoreError> {
        self.validate()?;
        let icon = if self.icon.trim().is_empty() {
            DEFAULT_SERVICE_ICON.to_string()
        } else {
            self.icon
        };
        Ok(NewService {
            icon,
            title: self.title,
            description: self.description,
            price: self.price,
            features: split_list(&self.features),
        })
    }
}

/// A structured edit of an existing service's title, description and price.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ServiceEdit {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,
    pub price: String,
}

impl ServiceEdit {
    pub fn into_patch(self) -> Result<ServicePatch, CoreError> {
        self.validate()?;
        Ok(ServicePatch {
            title: self.title,
            description: self.description,
            price: self.price,
        })
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The profile form. Saving replaces the whole profile record.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileForm {
    pub username: String,
    #[validate(custom(function = "email_shape", message = "Email must contain '@'"))]
    pub email: String,
    pub phone: String,
    pub studio_name: String,
    pub address: String,
    pub description: String,
}

impl ProfileForm {
    pub fn into_profile(self) -> Result<Profile, CoreError> {
        self.validate()?;
        Ok(Profile {
            username: self.username,
            email: self.email,
            phone: self.phone,
            studio_name: self.studio_name,
            address: self.address,
            description: self.description,
        })
    }
}

impl From<Profile> for ProfileForm {
    fn from(p: Profile) -> Self {
        Self {
            username: p.username,
            email: p.email,
            phone: p.phone,
            studio_name: p.studio_name,
            address: p.address,
            description: p.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn email_shape(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && !value.contains('@') {
        return Err(ValidationError::new("email"));
    }
    Ok(())
}
