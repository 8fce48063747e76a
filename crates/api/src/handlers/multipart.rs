//! Reading admin upload forms.

use std::collections::HashMap;

use axum::extract::Multipart;
use studio_core::forms::UploadFile;

use crate::error::{AppError, AppResult};

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Name of the multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Text fields plus the optional file of a multipart form.
#[derive(Debug, Default)]
pub struct FormFields {
    text: HashMap<String, String>,
    pub file: Option<UploadFile>,
}

impl FormFields {
    /// A text field's value, or `""` when it was not sent.
    pub fn text(&self, name: &str) -> &str {
        self.text.get(name).map(String::as_str).unwrap_or("")
    }

    /// A text field's value, or `default` when it was not sent or is blank.
    pub fn text_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.text(name).trim() {
            "" => default,
            value => value,
        }
    }
}

/// Drain a multipart body into [`FormFields`].
pub async fn read_form(mut multipart: Multipart) -> AppResult<FormFields> {
    let mut form = FormFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == FILE_FIELD {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Could not read file: {e}")))?;
            form.file = Some(UploadFile {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Could not read field '{name}': {e}")))?;
            form.text.insert(name, value);
        }
    }

    Ok(form)
}
