use crate::types::RecordId;

/// Domain errors. The message of a `Validation` error is shown to the
/// operator as-is.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: RecordId },

    #[error("{0}")]
    Validation(String),

    /// No usable operator session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field}: {message}")
            })
            .collect();
        CoreError::Validation(fields.join("; "))
    }
}
