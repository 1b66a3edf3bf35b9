use thiserror::Error;

/// Rejection raised while turning a request body into a validated record.
/// Always raised before the store is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    Malformed(String),

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Field '{field}' {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid ID format for '{field}': {value}")]
    InvalidReference { field: &'static str, value: String },
}

impl ValidationError {
    pub fn is_reference_error(&self) -> bool {
        matches!(self, ValidationError::InvalidReference { .. })
    }
}
