//! Contract error types for content i18n
//!
//! A missing translation is not an error; it resolves to `None`.

/// Content i18n domain errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No language row carries this code
    #[error("Unknown language code: '{code}'")]
    UnknownLanguage { code: String },

    /// The language exists but has been deactivated
    #[error("Language '{code}' is not active")]
    LanguageInactive { code: String },

    /// An active language with this code already exists
    #[error("Active language already registered for code '{code}'")]
    LanguageConflict { code: String },

    /// Field is not declared for the entity type
    #[error("Field '{field_name}' is not supported for entity type '{entity_type}'")]
    UnsupportedField {
        entity_type: String,
        field_name: String,
    },

    /// Table or column name in an ordinal scope is not a plain identifier
    #[error("Invalid ordinal scope '{scope}': {details}")]
    InvalidOrdinalScope { scope: String, details: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Database failure, passed through unchanged
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ContentError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
