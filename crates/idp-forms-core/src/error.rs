//! Core error types for idp-forms.
//!
//! Rendering never fails: validation problems are advisory and end up as
//! inline messages. [`FormsError`] covers the remaining failure modes, which
//! are all programmatic (bad configuration, events aimed at fields that do
//! not exist, values of the wrong shape).

use thiserror::Error;

/// The shape a stored form value is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A single string.
    Text,
    /// A list of strings (checkbox groups).
    List,
    /// A boolean (toggles).
    Flag,
}

impl std::fmt::Display for ValueShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::List => "list",
            Self::Flag => "flag",
        };
        write!(f, "{name}")
    }
}

/// The primary error type for idp-forms.
#[derive(Error, Debug)]
pub enum FormsError {
    // ── Form state ───────────────────────────────────────────────────

    /// An event or lookup referenced a field name the form does not define.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A stored value does not have the shape its field kind requires.
    #[error("Field '{name}' expected a {expected} value")]
    ValueShapeMismatch {
        /// The field name.
        name: String,
        /// The shape the field kind requires.
        expected: ValueShape,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A translation catalog could not be loaded.
    #[error("Translation catalog error: {0}")]
    CatalogError(String),

    // ── Serialization / IO ───────────────────────────────────────────

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for FormsError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormsError>`.
pub type FormsResult<T> = Result<T, FormsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_display() {
        let err = FormsError::UnknownField("email".into());
        assert_eq!(err.to_string(), "Unknown field: email");
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = FormsError::ValueShapeMismatch {
            name: "roles".into(),
            expected: ValueShape::List,
        };
        assert_eq!(err.to_string(), "Field 'roles' expected a list value");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FormsError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FormsError = json_err.into();
        assert!(matches!(err, FormsError::SerializationError(_)));
    }
}
