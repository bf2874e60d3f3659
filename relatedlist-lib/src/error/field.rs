//! FieldError for Record accessors

/// Error type for field access operations on a record.
///
/// Field errors are always recovered locally: the sort engine maps them to a
/// null sort key and ingestion skips the affected derived field.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// The requested field does not exist in the record.
    #[error("Field '{field}' not found in record")]
    Missing {
        /// The missing field name.
        field: String,
    },

    /// The field exists but has a different type than requested.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The field name.
        field: String,
        /// The requested type.
        expected: &'static str,
        /// The actual type found.
        actual: &'static str,
    },

    /// A dotted path tried to traverse through a non-container value.
    #[error("Field '{field}' is not a nested record, cannot resolve '{path}'")]
    NotAContainer {
        /// The container field name.
        field: String,
        /// The full dotted path being resolved.
        path: String,
    },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates a new traversal error for a dotted path.
    pub fn not_a_container(field: impl Into<String>, path: impl Into<String>) -> Self {
        Self::NotAContainer {
            field: field.into(),
            path: path.into(),
        }
    }
}
