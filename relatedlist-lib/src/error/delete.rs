//! Delete error types

/// Errors that can occur while deleting a related record.
///
/// Delete errors are surfaced as a transient notice; the record set is left
/// unchanged (no optimistic removal before confirmed success).
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeleteError {
    /// The current user may not delete records of this type.
    #[error("Delete not permitted for '{object}'")]
    Denied {
        /// The object type the delete was attempted on.
        object: String,
    },

    /// The record no longer exists on the server.
    #[error("Record '{record_id}' not found")]
    NotFound {
        /// The id of the missing record.
        record_id: String,
    },

    /// The delete request failed on the platform side.
    #[error("Delete failed: {message}")]
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl DeleteError {
    /// Creates a new denied error.
    pub fn denied(object: impl Into<String>) -> Self {
        Self::Denied {
            object: object.into(),
        }
    }

    /// Creates a new not-found error.
    pub fn not_found(record_id: impl Into<String>) -> Self {
        Self::NotFound {
            record_id: record_id.into(),
        }
    }

    /// Creates a new generic failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns a human-readable message for the transient notice.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
