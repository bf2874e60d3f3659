//! Fetch error types

/// Errors that can occur while fetching related records from the platform.
///
/// Fetch errors are surfaced to the user as an error state with a best-effort
/// human-readable message, and the record set is cleared so stale data is
/// never shown next to an error banner.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (network, timeout).
    #[error("Network error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The current user lacks access to the requested records.
    #[error("Access denied: {message}")]
    Permission {
        /// Description of the denied access.
        message: String,
    },

    /// The request was rejected as invalid by the platform.
    #[error("Invalid request: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// The response could not be interpreted.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl FetchError {
    /// Creates a new transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a new permission error.
    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Returns the human-readable message carried by this error.
    ///
    /// This is the best-effort text shown in the user-visible error state.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Permission { message }
            | Self::Validation { message }
            | Self::Parse { message, .. } => message,
        }
    }
}
