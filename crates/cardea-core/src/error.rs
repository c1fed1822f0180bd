//! Error types for cardea-core.

/// Errors that can occur in domain-level operations.
///
/// Marked `#[non_exhaustive]` to allow adding new error types without
/// breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A value failed domain validation (e.g. a score outside 1–5).
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An enum wire value that this client does not recognize.
    #[error("Unknown {kind} value: '{value}'")]
    UnknownValue {
        /// Which enumeration was being parsed
        kind: &'static str,
        /// The offending input
        value: String,
    },
}

/// Convenience `Result` type alias for cardea-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}
