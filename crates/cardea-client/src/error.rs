//! Error types for cardea-client.
//!
//! Failures are categorized by HTTP status only: 403 and 404 get dedicated
//! variants because the pages render dedicated messages for them; every
//! other non-2xx response collapses into [`Error::Api`]. There is no retry
//! and no backoff anywhere in this crate.

use thiserror::Error;

/// Result type alias for cardea-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the Cardea API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from cardea-core
    #[error("Core error: {0}")]
    Core(#[from] cardea_core::Error),

    /// Transport-level failure: connect, timeout, or body decode.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 401 — the token is missing, expired, or rejected.
    #[error("Not authenticated")]
    Unauthorized,

    /// HTTP 403 — authenticated but not allowed.
    #[error("Access denied")]
    AccessDenied,

    /// HTTP 404 — the resource does not exist.
    #[error("Not found")]
    NotFound,

    /// Any other non-2xx response.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// The response status code.
        status: u16,
        /// The server's `detail` message, or a generic fallback.
        message: String,
    },
}

impl Error {
    /// Maps a non-success status code to its error variant.
    ///
    /// `detail` is the server's explanation when the body carried one.
    pub(crate) fn from_status(status: u16, detail: Option<String>) -> Self {
        match status {
            401 => Error::Unauthorized,
            403 => Error::AccessDenied,
            404 => Error::NotFound,
            _ => Error::Api {
                status,
                message: detail.unwrap_or_else(|| "request failed".to_string()),
            },
        }
    }

    /// Whether this is the 404 case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }

    /// Whether this is the 403 case.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Error::AccessDenied)
    }

    /// Whether the guard should treat this as a failed handshake step.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(Error::from_status(401, None), Error::Unauthorized));
        assert!(Error::from_status(403, None).is_access_denied());
        assert!(Error::from_status(404, None).is_not_found());
    }

    #[test]
    fn test_other_statuses_keep_detail() {
        let err = Error::from_status(422, Some("severity_score must be 1-5".to_string()));
        let Error::Api { status, message } = err else {
            unreachable!("Expected Api variant");
        };
        assert_eq!(status, 422);
        assert_eq!(message, "severity_score must be 1-5");
    }

    #[test]
    fn test_other_statuses_without_detail_get_fallback() {
        let err = Error::from_status(500, None);
        assert_eq!(err.to_string(), "API error (HTTP 500): request failed");
    }

    #[test]
    fn test_auth_failure_classification() {
        assert!(Error::from_status(401, None).is_auth_failure());
        assert!(Error::from_status(403, None).is_auth_failure());
        assert!(!Error::from_status(404, None).is_auth_failure());
        assert!(!Error::from_status(500, None).is_auth_failure());
    }
}
