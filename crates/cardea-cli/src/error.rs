//! Error types for cardea-cli

use thiserror::Error;

/// Result type alias for cardea-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cardea-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from cardea-core
    #[error("Core error: {0}")]
    Core(#[from] cardea_core::Error),

    /// Error from cardea-client
    #[error("{0}")]
    Client(#[from] cardea_client::Error),

    /// Error from cardea-auth
    #[error("{0}")]
    Auth(#[from] cardea_auth::Error),

    /// Configuration problem (missing file, bad key, unparseable TOML)
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Local file I/O failure
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Underlying error
        source: std::io::Error,
        /// The file involved
        path: String,
    },

    /// No session; the command requires `cardea login` first
    #[error("not signed in — run `cardea login`")]
    NotSignedIn,

    /// The caller's roles do not allow the attempted operation
    #[error("access denied: {action} requires {requires}")]
    Forbidden {
        /// What was attempted
        action: &'static str,
        /// The role(s) that would allow it
        requires: &'static str,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: &std::path::Path) -> Self {
        Error::Io {
            source,
            path: path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("key 'api.port' not found");
        assert_eq!(
            err.to_string(),
            "Configuration error: key 'api.port' not found"
        );
    }

    #[test]
    fn test_forbidden_names_roles() {
        let err = Error::Forbidden {
            action: "editing risks",
            requires: "a project admin or doctor role",
        };
        assert_eq!(
            err.to_string(),
            "access denied: editing risks requires a project admin or doctor role"
        );
    }

    #[test]
    fn test_not_signed_in_mentions_login() {
        assert!(Error::NotSignedIn.to_string().contains("cardea login"));
    }
}
