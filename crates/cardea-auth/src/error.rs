//! Auth-specific error types.

/// Errors that can occur during the authentication handshake.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No identity-provider session is cached; interactive login required.
    #[error("no identity-provider session; run `cardea login` first")]
    NoProviderSession,

    /// The provider refused to mint a token silently.
    #[error("silent token acquisition failed: {0}")]
    TokenAcquisition(String),

    /// The backend rejected the identity token during exchange.
    #[error("token exchange rejected: {0}")]
    Exchange(String),

    /// The backend rejected the access token when fetching the profile.
    #[error("profile fetch failed: {0}")]
    Profile(String),

    /// Password login was rejected.
    #[error("login failed: {0}")]
    Login(String),

    /// Session file could not be read or written.
    #[error("session store error: {0}")]
    Store(#[from] std::io::Error),

    /// Session file or provider cache held unparseable JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for cardea-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the failure belongs to the handshake itself (as opposed to
    /// local I/O). Handshake failures all collapse to "unauthenticated".
    pub fn is_handshake_failure(&self) -> bool {
        matches!(
            self,
            Error::NoProviderSession
                | Error::TokenAcquisition(_)
                | Error::Exchange(_)
                | Error::Profile(_)
                | Error::Login(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_failure_classification() {
        assert!(Error::NoProviderSession.is_handshake_failure());
        assert!(Error::Exchange("401".into()).is_handshake_failure());
        assert!(Error::Profile("401".into()).is_handshake_failure());
        // Local I/O problems are not handshake outcomes.
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!Error::Store(io).is_handshake_failure());
    }

    #[test]
    fn test_display_names_the_step() {
        assert_eq!(
            Error::TokenAcquisition("expired".into()).to_string(),
            "silent token acquisition failed: expired"
        );
        assert_eq!(
            Error::Exchange("HTTP 401".into()).to_string(),
            "token exchange rejected: HTTP 401"
        );
    }
}
