//! Common test utilities for the auth integration tests.
//!
//! Provides scriptable in-memory stand-ins for the identity provider and
//! the backend, so every guard path can be driven without a network.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use cardea_auth::{AuthBackend, Error, IdentityProvider, Result, SessionStore};
use cardea_core::model::User;

/// A user profile with (or without) a system role.
pub fn profile(role: Option<&str>) -> User {
    serde_json::from_value(serde_json::json!({
        "id": 7,
        "email": "nila@example.com",
        "first_name": "Nila",
        "last_name": "Osei",
        "role": role,
        "is_active": true,
        "created_at": "2025-04-01T09:00:00Z"
    }))
    .unwrap()
}

/// A session store rooted in a fresh temp directory.
pub fn temp_store() -> (tempfile::TempDir, SessionStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    (dir, store)
}

/// Scriptable identity provider.
pub struct MockProvider {
    session: bool,
    token: Option<String>,
}

impl MockProvider {
    /// A provider with a session that mints `identity-token`.
    pub fn with_session() -> Self {
        Self {
            session: true,
            token: Some("identity-token".to_string()),
        }
    }

    /// No provider session at all (handshake step 1 fails).
    pub fn without_session() -> Self {
        Self {
            session: false,
            token: None,
        }
    }

    /// A session exists but silent acquisition is refused (step 2 fails).
    pub fn refusing_silent() -> Self {
        Self {
            session: true,
            token: None,
        }
    }
}

impl IdentityProvider for MockProvider {
    fn has_session(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        let session = self.session;
        Box::pin(async move { session })
    }

    fn acquire_token_silent(&self) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        let token = self.token.clone();
        Box::pin(async move {
            token.ok_or_else(|| Error::TokenAcquisition("interaction required".to_string()))
        })
    }
}

/// Scriptable backend, recording every call it receives.
pub struct MockBackend {
    exchange_ok: bool,
    profile: Option<User>,
    logout_ok: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    /// Every step succeeds, resolving to `user`.
    pub fn happy(user: User) -> Self {
        Self {
            exchange_ok: true,
            profile: Some(user),
            logout_ok: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Token exchange is rejected (step 3 fails).
    pub fn rejecting_exchange() -> Self {
        Self {
            exchange_ok: false,
            profile: None,
            logout_ok: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Exchange succeeds but the profile fetch is rejected (step 4 fails).
    pub fn rejecting_profile() -> Self {
        Self {
            exchange_ok: true,
            profile: None,
            logout_ok: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Like `happy`, but the server-side logout call errors.
    pub fn failing_logout(user: User) -> Self {
        Self {
            logout_ok: false,
            ..Self::happy(user)
        }
    }

    /// Handle onto the recorded call log.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl AuthBackend for MockBackend {
    fn password_grant(
        &self,
        email: &str,
        _password: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        self.record(format!("password_grant:{email}"));
        let ok = self.exchange_ok;
        Box::pin(async move {
            if ok {
                Ok("app-token".to_string())
            } else {
                Err(Error::Login("bad credentials".to_string()))
            }
        })
    }

    fn exchange(
        &self,
        identity_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        self.record(format!("exchange:{identity_token}"));
        let ok = self.exchange_ok;
        Box::pin(async move {
            if ok {
                Ok("app-token".to_string())
            } else {
                Err(Error::Exchange("HTTP 401".to_string()))
            }
        })
    }

    fn profile(
        &self,
        access_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<User>> + Send + '_>> {
        self.record(format!("profile:{access_token}"));
        let profile = self.profile.clone();
        Box::pin(async move {
            profile.ok_or_else(|| Error::Profile("HTTP 401".to_string()))
        })
    }

    fn end_session(
        &self,
        access_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        self.record(format!("end_session:{access_token}"));
        let ok = self.logout_ok;
        Box::pin(async move {
            if ok {
                Ok(())
            } else {
                Err(Error::Exchange("HTTP 503".to_string()))
            }
        })
    }
}
