//! The route guard: the four-step handshake and its terminal states.
//!
//! On every guarded command the console checks whether an identity-provider
//! session exists; if so it silently acquires an identity token, exchanges
//! it with the backend for an application access token, then fetches the
//! profile. The sequence is linear, with no backtracking and no retry; any
//! failing step collapses to the unauthenticated outcome.

use cardea_core::model::User;

use crate::backend::AuthBackend;
use crate::error::{Error, Result};
use crate::provider::IdentityProvider;
use crate::session::{Session, SessionStore};

/// Terminal state of the guard.
#[derive(Debug, Clone)]
pub enum Access {
    /// Authenticated and a system role is assigned: proceed.
    Granted(User),
    /// Authenticated but no role yet: only the account page is available;
    /// everything else renders a role-pending notice.
    RolePending(User),
    /// Not authenticated (or any handshake step failed): go log in.
    Denied,
}

impl Access {
    /// The authenticated profile, in either authenticated state.
    pub fn user(&self) -> Option<&User> {
        match self {
            Access::Granted(user) | Access::RolePending(user) => Some(user),
            Access::Denied => None,
        }
    }

    /// Whether the guard refused entry outright.
    pub fn is_denied(&self) -> bool {
        matches!(self, Access::Denied)
    }
}

/// Runs the handshake and owns the session lifecycle.
pub struct Guard<P, B> {
    provider: P,
    backend: B,
    store: SessionStore,
}

impl<P: IdentityProvider, B: AuthBackend> Guard<P, B> {
    /// Assembles a guard from its three collaborators.
    pub fn new(provider: P, backend: B, store: SessionStore) -> Self {
        Self {
            provider,
            backend,
            store,
        }
    }

    /// The session store this guard reads and writes.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Resolves the caller's access, preferring the persisted session.
    ///
    /// A stored token that still validates (the profile fetch succeeds)
    /// short-circuits the provider steps; otherwise the full handshake
    /// runs. Any failure clears the session and yields [`Access::Denied`].
    pub async fn check(&self) -> Access {
        if let Some(session) = self.store.load() {
            match self.backend.profile(&session.access_token).await {
                Ok(user) => {
                    self.persist(&session.access_token, &user);
                    return outcome(user);
                }
                Err(err) => {
                    log::debug!("stored session no longer validates: {err}");
                }
            }
        }

        match self.handshake().await {
            Ok(user) => outcome(user),
            Err(err) => {
                log::info!("handshake failed, treating as unauthenticated: {err}");
                if let Err(err) = self.store.clear() {
                    log::warn!("failed to clear session: {err}");
                }
                Access::Denied
            }
        }
    }

    /// The four-step identity-provider handshake.
    ///
    /// 1. provider session exists?
    /// 2. silently acquire an identity token
    /// 3. exchange it for an application access token
    /// 4. fetch the profile
    ///
    /// Persists both session keys on success.
    pub async fn login_sso(&self) -> Result<User> {
        self.handshake().await
    }

    /// Password login: grant, then profile fetch.
    ///
    /// Nothing is persisted until the profile fetch succeeds, so a token
    /// whose owner cannot be resolved is never kept.
    pub async fn login_password(&self, email: &str, password: &str) -> Result<User> {
        let access_token = self.backend.password_grant(email, password).await?;
        let user = self.backend.profile(&access_token).await?;
        self.persist(&access_token, &user);
        Ok(user)
    }

    /// Logs out: best-effort server call, then unconditional local clear.
    ///
    /// The session file is removed whether or not the server acknowledged
    /// the logout — a dead backend must not wedge the console into a
    /// half-authenticated state.
    pub async fn logout(&self) -> Result<()> {
        if let Some(session) = self.store.load() {
            if let Err(err) = self.backend.end_session(&session.access_token).await {
                log::warn!("server-side logout failed (session cleared anyway): {err}");
            }
        }
        self.store.clear()
    }

    async fn handshake(&self) -> Result<User> {
        if !self.provider.has_session().await {
            return Err(Error::NoProviderSession);
        }
        let identity_token = self.provider.acquire_token_silent().await?;
        let access_token = self.backend.exchange(&identity_token).await?;
        let user = self.backend.profile(&access_token).await?;
        self.persist(&access_token, &user);
        Ok(user)
    }

    fn persist(&self, access_token: &str, user: &User) {
        let session = Session {
            access_token: access_token.to_string(),
            profile: user.clone(),
        };
        if let Err(err) = self.store.save(&session) {
            // The handshake still succeeded; only warm start is lost.
            log::warn!("failed to persist session: {err}");
        }
    }
}

fn outcome(user: User) -> Access {
    if user.has_role() {
        Access::Granted(user)
    } else {
        Access::RolePending(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<&str>) -> User {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "t@example.com",
            "first_name": "T",
            "last_name": "U",
            "role": role,
            "is_active": true,
            "created_at": "2025-04-01T09:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_outcome_with_role_is_granted() {
        assert!(matches!(outcome(user(Some("USER"))), Access::Granted(_)));
    }

    #[test]
    fn test_outcome_without_role_is_pending() {
        assert!(matches!(outcome(user(None)), Access::RolePending(_)));
    }

    #[test]
    fn test_access_user_accessor() {
        let granted = Access::Granted(user(Some("USER")));
        assert_eq!(granted.user().unwrap().email, "t@example.com");
        assert!(Access::Denied.user().is_none());
        assert!(Access::Denied.is_denied());
    }
}
