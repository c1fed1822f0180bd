//! The backend half of the handshake.
//!
//! [`AuthBackend`] isolates the two backend-facing steps (token exchange,
//! profile fetch) plus the two direct credential calls (password grant,
//! server logout) behind a trait so the guard can be exercised against an
//! in-memory fake.

use std::future::Future;
use std::pin::Pin;

use cardea_client::ApiClient;
use cardea_core::model::User;

use crate::error::{Error, Result};

/// Backend operations the guard and the login/logout flows need.
pub trait AuthBackend: Send + Sync + 'static {
    /// Password login; returns the application access token.
    fn password_grant(
        &self,
        email: &str,
        password: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;

    /// Exchanges an identity-provider token for an application access token.
    fn exchange(
        &self,
        identity_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;

    /// Fetches the profile the access token belongs to.
    fn profile(
        &self,
        access_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<User>> + Send + '_>>;

    /// Server-side logout. Best effort; the session file is cleared
    /// regardless of this call's outcome.
    fn end_session(
        &self,
        access_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

impl AuthBackend for ApiClient {
    fn password_grant(
        &self,
        email: &str,
        password: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        let email = email.to_string();
        let password = password.to_string();
        Box::pin(async move {
            let grant = self
                .login(&email, &password)
                .await
                .map_err(|err| Error::Login(err.to_string()))?;
            Ok(grant.access_token)
        })
    }

    fn exchange(
        &self,
        identity_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        let identity_token = identity_token.to_string();
        Box::pin(async move {
            let grant = self
                .exchange_identity_token(&identity_token)
                .await
                .map_err(|err| Error::Exchange(err.to_string()))?;
            Ok(grant.access_token)
        })
    }

    fn profile(
        &self,
        access_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<User>> + Send + '_>> {
        let client = self.clone().with_token(access_token);
        Box::pin(async move {
            client
                .me()
                .await
                .map_err(|err| Error::Profile(err.to_string()))
        })
    }

    fn end_session(
        &self,
        access_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let client = self.clone().with_token(access_token);
        Box::pin(async move {
            client
                .logout()
                .await
                .map_err(|err| Error::Exchange(err.to_string()))
        })
    }
}
