//! Authentication endpoints: `/api/auth/*`.

use serde::{Deserialize, Serialize};

use cardea_core::model::User;

use crate::client::ApiClient;
use crate::error::Result;

/// The application token grant, shared by both login paths.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The application access token to present as a bearer token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

#[derive(Debug, Serialize)]
struct PasswordLogin<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct IdentityTokenLogin<'a> {
    azure_token: &'a str,
}

impl ApiClient {
    /// Password login against the local credential store.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        self.post_json("/api/auth/login", &PasswordLogin { email, password })
            .await
    }

    /// Exchanges an identity-provider token for an application access token.
    ///
    /// This is step three of the handshake: the provider already vouched for
    /// the user; the backend mints its own token and provisions the account
    /// on first sight.
    pub async fn exchange_identity_token(&self, identity_token: &str) -> Result<TokenResponse> {
        self.post_json(
            "/api/auth/azure-login",
            &IdentityTokenLogin {
                azure_token: identity_token,
            },
        )
        .await
    }

    /// Fetches the profile of the token's owner.
    pub async fn me(&self) -> Result<User> {
        self.get_json("/api/auth/me").await
    }

    /// Server-side logout. The session file is cleared by the caller whether
    /// or not this call succeeds.
    pub async fn logout(&self) -> Result<()> {
        self.post_unit("/api/auth/logout", &serde_json::json!({})).await
    }
}
