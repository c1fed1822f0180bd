//! Identity-provider abstraction and the Entra implementation.
//!
//! The console never shows a provider login page; it only redeems a session
//! the user established elsewhere (browser sign-in against the tenant).
//! What it can do silently is: notice that a provider session is cached,
//! and redeem its refresh token for a fresh identity token.

use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A provider that can vouch for the user without interaction.
///
/// Implement this per identity provider. The guard calls `has_session`
/// first and `acquire_token_silent` second; both failing modes collapse to
/// the unauthenticated outcome.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Whether a provider-side session (cached credential) exists.
    fn has_session(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;

    /// Silently acquires an identity token from the cached session.
    fn acquire_token_silent(&self) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;
}

/// Configuration for [`EntraProvider`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntraConfig {
    /// Tenant authority, e.g. `https://contoso.ciamlogin.com/<tenant-id>`.
    pub authority: String,
    /// Application (client) id registered with the tenant.
    pub client_id: String,
    /// Scopes requested on token refresh.
    pub scopes: Vec<String>,
    /// Where the provider session (refresh token) is cached.
    pub cache_path: PathBuf,
}

impl EntraConfig {
    /// The tenant's token endpoint.
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/v2.0/token", self.authority.trim_end_matches('/'))
    }

    /// Platform-default provider cache path.
    pub fn default_cache_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("cardea").join("idp-session.json"))
    }
}

/// The cached provider session.
#[derive(Debug, Serialize, Deserialize)]
struct ProviderCache {
    refresh_token: String,
}

/// Token endpoint reply. Only the fields the handshake consumes.
#[derive(Debug, Deserialize)]
struct TokenReply {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Error reply from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Microsoft Entra External ID provider.
///
/// Redeems a cached refresh token at the tenant token endpoint; rotated
/// refresh tokens are written back to the cache.
pub struct EntraProvider {
    config: EntraConfig,
    http: reqwest::Client,
}

impl EntraProvider {
    /// Creates a provider for the given tenant configuration.
    pub fn new(config: EntraConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|err| Error::TokenAcquisition(err.to_string()))?;
        Ok(Self { config, http })
    }

    fn read_cache(&self) -> Option<ProviderCache> {
        let raw = fs::read_to_string(&self.config.cache_path).ok()?;
        match serde_json::from_str::<ProviderCache>(&raw) {
            Ok(cache) if !cache.refresh_token.is_empty() => Some(cache),
            Ok(_) => None,
            Err(err) => {
                log::warn!(
                    "ignoring corrupt provider cache {}: {err}",
                    self.config.cache_path.display()
                );
                None
            }
        }
    }

    fn write_cache(&self, refresh_token: &str) {
        let cache = ProviderCache {
            refresh_token: refresh_token.to_string(),
        };
        let write = || -> Result<()> {
            if let Some(parent) = self.config.cache_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.config.cache_path, serde_json::to_string_pretty(&cache)?)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(
                    &self.config.cache_path,
                    fs::Permissions::from_mode(0o600),
                )?;
            }
            Ok(())
        };
        // A stale cached token still works until the tenant expires it.
        if let Err(err) = write() {
            log::warn!("failed to update provider cache: {err}");
        }
    }

    /// Stores a refresh token obtained out of band (first sign-in).
    pub fn store_session(&self, refresh_token: &str) {
        self.write_cache(refresh_token);
    }

    async fn redeem(&self, refresh_token: &str) -> Result<String> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("scope", &self.config.scopes.join(" ")),
        ];

        let resp = self
            .http
            .post(self.config.token_endpoint())
            .form(&params)
            .send()
            .await
            .map_err(|err| Error::TokenAcquisition(err.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let reason = resp
                .json::<TokenError>()
                .await
                .ok()
                .and_then(|body| body.error_description.or(body.error))
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(Error::TokenAcquisition(reason));
        }

        let reply: TokenReply = resp
            .json()
            .await
            .map_err(|err| Error::TokenAcquisition(err.to_string()))?;

        if let Some(rotated) = &reply.refresh_token {
            self.write_cache(rotated);
        }

        reply
            .access_token
            .or(reply.id_token)
            .ok_or_else(|| Error::TokenAcquisition("token endpoint returned no token".to_string()))
    }
}

impl IdentityProvider for EntraProvider {
    fn has_session(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        let present = self.read_cache().is_some();
        Box::pin(async move { present })
    }

    fn acquire_token_silent(&self) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        Box::pin(async move {
            let cache = self.read_cache().ok_or(Error::NoProviderSession)?;
            self.redeem(&cache.refresh_token).await
        })
    }
}
