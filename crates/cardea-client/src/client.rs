//! The HTTP client core: base URL, bearer token, status mapping.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the Cardea REST API.
///
/// Holds a connection pool, the API base URL, and an optional bearer token.
/// Every endpoint method issues exactly one request; callers that mutate
/// re-fetch afterwards rather than patching local state.
///
/// # Examples
///
/// ```rust,no_run
/// use cardea_client::ApiClient;
///
/// # async fn run() -> cardea_client::Result<()> {
/// let client = ApiClient::new("http://localhost:8000")?.with_token("app-token");
/// let projects = client.list_projects().await?;
/// println!("{} projects", projects.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url.into()),
            token: None,
        })
    }

    /// Returns a copy of this client carrying a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replaces (or clears) the bearer token in place.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// The currently installed bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The configured base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        log::debug!("GET {path}");
        let resp = self.apply_auth(self.http.get(self.url(path))).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        log::debug!("POST {path}");
        let resp = self
            .apply_auth(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// POST whose response body the caller does not care about.
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        log::debug!("POST {path}");
        let resp = self
            .apply_auth(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        log::debug!("PUT {path}");
        let resp = self
            .apply_auth(self.http.put(self.url(path)))
            .json(body)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        log::debug!("DELETE {path}");
        let resp = self
            .apply_auth(self.http.delete(self.url(path)))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

/// Strips trailing slashes so `url()` can join with absolute paths.
fn normalize_base_url(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Maps non-2xx responses to [`Error`], pulling the server's `detail`
/// message out of the body when one is present.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let detail = resp
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.detail)
        .map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

    log::debug!("request failed: HTTP {status} ({detail:?})");
    Err(Error::from_status(status.as_u16(), detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url("/api/projects/"),
            "http://localhost:8000/api/projects/"
        );
    }

    #[test]
    fn test_token_is_installed_and_replaced() {
        let mut client = ApiClient::new("http://localhost:8000")
            .unwrap()
            .with_token("abc");
        assert_eq!(client.token(), Some("abc"));

        client.set_token(None);
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_error_body_detail_parses_string_and_structured() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "no such project"}"#).unwrap();
        assert_eq!(body.detail, Some(serde_json::json!("no such project")));

        // FastAPI validation errors ship a structured detail list.
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": [{"loc": ["body"], "msg": "invalid"}]}"#).unwrap();
        assert!(body.detail.unwrap().is_array());
    }
}
