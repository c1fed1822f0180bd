//! Console configuration.
//!
//! One TOML file at the platform config dir (`cardea/config.toml`), with
//! serde defaults for every field so a missing file just means defaults.
//! Resolution order for the API base URL: `--api-url` flag > `CARDEA_API_URL`
//! env (both handled by clap) > file > built-in default.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use cardea_auth::{EntraConfig, SessionStore};
use cardea_client::ApiClient;

use crate::error::{Error, Result};

/// The `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Cardea API server.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// The `[idp]` section: the external identity provider tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdpConfig {
    /// Tenant authority URL.
    pub authority: String,
    /// Application (client) id registered with the tenant.
    pub client_id: String,
    /// Scopes requested on silent acquisition.
    pub scopes: Vec<String>,
    /// Override for the provider session cache file.
    pub cache_path: Option<PathBuf>,
}

impl Default for IdpConfig {
    fn default() -> Self {
        Self {
            authority: String::new(),
            client_id: String::new(),
            scopes: vec![
                "openid".to_string(),
                "profile".to_string(),
                "email".to_string(),
            ],
            cache_path: None,
        }
    }
}

/// The whole configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardeaConfig {
    pub api: ApiConfig,
    pub idp: IdpConfig,
}

impl CardeaConfig {
    /// The default config file location
    /// (`$XDG_CONFIG_HOME/cardea/config.toml` or equivalent).
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cardea").join("config.toml"))
    }

    /// Resolves the effective config path: explicit flag wins, else the
    /// platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Loads the configuration. A missing file yields the defaults; a
    /// present-but-broken file is an error rather than a silent fallback.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        toml::from_str(&raw)
            .map_err(|e| Error::config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Serializes the document as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// An [`ApiClient`] configured from the `[api]` section.
    pub fn api_client(&self) -> Result<ApiClient> {
        Ok(ApiClient::with_timeout(
            self.api.base_url.clone(),
            Duration::from_secs(self.api.timeout_secs),
        )?)
    }

    /// The identity-provider configuration for the guard.
    pub fn entra_config(&self) -> Result<EntraConfig> {
        let cache_path = match &self.idp.cache_path {
            Some(path) => path.clone(),
            None => EntraConfig::default_cache_path()
                .ok_or_else(|| Error::config("could not determine data directory"))?,
        };
        Ok(EntraConfig {
            authority: self.idp.authority.clone(),
            client_id: self.idp.client_id.clone(),
            scopes: self.idp.scopes.clone(),
            cache_path,
        })
    }

    /// The session store at its platform-default location.
    pub fn session_store(&self) -> Result<SessionStore> {
        let path = SessionStore::default_path()
            .ok_or_else(|| Error::config("could not determine data directory"))?;
        Ok(SessionStore::new(path))
    }
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let parts: Vec<&str> = key.split('.').collect();
    let mut current = value;
    for part in &parts {
        current = current.as_table()?.get(*part)?;
    }
    Some(current)
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let mut current = root;

    for (i, part) in parts.iter().enumerate() {
        if i == parts.len() - 1 {
            let table = current
                .as_table_mut()
                .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?;
            table.insert(part.to_string(), value);
            return Ok(());
        }

        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        if !table.contains_key(*part) {
            table.insert(part.to_string(), toml::Value::Table(toml::map::Map::new()));
        }
        current = table.get_mut(*part).expect("key inserted above");
    }

    Err(Error::config("Empty key path"))
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool → integer → float → string.
pub fn parse_value(s: &str) -> toml::Value {
    if s == "true" {
        return toml::Value::Boolean(true);
    }
    if s == "false" {
        return toml::Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_localhost() {
        let config = CardeaConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.idp.scopes, vec!["openid", "profile", "email"]);
    }

    #[test]
    fn test_load_missing_default_file_yields_defaults() {
        // No explicit path: a missing file is fine.
        let config = CardeaConfig::load(None).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_load_missing_explicit_file_is_an_error() {
        let result = CardeaConfig::load(Some("/nonexistent/cardea.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://risk.example.com\"\n").unwrap();

        let config = CardeaConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.api.base_url, "https://risk.example.com");
        // Unspecified fields keep their defaults.
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.idp.scopes.len(), 3);
    }

    #[test]
    fn test_load_broken_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api = not toml").unwrap();

        assert!(CardeaConfig::load(Some(path.to_str().unwrap())).is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CardeaConfig::default();
        let raw = config.to_toml_string().unwrap();
        let parsed: CardeaConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
    }

    #[test]
    fn test_get_nested_value_nested() {
        let val: toml::Value = toml::from_str("[api]\ntimeout_secs = 45").unwrap();
        assert_eq!(
            get_nested_value(&val, "api.timeout_secs"),
            Some(&toml::Value::Integer(45))
        );
        assert!(get_nested_value(&val, "api.nonexistent").is_none());
    }

    #[test]
    fn test_set_nested_value_creates_section() {
        let mut val = toml::Value::Table(toml::map::Map::new());
        set_nested_value(&mut val, "idp.client_id", parse_value("client-123")).unwrap();
        assert_eq!(
            get_nested_value(&val, "idp.client_id"),
            Some(&toml::Value::String("client-123".to_string()))
        );
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("42"), toml::Value::Integer(42));
        assert_eq!(parse_value("2.5"), toml::Value::Float(2.5));
        assert_eq!(
            parse_value("hello world"),
            toml::Value::String("hello world".to_string())
        );
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(
            format_toml_value(&toml::Value::String("hello".into())),
            "hello"
        );
        assert_eq!(format_toml_value(&toml::Value::Integer(42)), "42");
        assert_eq!(format_toml_value(&toml::Value::Boolean(true)), "true");
    }
}
