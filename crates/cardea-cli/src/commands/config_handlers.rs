//! Handler functions for config CLI commands.
//!
//! Implements the config subcommands (`path`, `get`, `set`, `init`) over
//! the TOML document at the resolved config path, addressed by dotted keys.

use std::path::PathBuf;

use crate::cli::ConfigAction;
use crate::config::{
    format_toml_value, get_nested_value, parse_value, set_nested_value, CardeaConfig,
};
use crate::error::{Error, Result};

/// Handle a config subcommand.
pub fn run(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_path(config_path),
        ConfigAction::Get { key } => cmd_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_init(file.as_deref(), force),
    }
}

/// Show the resolved config file path.
fn cmd_path(config_path: Option<&str>) -> Result<()> {
    match CardeaConfig::resolve_config_path(config_path) {
        Some(path) => {
            let exists = path.exists();
            println!("{}", path.display());
            if !exists {
                eprintln!("(file does not exist — run `cardea config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Get a configuration value by dotted key.
fn cmd_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = CardeaConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => {
            println!("{}", format_toml_value(val));
            Ok(())
        }
        None => Err(Error::config(format!(
            "Key '{key}' not found in configuration"
        ))),
    }
}

/// Set a configuration value by dotted key in the config file.
fn cmd_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = CardeaConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `cardea config init` first.",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;

    // Reject edits that would leave an unloadable file.
    let rendered = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    toml::from_str::<CardeaConfig>(&rendered)
        .map_err(|e| Error::config(format!("'{key}' = '{value}' is not valid here: {e}")))?;

    std::fs::write(&path, rendered).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

/// Create a default configuration file.
fn cmd_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => CardeaConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let config = CardeaConfig::default();
    std::fs::write(&path, config.to_toml_string()?).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_default(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, CardeaConfig::default().to_toml_string().unwrap()).unwrap();
        path
    }

    #[test]
    fn test_get_nested_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);
        let result = cmd_get(Some(path.to_str().unwrap()), "api.base_url");
        assert!(result.is_ok());
    }

    #[test]
    fn test_get_missing_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);
        let result = cmd_get(Some(path.to_str().unwrap()), "api.nonexistent");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_set_nested_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);

        cmd_set(Some(path.to_str().unwrap()), "api.timeout_secs", "45").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("45"));
        let config = CardeaConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.api.timeout_secs, 45);
    }

    #[test]
    fn test_set_rejects_type_mismatch() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);

        // timeout_secs must stay numeric.
        let result = cmd_set(Some(path.to_str().unwrap()), "api.timeout_secs", "soon");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_missing_file() {
        let result = cmd_set(Some("/nonexistent/config.toml"), "key", "value");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_init_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cardea").join("config.toml");

        cmd_init(Some(path.to_str().unwrap()), false).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[api]"));
        assert!(content.contains("base_url"));
    }

    #[test]
    fn test_init_no_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "existing").unwrap();

        let result = cmd_init(Some(path.to_str().unwrap()), false);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "old content").unwrap();

        cmd_init(Some(path.to_str().unwrap()), true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[api]"));
    }
}
