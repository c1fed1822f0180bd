//! The persisted session.
//!
//! Exactly two things survive between invocations — the application access
//! token and the serialized profile — in one JSON file under the platform
//! data directory. The file is read at startup, written on login, and
//! removed unconditionally on logout. Last writer wins; no locking.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cardea_core::model::User;

use crate::error::Result;

/// The two persisted session keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Application access token, presented as a bearer token.
    pub access_token: String,
    /// The profile as of the last handshake. Revalidated on warm start.
    pub profile: User,
}

/// On-disk store for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// A store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The platform-default session path
    /// (`$XDG_DATA_HOME/cardea/session.json` or equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("cardea").join("session.json"))
    }

    /// Where this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the session, if one is present and parseable.
    ///
    /// A corrupt file is logged and treated as no session — the guard then
    /// runs the full handshake, which rewrites it.
    pub fn load(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                log::warn!("failed to read session file {}: {err}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                log::warn!("discarding corrupt session file {}: {err}", self.path.display());
                None
            }
        }
    }

    /// Persists both session keys, creating parent directories as needed.
    ///
    /// On unix the file is restricted to the owner — it holds a live token.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        log::debug!("session saved to {}", self.path.display());
        Ok(())
    }

    /// Removes the session file. Succeeds if it was already gone.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("session cleared");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Whether a session file exists (parseable or not).
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "email": "ayo@example.com",
            "first_name": "Ayo",
            "last_name": "Bello",
            "role": "USER",
            "is_active": true,
            "created_at": "2025-04-01T09:00:00Z"
        }))
        .unwrap()
    }

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("cardea").join("session.json"))
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(store_in(&dir).load().is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);
        let session = Session {
            access_token: "app-token".to_string(),
            profile: sample_user(),
        };

        store.save(&session).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token, "app-token");
        assert_eq!(loaded.profile.email, "ayo@example.com");
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_clear_removes_file_and_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&Session {
                access_token: "t".to_string(),
                profile: sample_user(),
            })
            .unwrap();
        assert!(store.exists());

        store.clear().unwrap();
        assert!(!store.exists());

        // Clearing an already-empty store is fine.
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&Session {
                access_token: "t".to_string(),
                profile: sample_user(),
            })
            .unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
