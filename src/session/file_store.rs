//! Session store persisted as a small JSON document on disk.
//!
//! The file is re-read on every access so that separate CLI invocations
//! observe each other's logins and logouts. A missing file means logged
//! out; an unreadable or corrupt file is treated the same way.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::store::{SessionError, SessionStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_info: Option<Value>,
}

/// Session store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> SessionFile {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return SessionFile::default(),
            Err(e) => {
                warn!("Could not read session file {}: {}", self.path.display(), e);
                return SessionFile::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    "Ignoring corrupt session file {}: {}",
                    self.path.display(),
                    e
                );
                SessionFile::default()
            }
        }
    }

    fn write(&self, file: &SessionFile) -> Result<(), SessionError> {
        let contents = serde_json::to_string_pretty(file)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }
        fs::write(&self.path, contents).map_err(|source| self.write_error(source))?;
        debug!("Wrote session file {}", self.path.display());
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl SessionStore for FileStore {
    fn token(&self) -> Option<String> {
        self.read().access_token.filter(|t| !t.is_empty())
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        let mut file = self.read();
        file.access_token = Some(token.to_string());
        self.write(&file)
    }

    fn user_info(&self) -> Option<Value> {
        self.read().user_info.filter(|v| !v.is_null())
    }

    fn set_user_info(&self, info: &Value) -> Result<(), SessionError> {
        let mut file = self.read();
        file.user_info = Some(info.clone());
        self.write(&file)
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.write_error(source)),
        }
    }

    fn store_login(&self, token: &str, user_info: Option<&Value>) -> Result<(), SessionError> {
        self.write(&SessionFile {
            access_token: Some(token.to_string()),
            user_info: user_info.cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ACCESS_TOKEN_KEY, USER_INFO_KEY};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_logged_out() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("session.json"));
        assert!(store.token().is_none());
        assert!(store.user_info().is_none());
    }

    #[test]
    fn test_token_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("session.json");

        FileStore::new(&path).set_token("abc").unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.token(), Some("abc".to_string()));
    }

    #[test]
    fn test_user_info_kept_alongside_token() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("session.json"));
        store.set_token("abc").unwrap();
        store
            .set_user_info(&json!({"user_id": 3, "phone": "13800000000"}))
            .unwrap();

        assert_eq!(store.token().as_deref(), Some("abc"));
        assert_eq!(store.user_info().unwrap()["user_id"], 3);

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw[ACCESS_TOKEN_KEY], "abc");
        assert_eq!(raw[USER_INFO_KEY]["user_id"], 3);
    }

    #[test]
    fn test_store_login_drops_stale_user() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("session.json"));
        store.set_token("old").unwrap();
        store.set_user_info(&json!({"user_id": 1})).unwrap();

        store.store_login("new", None).unwrap();
        assert_eq!(store.token().as_deref(), Some("new"));
        assert!(store.user_info().is_none());

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert!(raw.get(USER_INFO_KEY).is_none());
    }

    #[test]
    fn test_clear_removes_both_entries() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("session.json"));
        store.set_token("abc").unwrap();
        store.set_user_info(&json!({"user_id": 3})).unwrap();

        store.clear().unwrap();
        assert!(store.token().is_none());
        assert!(store.user_info().is_none());
        assert!(!store.path().exists());

        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_logged_out() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.token().is_none());

        store.set_token("fresh").unwrap();
        assert_eq!(store.token().as_deref(), Some("fresh"));
    }
}
