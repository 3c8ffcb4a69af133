//! Session store trait and the in-memory implementation.

use serde_json::Value;
use std::sync::RwLock;

/// Key under which the access token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Key under which the cached user record is persisted.
pub const USER_INFO_KEY: &str = "user_info";

/// Errors raised when session state cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to write session file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode session state: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Session store lock was poisoned")]
    Poisoned,
}

/// Persisted client state shared by every API call.
///
/// Reads are infallible: an unreadable store is treated as logged out.
/// Writes report failures so callers can decide whether to surface them.
pub trait SessionStore: Send + Sync {
    /// The stored access token, if any.
    fn token(&self) -> Option<String>;

    /// Replace the stored access token.
    fn set_token(&self, token: &str) -> Result<(), SessionError>;

    /// The cached user record, if any.
    fn user_info(&self) -> Option<Value>;

    /// Replace the cached user record.
    fn set_user_info(&self, info: &Value) -> Result<(), SessionError>;

    /// Drop both the access token and the cached user record.
    fn clear(&self) -> Result<(), SessionError>;

    /// Replace the whole session in one write: the new token, and the user
    /// record that came with it (or none, dropping any previous one).
    fn store_login(&self, token: &str, user_info: Option<&Value>) -> Result<(), SessionError>;
}

#[derive(Debug, Default, Clone)]
struct SessionState {
    token: Option<String>,
    user_info: Option<Value>,
}

/// Session store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<SessionState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(SessionState {
                token: Some(token.into()),
                user_info: None,
            }),
        }
    }
}

impl SessionStore for MemoryStore {
    fn token(&self) -> Option<String> {
        self.state.read().ok()?.token.clone()
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        let mut state = self.state.write().map_err(|_| SessionError::Poisoned)?;
        state.token = Some(token.to_string());
        Ok(())
    }

    fn user_info(&self) -> Option<Value> {
        self.state.read().ok()?.user_info.clone()
    }

    fn set_user_info(&self, info: &Value) -> Result<(), SessionError> {
        let mut state = self.state.write().map_err(|_| SessionError::Poisoned)?;
        state.user_info = Some(info.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut state = self.state.write().map_err(|_| SessionError::Poisoned)?;
        *state = SessionState::default();
        Ok(())
    }

    fn store_login(&self, token: &str, user_info: Option<&Value>) -> Result<(), SessionError> {
        let mut state = self.state.write().map_err(|_| SessionError::Poisoned)?;
        *state = SessionState {
            token: Some(token.to_string()),
            user_info: user_info.cloned(),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_starts_logged_out() {
        let store = MemoryStore::new();
        assert!(store.token().is_none());
        assert!(store.user_info().is_none());
    }

    #[test]
    fn test_memory_store_set_and_clear() {
        let store = MemoryStore::new();
        store.set_token("abc").unwrap();
        store.set_user_info(&json!({"user_id": 7})).unwrap();
        assert_eq!(store.token(), Some("abc".to_string()));
        assert_eq!(store.user_info(), Some(json!({"user_id": 7})));

        store.clear().unwrap();
        assert!(store.token().is_none());
        assert!(store.user_info().is_none());
    }

    #[test]
    fn test_memory_store_login_replaces_previous_user() {
        let store = MemoryStore::with_token("old");
        store.set_user_info(&json!({"user_id": 1})).unwrap();

        store.store_login("new", None).unwrap();
        assert_eq!(store.token().as_deref(), Some("new"));
        assert!(store.user_info().is_none());

        store.store_login("newer", Some(&json!({"user_id": 2}))).unwrap();
        assert_eq!(store.user_info(), Some(json!({"user_id": 2})));
    }

    #[test]
    fn test_memory_store_with_token() {
        let store = MemoryStore::with_token("seeded");
        assert_eq!(store.token().as_deref(), Some("seeded"));
    }
}
