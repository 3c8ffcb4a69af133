//! # Session Module
//!
//! Client-side session state: the access token issued at login and an
//! optional cached copy of the user record returned alongside it.
//!
//! The API client never reaches into ambient storage. It is handed a
//! [`SessionStore`] and reads/writes through it, so tests can run against
//! [`MemoryStore`] and the CLI persists to disk with [`FileStore`].

mod file_store;
mod store;

pub use file_store::FileStore;
pub use store::{MemoryStore, SessionError, SessionStore, ACCESS_TOKEN_KEY, USER_INFO_KEY};
