//! # MedConsult Client Library
//!
//! Typed client for the medical consultation backend: login and
//! registration, profile management, AI consultation chat, medical
//! records and appointment booking.
//!
//! ## Modules
//!
//! - [`api`] - API client and endpoint wrappers
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration loading
//! - [`errors`] - Error display for the CLI
//! - [`exit_codes`] - Standard exit codes
//! - [`session`] - Persisted session state (access token, cached user)

pub mod api;
pub mod commands;
pub mod config;
pub mod errors;
pub mod exit_codes;
pub mod session;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use session::{FileStore, MemoryStore, SessionStore};
