//! # API Client Module
//!
//! This module provides the HTTP client for communicating with the
//! medical consultation backend.

pub mod attachment;
pub mod auth;
pub mod chat;
pub mod client;
pub mod decode;
pub mod records;
pub mod scheduling;
pub mod transport;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types for convenience
pub use attachment::Attachment;
pub use auth::{DoctorRegistration, PatientRegistration, UserType};
pub use chat::ChatHistoryEntry;
pub use client::{ApiClient, ApiError, ErrorKind, DEFAULT_BASE_URL};
pub use decode::JsonObject;
pub use records::RecordId;
pub use scheduling::AppointmentRequest;
pub use transport::{ReqwestTransport, Transport};
pub use user::{PasswordChange, ProfileUpdate};
