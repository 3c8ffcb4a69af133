//! # API Client Core
//!
//! [`ApiClient`] owns the base URL, the session store and the transport,
//! and funnels every endpoint through one request helper so that status
//! handling is identical everywhere:
//!
//! - `401` clears the stored session and yields [`ApiError::Unauthenticated`]
//! - `404` yields [`ApiError::NotFound`] on lookups that opt in
//! - `500` yields [`ApiError::Server`]
//! - any other non-2xx yields [`ApiError::RequestFailed`]
//!
//! Server messages are taken from the error body's `message` field, falling
//! back to `msg`. Error bodies are not assumed to be JSON.

use log::{debug, info, warn};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::api::transport::{
    FormPart, HttpRequest, HttpResponse, Method, RequestBody, ReqwestTransport, Transport,
};
use crate::session::{SessionError, SessionStore};

/// Backend location used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

const NOT_LOGGED_IN: &str = "Not logged in or session expired";
const SESSION_EXPIRED: &str = "Session expired, please log in again";
const INTERNAL_SERVER_ERROR: &str = "Internal server error";

// =============================================================================
// Error Types
// =============================================================================

/// Coarse classification of [`ApiError`] for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    NotFound,
    Server,
    RequestFailed,
    MalformedResponse,
    Validation,
    Network,
    Session,
    Attachment,
}

/// Errors from API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No token stored, or the server rejected it (status 401).
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },
    /// Lookup target does not exist (status 404 on record lookups).
    #[error("Not found: {message}")]
    NotFound { message: String },
    /// Server failed internally (status 500).
    #[error("Server error: {message}")]
    Server { message: String },
    /// Any other non-success status.
    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },
    /// Success status, but the body does not have the expected shape.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
    /// Invalid caller input, rejected before any request is sent.
    #[error("Invalid argument: {message}")]
    Validation { message: String },
    /// The request never produced a response.
    #[error("Network error: {message}")]
    Network { message: String },
    /// Session state could not be persisted.
    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
    /// An upload could not be read from disk.
    #[error("Failed to read attachment {path}: {source}")]
    Attachment {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthenticated { .. } => ErrorKind::Unauthenticated,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::RequestFailed { .. } => ErrorKind::RequestFailed,
            ApiError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            ApiError::Validation { .. } => ErrorKind::Validation,
            ApiError::Network { .. } => ErrorKind::Network,
            ApiError::Session(_) => ErrorKind::Session,
            ApiError::Attachment { .. } => ErrorKind::Attachment,
        }
    }

    /// True when the caller should send the user back to login.
    pub fn is_unauthenticated(&self) -> bool {
        self.kind() == ErrorKind::Unauthenticated
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ApiError::MalformedResponse {
            message: message.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }
}

/// Extract a human-readable message from an error body.
///
/// Looks at `message`, then `msg`. Non-string values (validation error maps)
/// are rendered as compact JSON. Returns `None` for empty or non-JSON bodies.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "msg"].iter().find_map(|key| match value.get(*key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}

// =============================================================================
// Request Description
// =============================================================================

/// Everything needed to perform one endpoint call.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: RequestBody,
    authenticated: bool,
    not_found: Option<&'static str>,
}

impl ApiRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
            body: RequestBody::Empty,
            authenticated: true,
            not_found: None,
        }
    }

    pub(crate) fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub(crate) fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    pub(crate) fn put(path: &str) -> Self {
        Self::new(Method::Put, path)
    }

    /// Append one path segment; it is percent-encoded as a unit.
    pub(crate) fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub(crate) fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub(crate) fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::validation(format!("Failed to encode request body: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub(crate) fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Endpoint that does not need a token.
    pub(crate) fn public(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Map 404 to [`ApiError::NotFound`], using `default_message` when the
    /// server does not supply one.
    pub(crate) fn not_found(mut self, default_message: &'static str) -> Self {
        self.not_found = Some(default_message);
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the medical consultation backend.
///
/// The client is cheap to clone; clones share the session store and transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Arc<dyn SessionStore>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client that talks HTTP through `reqwest`.
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use medconsult::api::ApiClient;
    /// use medconsult::session::MemoryStore;
    ///
    /// let client = ApiClient::new("http://localhost:5000/api", Arc::new(MemoryStore::new()));
    /// assert!(!client.is_logged_in());
    /// ```
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        Self::with_transport(base_url, session, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client with an explicit transport.
    pub fn with_transport(
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            session,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    /// Whether an access token is currently stored.
    pub fn is_logged_in(&self) -> bool {
        self.stored_token().is_some()
    }

    /// User record cached at login, if any.
    pub fn cached_user(&self) -> Option<Value> {
        self.session.user_info()
    }

    fn stored_token(&self) -> Option<String> {
        self.session.token().filter(|t| !t.is_empty())
    }

    /// Drop the stored token and cached user record.
    pub(crate) fn forget_session(&self) -> Result<(), SessionError> {
        self.session.clear()?;
        info!("Cleared stored session");
        Ok(())
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ApiError::validation(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::validation(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty();
            segments.extend(request.segments.iter());
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    /// Perform a request and return the parsed success body.
    ///
    /// Authenticated requests fail with [`ApiError::Unauthenticated`] before
    /// touching the transport when no token is stored.
    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let bearer_token = if request.authenticated {
            Some(self.stored_token().ok_or_else(|| ApiError::Unauthenticated {
                message: NOT_LOGGED_IN.to_string(),
            })?)
        } else {
            None
        };

        let url = self.url_for(&request)?;
        debug!("[API] {} {}", request.method.as_str(), url);

        let response = self
            .transport
            .send(HttpRequest {
                method: request.method,
                url,
                bearer_token,
                body: request.body,
            })
            .await?;

        debug!(
            "[API] Response status: {} ({})",
            response.status, response.reason
        );

        if !response.is_success() {
            debug!("[API] Error response body: {}", response.body);
            return Err(self.to_http_error(&response, request.not_found));
        }

        parse_success_body(&response.body)
    }

    /// Convert an HTTP response with error status to an ApiError.
    fn to_http_error(&self, response: &HttpResponse, not_found: Option<&'static str>) -> ApiError {
        let message = server_message(&response.body);

        match (response.status, not_found) {
            (401, _) => {
                if let Err(e) = self.forget_session() {
                    warn!("Failed to clear session after 401: {}", e);
                }
                ApiError::Unauthenticated {
                    message: message.unwrap_or_else(|| SESSION_EXPIRED.to_string()),
                }
            }
            (404, Some(default_message)) => ApiError::NotFound {
                message: message.unwrap_or_else(|| default_message.to_string()),
            },
            (500, _) => ApiError::Server {
                message: message.unwrap_or_else(|| INTERNAL_SERVER_ERROR.to_string()),
            },
            (status, _) => ApiError::RequestFailed {
                status,
                message: message.unwrap_or_else(|| response.status_line()),
            },
        }
    }
}

/// Parse a success body; an empty body reads as JSON `null`.
fn parse_success_body(body: &str) -> Result<Value, ApiError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|e| ApiError::malformed(format!("Response body is not valid JSON: {}", e)))
}
