//! # HTTP Transport
//!
//! The seam between the API client and the network. [`ApiClient`] builds
//! an [`HttpRequest`] and hands it to a [`Transport`]; the default
//! implementation is [`ReqwestTransport`].
//!
//! [`ApiClient`]: crate::api::ApiClient

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::time::Duration;

use crate::api::attachment::Attachment;
use crate::api::client::ApiError;

/// HTTP methods used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// A single part of a multipart form body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, attachment: Attachment },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: impl Into<String>, attachment: Attachment) -> Self {
        FormPart::File {
            name: name.into(),
            attachment,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Request payload.
///
/// JSON bodies carry `Content-Type: application/json`. Multipart bodies
/// never set the header explicitly; the transport adds it with the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// A fully resolved request ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer_token: Option<String>,
    pub body: RequestBody,
}

/// Raw response: status and body text, nothing interpreted yet.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase ("Not Found").
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();
        Self {
            status,
            reason,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `"<status> <reason>"`, the fallback message for failed requests.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status, self.reason)
    }
}

/// Sends requests over the wire.
///
/// Implementations must not interpret status codes; that is the client's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Convert a reqwest error to an ApiError.
fn to_network_error(err: reqwest::Error) -> ApiError {
    ApiError::Network {
        message: err.to_string(),
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transport whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(to_network_error)?;
        Ok(Self { client })
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, attachment } => {
                let Attachment {
                    file_name,
                    content_type,
                    bytes,
                } = attachment;
                let file_part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| ApiError::Validation {
                        message: format!("Invalid content type '{}': {}", content_type, e),
                    })?;
                form.part(name, file_part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, request.url);
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        let response = builder.send().await.map_err(to_network_error)?;
        let status = response.status();
        let body = response.text().await.map_err(to_network_error)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body,
        })
    }
}
