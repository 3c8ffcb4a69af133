//! # Auth API
//!
//! Session lifecycle endpoints.
//!
//! ## Endpoints
//!
//! - `POST /auth/login` - Exchange phone/password for an access token
//! - `POST /auth/register/patient` - Register a patient account
//! - `POST /auth/register/doctor` - Register a doctor account (multipart, with certificate)
//! - `POST /logout` - End the session; local state is cleared regardless of outcome

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::attachment::Attachment;
use crate::api::client::{ApiClient, ApiError, ApiRequest};
use crate::api::transport::FormPart;

// =============================================================================
// Request Types
// =============================================================================

/// Account role sent with login. Encoded as `1` (patient) or `2` (doctor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Patient,
    Doctor,
}

impl UserType {
    pub fn code(&self) -> u8 {
        match self {
            UserType::Patient => 1,
            UserType::Doctor => 2,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    phone: &'a str,
    password: &'a str,
    user_type: u8,
}

/// Patient registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRegistration {
    pub phone: String,
    pub password: String,
    pub full_name: String,
    /// Serialized as `YYYY-MM-DD`.
    pub birth_date: NaiveDate,
}

/// Doctor registration form fields; the certificate travels separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorRegistration {
    pub phone: String,
    pub password: String,
    pub full_name: String,
    pub license_id: String,
    pub hospital: String,
    pub department: String,
    pub title: String,
}

impl DoctorRegistration {
    fn into_form(self, certificate: Attachment) -> Vec<FormPart> {
        vec![
            FormPart::text("phone", self.phone),
            FormPart::text("password", self.password),
            FormPart::text("full_name", self.full_name),
            FormPart::text("license_id", self.license_id),
            FormPart::text("hospital", self.hospital),
            FormPart::text("department", self.department),
            FormPart::text("title", self.title),
            FormPart::file("certificate", certificate),
        ]
    }
}

// =============================================================================
// API Client Methods
// =============================================================================

impl ApiClient {
    /// Log in and store the returned token.
    ///
    /// The token is read from `data.token` and stored together with
    /// `data.user` in one write; a previously cached user is dropped when
    /// the body carries none. A success body without a token is returned
    /// as-is and leaves the stored session untouched.
    pub async fn login(
        &self,
        phone: &str,
        password: &str,
        user_type: UserType,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/auth/login").public().json(&LoginRequest {
            phone,
            password,
            user_type: user_type.code(),
        })?;
        let body = self.execute(request).await?;

        let token = body
            .pointer("/data/token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());

        match token {
            Some(token) => {
                let user = body.pointer("/data/user").filter(|u| !u.is_null());
                self.session().store_login(token, user)?;
                info!("Logged in");
            }
            None => warn!("Login response carried no token; session left unchanged"),
        }

        Ok(body)
    }

    pub async fn register_patient(
        &self,
        registration: &PatientRegistration,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/auth/register/patient")
            .public()
            .json(registration)?;
        self.execute(request).await
    }

    /// Register a doctor. Sent as multipart with the certificate under `certificate`.
    pub async fn register_doctor(
        &self,
        registration: DoctorRegistration,
        certificate: Attachment,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/auth/register/doctor")
            .public()
            .multipart(registration.into_form(certificate));
        self.execute(request).await
    }

    /// Log out.
    ///
    /// The local session is cleared whatever the server says, including
    /// when no token was stored or the request failed; the failure is still
    /// returned to the caller.
    pub async fn logout(&self) -> Result<Value, ApiError> {
        let result = self.execute(ApiRequest::post("/logout")).await;

        match (self.forget_session(), result) {
            (Ok(()), result) => result,
            (Err(e), Ok(_)) => Err(e.into()),
            (Err(e), Err(err)) => {
                warn!("Failed to clear session during logout: {}", e);
                Err(err)
            }
        }
    }
}
