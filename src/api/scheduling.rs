//! # Scheduling API
//!
//! Departments, doctors and appointments.
//!
//! ## Endpoints
//!
//! - `GET /departments` - All departments
//! - `GET /doctors?departmentId=` - Doctors, optionally filtered by department
//! - `POST /appointments` - Book an appointment
//! - `GET /appointments/pending` - Appointments awaiting confirmation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::{ApiClient, ApiError, ApiRequest};
use crate::api::decode;

/// Appointment booking request.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use medconsult::api::scheduling::AppointmentRequest;
///
/// let request = AppointmentRequest {
///     doctor_id: 12,
///     appointment_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
///     appointment_time: "morning".to_string(),
///     medical_record_id: None,
/// };
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["appointmentDate"], "2025-03-14");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    /// Time slot label, e.g. morning or afternoon.
    pub appointment_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_record_id: Option<i64>,
}

impl ApiClient {
    pub async fn get_departments(&self) -> Result<Vec<Value>, ApiError> {
        let body = self.execute(ApiRequest::get("/departments")).await?;
        decode::array(body, "departments")
    }

    /// List doctors. A blank department filter is treated as no filter.
    pub async fn get_doctors(&self, department_id: Option<&str>) -> Result<Vec<Value>, ApiError> {
        let mut request = ApiRequest::get("/doctors");
        if let Some(department_id) = department_id.filter(|d| !d.trim().is_empty()) {
            request = request.query("departmentId", department_id);
        }
        let body = self.execute(request).await?;
        decode::array(body, "doctors")
    }

    pub async fn create_appointment(
        &self,
        appointment: &AppointmentRequest,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/appointments").json(appointment)?;
        self.execute(request).await
    }

    pub async fn get_pending_appointments(&self) -> Result<Vec<Value>, ApiError> {
        let body = self.execute(ApiRequest::get("/appointments/pending")).await?;
        decode::array(body, "pending appointments")
    }
}
