//! # Appointment Commands
//!
//! Departments, doctors and booking.

use anyhow::Result;

use crate::api::AppointmentRequest;
use crate::commands::{connect, finish, print_json, print_list, print_object, OutputOptions};

const DEPARTMENT_FIELDS: &[&str] = &["id", "name"];
const DOCTOR_FIELDS: &[&str] = &["id", "name", "title", "department", "hospital"];
const APPOINTMENT_FIELDS: &[&str] = &[
    "id",
    "doctorName",
    "appointmentDate",
    "appointmentTime",
    "status",
];

pub async fn execute_departments(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_departments().await;
    finish(result, "Failed to fetch departments", |departments| {
        if output.json {
            print_json(&departments)
        } else {
            print_list("Departments", &departments, DEPARTMENT_FIELDS);
            Ok(())
        }
    })
}

pub async fn execute_doctors(department: Option<String>, output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_doctors(department.as_deref()).await;
    finish(result, "Failed to fetch doctors", |doctors| {
        if output.json {
            print_json(&doctors)
        } else {
            print_list("Doctors", &doctors, DOCTOR_FIELDS);
            Ok(())
        }
    })
}

pub async fn execute_appoint(request: AppointmentRequest, output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.create_appointment(&request).await;
    finish(result, "Booking failed", |appointment| {
        if output.json {
            print_json(&appointment)
        } else {
            print_object("Appointment requested", &appointment);
            Ok(())
        }
    })
}

pub async fn execute_pending(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_pending_appointments().await;
    finish(result, "Failed to fetch pending appointments", |appointments| {
        if output.json {
            print_json(&appointments)
        } else {
            print_list("Pending appointments", &appointments, APPOINTMENT_FIELDS);
            Ok(())
        }
    })
}
