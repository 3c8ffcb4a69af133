//! # Records Commands
//!
//! Consultation history and structured medical records.

use anyhow::Result;
use colored::Colorize;
use serde_json::Value;

use crate::api::RecordId;
use crate::commands::{connect, finish, print_json, print_list, print_object, OutputOptions};

const HISTORY_FIELDS: &[&str] = &["id", "question", "created_at", "createdAt"];
const RECORD_FIELDS: &[&str] = &["id", "chief_complaint", "diagnosis", "created_at", "createdAt"];

pub async fn execute_recent(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_recent_medical_record().await;
    finish(result, "Failed to fetch recent consultation", |record| {
        if output.json {
            return print_json(&record);
        }
        match record {
            Some(record) => print_object("Most recent consultation", &Value::Object(record)),
            None => println!("{}", "No consultations yet".dimmed()),
        }
        Ok(())
    })
}

pub async fn execute_all(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_all_medical_records().await;
    finish(result, "Failed to fetch consultation history", |records| {
        if output.json {
            print_json(&records)
        } else {
            print_list("Consultations", &records, HISTORY_FIELDS);
            Ok(())
        }
    })
}

pub async fn execute_list(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_medical_records().await;
    finish(result, "Failed to fetch medical records", |records| {
        if output.json {
            print_json(&records)
        } else {
            print_list("Medical records", &records, RECORD_FIELDS);
            Ok(())
        }
    })
}

pub async fn execute_show(id: &str, output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_medical_record_detail(RecordId::parse(id)).await;
    finish(result, "Failed to fetch medical record", |record| {
        if output.json {
            print_json(&record)
        } else {
            print_object(&format!("Medical record {}", id), &Value::Object(record));
            Ok(())
        }
    })
}

pub async fn execute_create(question: &str, answer: &str, output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.create_medical_record(question, answer).await;
    finish(result, "Failed to save consultation", |record| {
        if output.json {
            print_json(&record)
        } else {
            print_object("Saved consultation", &record);
            Ok(())
        }
    })
}
