//! # Auth Commands
//!
//! `login`, `register`, `logout` and `status`.

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

use crate::api::{Attachment, DoctorRegistration, PatientRegistration, UserType};
use crate::commands::{connect, finish, print_json, print_object, OutputOptions};
use crate::config::Config;
use crate::errors::display_api_error;
use crate::exit_codes::*;

pub struct LoginArgs {
    pub phone: String,
    pub password: String,
    pub user_type: UserType,
    pub output: OutputOptions,
}

pub async fn execute_login(args: LoginArgs) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client
        .login(&args.phone, &args.password, args.user_type)
        .await;
    finish(result, "Login failed", |body| {
        if args.output.json {
            return print_json(&body);
        }
        if body.pointer("/data/token").and_then(|t| t.as_str()).is_some() {
            println!("{} Logged in as {}", "✓".green(), args.phone.bold());
        } else {
            println!(
                "{} Server accepted the login but returned no token",
                "!".yellow()
            );
        }
        Ok(())
    })
}

pub struct RegisterPatientArgs {
    pub phone: String,
    pub password: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub output: OutputOptions,
}

pub async fn execute_register_patient(args: RegisterPatientArgs) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let registration = PatientRegistration {
        phone: args.phone,
        password: args.password,
        full_name: args.full_name,
        birth_date: args.birth_date,
    };
    let result = client.register_patient(&registration).await;
    finish(result, "Registration failed", |body| {
        if args.output.json {
            return print_json(&body);
        }
        println!("{} Patient account registered", "✓".green());
        Ok(())
    })
}

pub struct RegisterDoctorArgs {
    pub registration: DoctorRegistration,
    pub certificate: PathBuf,
    pub output: OutputOptions,
}

pub async fn execute_register_doctor(args: RegisterDoctorArgs) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let certificate = match Attachment::from_path(&args.certificate).await {
        Ok(attachment) => attachment,
        Err(e) => return Ok(display_api_error("Cannot read certificate", &e)),
    };
    let result = client.register_doctor(args.registration, certificate).await;
    finish(result, "Registration failed", |body| {
        if args.output.json {
            return print_json(&body);
        }
        println!(
            "{} Doctor account submitted; it becomes active once the certificate is reviewed",
            "✓".green()
        );
        Ok(())
    })
}

pub async fn execute_logout(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.logout().await;
    finish(result, "Logout request failed (local session was cleared)", |body| {
        if output.json {
            return print_json(&body);
        }
        println!("{} Logged out", "✓".green());
        Ok(())
    })
}

/// Show configuration and local session state without contacting the server.
pub fn execute_status(output: OutputOptions) -> Result<i32> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Config error:".red().bold(), e);
            return Ok(EXIT_CONFIG_ERROR);
        }
    };
    let client = match config.api_client() {
        Ok(client) => client,
        Err(e) => return Ok(display_api_error("Failed to create HTTP client", &e)),
    };

    let status = json!({
        "api_url": config.base_url(),
        "session_file": config.session_file.display().to_string(),
        "logged_in": client.is_logged_in(),
        "user": client.cached_user(),
    });

    if output.json {
        print_json(&status)?;
    } else {
        print_object("Status", &status);
    }

    Ok(if client.is_logged_in() {
        EXIT_SUCCESS
    } else {
        EXIT_AUTH_ERROR
    })
}
