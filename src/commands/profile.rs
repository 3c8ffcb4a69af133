//! # Profile Commands
//!
//! `whoami` and the `profile` subcommands.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::api::{Attachment, PasswordChange, ProfileUpdate};
use crate::commands::{connect, finish, print_json, print_object, render_scalar, OutputOptions};
use crate::errors::display_api_error;
use crate::exit_codes::*;

pub async fn execute_whoami(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_current_user().await;
    finish(result, "Failed to fetch current user", |user| {
        if output.json {
            print_json(&user)
        } else {
            print_object("Current user", &user);
            Ok(())
        }
    })
}

pub async fn execute_show(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_user_info().await;
    finish(result, "Failed to fetch profile", |info| {
        if output.json {
            print_json(&info)
        } else {
            print_object("Profile", &info);
            Ok(())
        }
    })
}

pub async fn execute_update(update: ProfileUpdate, output: OutputOptions) -> Result<i32> {
    if update.is_empty() {
        eprintln!(
            "{} Nothing to update; pass --nickname, --gender or --age",
            "Error:".red().bold()
        );
        return Ok(EXIT_ERROR);
    }

    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.update_user_info(&update).await;
    finish(result, "Failed to update profile", |info| {
        if output.json {
            print_json(&info)
        } else {
            print_object("Profile updated", &info);
            Ok(())
        }
    })
}

pub async fn execute_avatar(path: PathBuf, output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let avatar = match Attachment::from_path(&path).await {
        Ok(attachment) => attachment,
        Err(e) => return Ok(display_api_error("Cannot read avatar", &e)),
    };
    let result = client.upload_avatar(avatar).await;
    finish(result, "Avatar upload failed", |body| {
        if output.json {
            return print_json(&body);
        }
        match body.get("url") {
            Some(url) => println!("{} Avatar uploaded: {}", "✓".green(), render_scalar(url)),
            None => println!("{} Avatar uploaded", "✓".green()),
        }
        Ok(())
    })
}

pub async fn execute_password(change: PasswordChange, output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.change_password(&change).await;
    finish(result, "Password change failed", |body| {
        if output.json {
            return print_json(&body);
        }
        println!("{} Password changed", "✓".green());
        Ok(())
    })
}
