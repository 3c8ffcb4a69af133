//! # Ask Command
//!
//! Consultation chat: ask questions (optionally with files), review the
//! conversation, start over, and turn it into a medical record.
//!
//! ## Usage
//!
//! ```bash
//! # Ask a question
//! medconsult ask "I have had a dry cough for two weeks"
//!
//! # Attach an image or report
//! medconsult ask "What does this rash look like?" --file rash.jpg
//!
//! # Save the exchange to the consultation history
//! medconsult ask "Is ibuprofen safe with my prescription?" --save
//! ```

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::api::Attachment;
use crate::commands::{connect, finish, print_json, print_object, render_scalar, OutputOptions};
use crate::errors::display_api_error;
use crate::exit_codes::*;

pub struct AskArgs {
    pub question: String,
    pub files: Vec<PathBuf>,
    /// Also persist the question/answer pair to the history.
    pub save: bool,
    pub output: OutputOptions,
}

pub async fn execute(args: AskArgs) -> Result<i32> {
    if args.question.trim().is_empty() {
        eprintln!("{} Question must not be empty", "Error:".red().bold());
        return Ok(EXIT_ERROR);
    }

    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let answer = if args.files.is_empty() {
        client.send_medical_query(&args.question).await
    } else {
        let mut attachments = Vec::with_capacity(args.files.len());
        for path in &args.files {
            match Attachment::from_path(path).await {
                Ok(attachment) => attachments.push(attachment),
                Err(e) => return Ok(display_api_error("Cannot read attachment", &e)),
            }
        }
        client
            .send_medical_query_with_files(&args.question, attachments)
            .await
    };

    let answer = match answer {
        Ok(answer) => answer,
        Err(e) => return Ok(display_api_error("Consultation failed", &e)),
    };

    let saved = if args.save {
        match client.create_medical_record(&args.question, &answer).await {
            Ok(record) => Some(record),
            Err(e) => {
                // The answer is still worth showing.
                println!("{}", answer);
                return Ok(display_api_error("Failed to save consultation", &e));
            }
        }
    } else {
        None
    };

    if args.output.json {
        print_json(&serde_json::json!({
            "question": args.question,
            "answer": answer,
            "saved": saved,
        }))?;
    } else {
        println!("{}", answer);
        if saved.is_some() {
            println!();
            println!("{} Saved to consultation history", "✓".green());
        }
    }
    Ok(EXIT_SUCCESS)
}

pub async fn execute_history(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.get_medical_chat_history().await;
    finish(result, "Failed to fetch chat history", |history| {
        if output.json {
            return print_json(&history);
        }
        println!("{} ({})", "Conversation".bold(), history.len());
        for entry in &history {
            println!();
            if let Some(created_at) = &entry.created_at {
                println!("{}", created_at.dimmed());
            }
            println!("{} {}", "Q:".cyan().bold(), entry.question);
            println!("{} {}", "A:".green().bold(), entry.answer);
        }
        Ok(())
    })
}

pub async fn execute_new_chat(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.start_new_medical_chat().await;
    finish(result, "Failed to start a new conversation", |body| {
        if output.json {
            return print_json(&body);
        }
        match body.get("message") {
            Some(message) => println!("{} {}", "✓".green(), render_scalar(message)),
            None => println!("{} New conversation started", "✓".green()),
        }
        Ok(())
    })
}

pub async fn execute_generate_record(output: OutputOptions) -> Result<i32> {
    let client = match connect() {
        Ok(client) => client,
        Err(code) => return Ok(code),
    };

    let result = client.generate_medical_record().await;
    finish(result, "Failed to generate medical record", |record| {
        if output.json {
            print_json(&record)
        } else {
            print_object("Generated medical record", &serde_json::Value::Object(record));
            Ok(())
        }
    })
}
