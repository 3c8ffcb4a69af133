//! # CLI Commands
//!
//! Each command loads configuration, builds an [`ApiClient`], makes one
//! call and renders the result either as text or as pretty JSON.

pub mod appointments;
pub mod ask;
pub mod auth;
pub mod profile;
pub mod records;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::errors::display_api_error;
use crate::exit_codes::*;

/// Rendering options shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Print raw JSON instead of text.
    pub json: bool,
}

/// Load configuration and build a client, or return the exit code to use.
pub(crate) fn connect() -> std::result::Result<ApiClient, i32> {
    let config = Config::load().map_err(|e| {
        eprintln!("{} {}", "Config error:".red().bold(), e);
        EXIT_CONFIG_ERROR
    })?;
    config
        .api_client()
        .map_err(|e| display_api_error("Failed to create HTTP client", &e))
}

/// Render a successful result or report the failure.
pub(crate) fn finish<T>(
    result: std::result::Result<T, ApiError>,
    context: &str,
    render: impl FnOnce(T) -> Result<()>,
) -> Result<i32> {
    match result {
        Ok(value) => {
            render(value)?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => Ok(display_api_error(context, &e)),
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a JSON value on one line, without quotes around strings.
pub(crate) fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Print an object as aligned `key: value` lines.
pub(crate) fn print_object(title: &str, value: &Value) {
    println!("{}", title.bold());
    match value {
        Value::Object(map) => {
            let width = map.keys().map(|k| k.len()).max().unwrap_or(0);
            for (key, val) in map {
                let label = format!("{:width$}", key, width = width);
                println!("  {}  {}", label.dimmed(), render_scalar(val));
            }
        }
        other => println!("  {}", render_scalar(other)),
    }
}

/// One summary line per item, showing the given fields when present.
pub(crate) fn summary_line(item: &Value, fields: &[&str]) -> String {
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|f| item.get(*f).map(|v| format!("{}={}", f, render_scalar(v))))
        .collect();
    if parts.is_empty() {
        item.to_string()
    } else {
        parts.join("  ")
    }
}

pub(crate) fn print_list(title: &str, items: &[Value], fields: &[&str]) {
    println!("{} ({})", title.bold(), items.len());
    if items.is_empty() {
        println!("  {}", "nothing to show".dimmed());
    }
    for item in items {
        println!("  • {}", summary_line(item, fields));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_scalar() {
        assert_eq!(render_scalar(&json!("text")), "text");
        assert_eq!(render_scalar(&json!(null)), "-");
        assert_eq!(render_scalar(&json!(3)), "3");
    }

    #[test]
    fn test_summary_line_picks_fields() {
        let item = json!({"id": 4, "name": "Cardiology", "extra": true});
        assert_eq!(summary_line(&item, &["id", "name"]), "id=4  name=Cardiology");
        assert_eq!(summary_line(&json!(5), &["id"]), "5");
    }
}
