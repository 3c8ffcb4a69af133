//! # Error Display
//!
//! Maps API errors to exit codes and prints them with a short hint.

use colored::Colorize;

use crate::api::{ApiError, ErrorKind};
use crate::exit_codes::*;

/// Exit code for an API failure.
pub fn exit_code_for(error: &ApiError) -> i32 {
    match error.kind() {
        ErrorKind::Unauthenticated => EXIT_AUTH_ERROR,
        ErrorKind::Network => EXIT_NETWORK_ERROR,
        ErrorKind::NotFound => EXIT_NOT_FOUND,
        _ => EXIT_ERROR,
    }
}

fn hint_for(error: &ApiError) -> Option<&'static str> {
    match error.kind() {
        ErrorKind::Unauthenticated => Some("Run `medconsult login` to sign in again."),
        ErrorKind::Network => {
            Some("Check that the backend is running and MEDCONSULT_API_URL is correct.")
        }
        ErrorKind::MalformedResponse => {
            Some("The server answered with unexpected data; it may be a different API version.")
        }
        ErrorKind::Session => Some("Check permissions on the session file (MEDCONSULT_SESSION_FILE)."),
        _ => None,
    }
}

/// Print an API error to stderr and return the matching exit code.
pub fn display_api_error(context: &str, error: &ApiError) -> i32 {
    eprintln!("{} {}: {}", "Error:".red().bold(), context, error);
    if let Some(hint) = hint_for(error) {
        eprintln!("  {} {}", "Hint:".yellow(), hint);
    }
    exit_code_for(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let unauth = ApiError::Unauthenticated {
            message: "expired".to_string(),
        };
        assert_eq!(exit_code_for(&unauth), EXIT_AUTH_ERROR);

        let not_found = ApiError::NotFound {
            message: "gone".to_string(),
        };
        assert_eq!(exit_code_for(&not_found), EXIT_NOT_FOUND);

        let server = ApiError::Server {
            message: "boom".to_string(),
        };
        assert_eq!(exit_code_for(&server), EXIT_ERROR);
        assert!(hint_for(&server).is_none());
        assert!(hint_for(&unauth).unwrap().contains("login"));
    }
}
