//! Process exit codes used by the CLI.

/// Command completed successfully.
pub const EXIT_SUCCESS: i32 = 0;
/// Generic failure (server error, malformed response, bad input).
pub const EXIT_ERROR: i32 = 1;
/// Configuration could not be loaded or is invalid.
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Not logged in, or the session expired.
pub const EXIT_AUTH_ERROR: i32 = 3;
/// The backend could not be reached.
pub const EXIT_NETWORK_ERROR: i32 = 4;
/// The requested record does not exist.
pub const EXIT_NOT_FOUND: i32 = 5;
