//! Error types for the satcon CLI.

use std::fmt;

use satcon_client::{AuthError, ClientError};

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// The service call failed
    Client(ClientError),

    /// Credentials could not be set up
    Auth(AuthError),

    /// A flag required by the chosen action was not given
    MissingArgument(&'static str),

    /// A flag value could not be used
    InvalidArgument(String),

    /// IO error (reading version files, writing output)
    Io(std::io::Error),

    /// Output could not be encoded
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Client(e) => write!(f, "{}", e),
            CliError::Auth(e) => write!(f, "{}", e),
            CliError::MissingArgument(flag) => {
                write!(f, "Missing required argument: {}", flag)
            }
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Json(e) => write!(f, "Output error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        CliError::Client(e)
    }
}

impl From<AuthError> for CliError {
    fn from(e: AuthError) -> Self {
        CliError::Auth(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

/// Unwrap an optional flag value or report it as missing.
pub fn required<T>(value: Option<T>, flag: &'static str) -> CliResult<T> {
    value.ok_or(CliError::MissingArgument(flag))
}
