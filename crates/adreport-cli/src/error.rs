//! CLI error types.

use std::fmt;

use adreport_client::{ApiError, ApiErrorCode};

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug)]
pub enum CliError {
    /// Configuration error.
    Config(String),
    /// API error.
    Api(String),
    /// IO error.
    Io(std::io::Error),
    /// Authentication required.
    AuthRequired(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Api(msg) => write!(f, "API error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::AuthRequired(msg) => write!(f, "authentication required: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err.code() {
            ApiErrorCode::AuthenticationFailed => Self::AuthRequired(err.to_string()),
            ApiErrorCode::ConfigurationError => Self::Config(err.to_string()),
            _ => Self::Api(err.to_string()),
        }
    }
}
