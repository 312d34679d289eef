//! CLI error types.

use serde::Deserialize;
use thiserror::Error;

/// Exit code for a successful run.
pub const EXIT_OK: i32 = 0;
/// Exit code when the service or the transport reported a failure.
pub const EXIT_REMOTE: i32 = 1;
/// Exit code for usage errors (missing arguments, unknown object or action).
pub const EXIT_USAGE: i32 = 2;
/// Exit code for configuration and credential errors.
pub const EXIT_CONFIG: i32 = 3;
/// Exit code when a looked-up resource does not exist.
pub const EXIT_NOT_FOUND: i32 = 4;

/// Error document returned by the identity service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteError {
    /// HTTP status code.
    #[serde(default)]
    pub status: u16,
    /// Service-specific error code.
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Message aimed at the integrating developer.
    #[serde(default)]
    pub developer_message: String,
    /// Link to documentation about the error.
    #[serde(default)]
    pub more_info: String,
}

impl RemoteError {
    /// Builds an error for a response whose body is not an error document.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = if body.trim().is_empty() {
            format!("request failed with HTTP status {status}")
        } else {
            body
        };

        Self {
            status,
            code: i64::from(status),
            developer_message: message.clone(),
            message,
            more_info: String::new(),
        }
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HTTP {}, code {})", self.message, self.status, self.code)
    }
}

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The API key file could not be read or parsed.
    #[error("credential error: {0}")]
    Credentials(String),

    /// The service answered with an error document.
    #[error("remote error: {0}")]
    Remote(RemoteError),

    /// Required options are absent.
    #[error("Missing arguments: {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    /// Unknown action under a known object.
    #[error("Invalid {object} action")]
    InvalidAction {
        /// Object token the action was given for.
        object: String,
    },

    /// No account in the scanned collection has the requested email.
    #[error("Account not found.")]
    AccountNotFound,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Remote(_) | CliError::Http(_) | CliError::Json(_) | CliError::Io(_) => {
                EXIT_REMOTE
            }
            CliError::MissingArguments(_) | CliError::InvalidAction { .. } => EXIT_USAGE,
            CliError::Config(_) | CliError::Credentials(_) => EXIT_CONFIG,
            CliError::AccountNotFound => EXIT_NOT_FOUND,
        }
    }
}

impl From<RemoteError> for CliError {
    fn from(e: RemoteError) -> Self {
        CliError::Remote(e)
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(CliError::Remote(RemoteError::default()).exit_code(), EXIT_REMOTE);
        assert_eq!(CliError::MissingArguments(vec![]).exit_code(), EXIT_USAGE);
        assert_eq!(
            CliError::InvalidAction {
                object: "group".to_string()
            }
            .exit_code(),
            EXIT_USAGE
        );
        assert_eq!(CliError::Credentials("x".to_string()).exit_code(), EXIT_CONFIG);
        assert_eq!(CliError::AccountNotFound.exit_code(), EXIT_NOT_FOUND);
    }

    #[test]
    fn invalid_action_message_names_object() {
        let err = CliError::InvalidAction {
            object: "directory".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid directory action");
    }

    #[test]
    fn remote_error_parses_service_document() {
        let body = r#"{
            "status": 400,
            "code": 2001,
            "message": "Account with that email already exists.",
            "developerMessage": "Account email must be unique.",
            "moreInfo": "https://docs.example.com/errors/2001"
        }"#;

        let err: RemoteError = serde_json::from_str(body).unwrap();
        assert_eq!(err.status, 400);
        assert_eq!(err.code, 2001);
        assert_eq!(err.developer_message, "Account email must be unique.");
        assert_eq!(err.more_info, "https://docs.example.com/errors/2001");
    }

    #[test]
    fn remote_error_from_plain_body() {
        let err = RemoteError::from_status(502, String::new());
        assert_eq!(err.status, 502);
        assert!(err.message.contains("502"));
    }
}
