//! Error types for the System Library client

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main client error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Problem body returned by the backend on 4xx/5xx responses
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProblemBody {
    title: Option<String>,
    detail: Option<String>,
    message: Option<String>,
}

impl AppError {
    /// Build an error from a non-success response status and its raw body.
    pub fn from_status(status: StatusCode, body: &str, resource: &str) -> Self {
        let problem: ProblemBody = serde_json::from_str(body).unwrap_or_default();
        let message = problem
            .detail
            .or(problem.title)
            .or(problem.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        match status {
            StatusCode::NOT_FOUND => AppError::NotFound(resource.to_string()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                AppError::Validation(message)
            }
            _ => AppError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// True when the failure happened before the backend answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Http(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
