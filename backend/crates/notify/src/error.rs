//! Notify Error Types
//!
//! Request-level errors keep the relay's historical wire contract: validation
//! and method errors are reported as plain text with a 200 status so existing
//! posting scripts keep working. Only authentication failures use an HTTP
//! error status.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use platform::duration::DurationParseError;
use thiserror::Error;

/// Challenge sent with every 401 response
pub const WWW_AUTHENTICATE_CHALLENGE: &str = r#"Basic realm="restricted", charset="UTF-8""#;

/// Notify-specific result type alias
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors produced while handling a request
#[derive(Debug, Error)]
pub enum NotifyError {
    /// POST without a title
    #[error("Title is required")]
    TitleRequired,

    /// POST without content
    #[error("Content is required")]
    ContentRequired,

    /// Any method other than GET and POST
    #[error("Unsupported method : {0}")]
    UnsupportedMethod(String),

    /// Missing, malformed or wrong Basic credentials
    #[error("Unauthorized")]
    Unauthorized,
}

impl NotifyError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            NotifyError::TitleRequired
            | NotifyError::ContentRequired
            | NotifyError::UnsupportedMethod(_) => StatusCode::OK,
            NotifyError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            NotifyError::UnsupportedMethod(method) => {
                tracing::debug!(method = %method, "Unsupported method");
            }
            NotifyError::Unauthorized => {
                tracing::debug!("Request rejected by auth gate");
            }
            _ => {
                tracing::debug!(error = %self, "Notification rejected");
            }
        }
    }
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        match self {
            // Empty body: never hint at which credential was wrong
            NotifyError::Unauthorized => (
                status,
                [(header::WWW_AUTHENTICATE, WWW_AUTHENTICATE_CHALLENGE)],
            )
                .into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}

/// Errors in the startup configuration. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("basic auth username must be provided")]
    MissingUsername,

    #[error("basic auth password must be provided")]
    MissingPassword,

    #[error("timeoff must be provided (e.g. 1h30m)")]
    MissingTimeOff,

    #[error("timeoff must be provided in the correct format (e.g. 1h30m): {value:?}")]
    InvalidTimeOff {
        value: String,
        #[source]
        source: DurationParseError,
    },
}
