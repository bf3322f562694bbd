//! HTTP client error types
//!
//! [`ClientError`] keeps the raw failure for callers that branch on it and
//! converts into [`AppError`] when the failure is shown to the user.

use http::StatusCode;
use kernel::envelope::{ErrorEnvelope, FieldError};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or transport failure, never retried
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Request rejected ({status}): {}", .body.description().unwrap_or("no details"))]
    Api {
        status: StatusCode,
        body: ErrorEnvelope,
    },

    /// Backend answered 401; the navigator has already been redirected
    #[error("Authentication required")]
    Unauthorized,

    /// The token refresh issued after a CSRF rejection failed
    #[error("CSRF token refresh failed: {0}")]
    CsrfRefresh(#[source] Box<ClientError>),

    /// Refresh endpoint answered without a usable token
    #[error("CSRF refresh response did not contain a token")]
    MissingCsrfToken,

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value for header {0}")]
    InvalidHeader(String),
}

impl ClientError {
    /// HTTP status of the failed response, when there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ClientError::Transport(e) => e.status(),
            ClientError::CsrfRefresh(inner) => inner.status(),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(e) if e.is_timeout() => ErrorKind::RequestTimeout,
            ClientError::Transport(_) => ErrorKind::ServiceUnavailable,
            ClientError::Api { status, .. } => ErrorKind::from_status_code(status.as_u16()),
            ClientError::Unauthorized => ErrorKind::Unauthorized,
            ClientError::CsrfRefresh(inner) => inner.kind(),
            ClientError::MissingCsrfToken | ClientError::Decode(_) => ErrorKind::BadGateway,
            ClientError::InvalidUrl { .. } | ClientError::InvalidHeader(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Field-level validation messages carried by the error body
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClientError::Api { body, .. } => &body.errors,
            _ => &[],
        }
    }

    /// Backend error code, if the body carried one
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { body, .. } => body.code.as_deref(),
            _ => None,
        }
    }

    /// Convert to a user-facing error
    pub fn into_app_error(self) -> AppError {
        self.log();
        match self {
            ClientError::Transport(e) => AppError::from(e),
            ClientError::Api { status, body } => {
                let message = body
                    .description()
                    .map(str::to_string)
                    .or_else(|| status.canonical_reason().map(str::to_string))
                    .unwrap_or_else(|| format!("Request failed with status {}", status));
                AppError::from_status(status.as_u16(), message).with_field_errors(body.errors)
            }
            ClientError::Unauthorized => AppError::unauthorized("Your session has expired")
                .with_action("Please sign in again"),
            ClientError::CsrfRefresh(inner) => {
                AppError::new(inner.kind(), "Could not refresh the security token")
                    .with_action("Reload the page and try again")
                    .with_source(*inner)
            }
            ClientError::MissingCsrfToken => {
                AppError::bad_gateway("The server did not issue a security token")
            }
            ClientError::Decode(e) => AppError::from(e),
            err @ (ClientError::InvalidUrl { .. } | ClientError::InvalidHeader(_)) => {
                AppError::internal("The client is misconfigured").with_source(err)
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ClientError::Transport(e) => tracing::warn!(error = %e, "Transport failure"),
            ClientError::Api { status, .. } if status.is_server_error() => {
                tracing::error!(error = %self, "Backend error")
            }
            ClientError::CsrfRefresh(inner) => {
                tracing::warn!(error = %inner, "CSRF token refresh failed")
            }
            ClientError::InvalidUrl { .. } | ClientError::InvalidHeader(_) => {
                tracing::error!(error = %self, "Client misconfigured")
            }
            _ => tracing::debug!(error = %self, "Request failed"),
        }
    }
}
