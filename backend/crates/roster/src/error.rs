//! Roster Error Types
//!
//! This module provides roster-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::error::ClientError;
use thiserror::Error;

/// Roster-specific result type alias
pub type RosterResult<T> = Result<T, RosterError>;

/// Roster-specific error variants
#[derive(Debug, Error)]
pub enum RosterError {
    /// Record does not exist (or is hidden from this user)
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Envelope arrived with `success: false`
    #[error("Request was not successful: {}", .message.as_deref().unwrap_or("no details"))]
    Unsuccessful { message: Option<String> },

    /// Envelope reported success without a payload
    #[error("Response for {0} carried no data")]
    MissingData(&'static str),

    /// HTTP client failure
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl RosterError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::NotFound { .. } => ErrorKind::NotFound,
            RosterError::Unsuccessful { .. } => ErrorKind::UnprocessableEntity,
            RosterError::MissingData(_) => ErrorKind::BadGateway,
            RosterError::Client(e) => e.kind(),
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        self.log();
        match self {
            RosterError::Client(e) => e.into_app_error(),
            RosterError::NotFound { resource, .. } => AppError::new(
                ErrorKind::NotFound,
                format!("The requested {} could not be found", resource),
            ),
            RosterError::Unsuccessful { message } => AppError::unprocessable(
                message.unwrap_or_else(|| "The request could not be completed".to_string()),
            ),
            RosterError::MissingData(_) => {
                AppError::bad_gateway("The server returned an empty response")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            RosterError::MissingData(resource) => {
                tracing::warn!(resource = %resource, "Envelope without data");
            }
            RosterError::Client(_) => {}
            _ => {
                tracing::debug!(error = %self, "Roster error");
            }
        }
    }
}
