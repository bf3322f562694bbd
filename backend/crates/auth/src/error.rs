//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::error::ClientError;
use platform::password::Requirement;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Operation needs an authenticated session
    #[error("Not signed in")]
    NotAuthenticated,

    /// Invalid credentials (wrong email or password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Input rejected before reaching the backend
    #[error("Validation failed: {0}")]
    Validation(AppError),

    /// New password does not satisfy every requirement
    #[error("Password is too weak: missing {}", describe(.missing))]
    WeakPassword { missing: Vec<Requirement> },

    /// HTTP client failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe(missing: &[Requirement]) -> String {
    missing
        .iter()
        .map(Requirement::description)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::NotAuthenticated | AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::Validation(e) => e.kind(),
            AuthError::WeakPassword { .. } => ErrorKind::UnprocessableEntity,
            AuthError::Client(e) => e.kind(),
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether the backend rejected the session
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated | AuthError::Client(ClientError::Unauthorized)
        )
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        self.log();
        match self {
            AuthError::Client(e) => e.into_app_error(),
            AuthError::Validation(e) => e,
            AuthError::InvalidCredentials => AppError::unauthorized("Invalid email or password")
                .with_action("Check your credentials and try again"),
            AuthError::NotAuthenticated => {
                AppError::unauthorized("Not signed in").with_action("Please sign in")
            }
            err @ AuthError::WeakPassword { .. } => AppError::unprocessable(err.to_string()),
            AuthError::Internal(msg) => AppError::internal(msg),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Client(_) => {}
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err)
        }
    }
}
