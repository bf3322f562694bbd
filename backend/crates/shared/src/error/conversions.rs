//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
#[cfg(feature = "reqwest")]
use super::kind::ErrorKind;

// ============================================================================
// serde_json conversions
// ============================================================================

// A payload that does not decode came from the backend, not from the user.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_gateway(format!("Unexpected response payload: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// reqwest conversions (feature-gated)
// ============================================================================

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return AppError::new(ErrorKind::RequestTimeout, "The server took too long to respond")
                .with_action("Please try again")
                .with_source(err);
        }
        if err.is_connect() {
            return AppError::service_unavailable("Unable to reach the server")
                .with_action("Check your connection and try again")
                .with_source(err);
        }
        if let Some(status) = err.status() {
            let status = status.as_u16();
            return AppError::from_status(status, format!("Request failed with status {}", status))
                .with_source(err);
        }
        if err.is_decode() {
            return AppError::bad_gateway("Unexpected response from the server").with_source(err);
        }
        AppError::internal("Request could not be sent").with_source(err)
    }
}
