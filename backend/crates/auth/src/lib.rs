//! Auth (Authentication) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session state, user entity, value objects, gateway trait
//! - `application/` - Session context and use cases
//! - `infra/` - HTTP gateway over the platform `ApiClient`
//!
//! ## Features
//! - Session context with observers (loading / unauthenticated / authenticated)
//! - Sign in with email + password, best-effort sign out
//! - Profile edit and password change
//! - Role check for head coach privileges
//!
//! ## Security Model
//! - The session itself lives in an http-only cookie held by the HTTP client
//! - The CSRF token is cleared on logout; a 401 only moves the session to
//!   unauthenticated and leaves credentials to the backend

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session::{SessionContext, SubscriptionId};
pub use error::{AuthError, AuthResult};
pub use infra::http::HttpAuthGateway;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::state::*;
    pub use crate::domain::value_object::*;
}
