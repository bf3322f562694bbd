//! Application Layer
//!
//! Session context and use cases.

pub mod config;
pub mod profile;
pub mod session;
pub mod sign_in;

// Re-exports
pub use config::AuthConfig;
pub use profile::ProfileUseCase;
pub use session::{SessionContext, SubscriptionId};
pub use sign_in::{SignInInput, SignInUseCase};
