//! Domain Layer
//!
//! Contains the session state, entities, value objects, and the gateway trait.

pub mod entity;
pub mod gateway;
pub mod state;
pub mod value_object;

// Re-exports
pub use entity::user::AuthenticatedUser;
pub use gateway::{AuthGateway, SignInOutcome};
pub use state::{SessionState, SessionStatus};
