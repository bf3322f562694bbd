//! Entity Module

pub mod profile;
pub mod user;

pub use profile::{PasswordChange, ProfileUpdate};
pub use user::AuthenticatedUser;
