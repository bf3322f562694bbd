//! Value Object Module

pub mod credentials;
pub mod email;
pub mod user_role;

pub use credentials::Credentials;
pub use email::Email;
pub use user_role::UserRole;
