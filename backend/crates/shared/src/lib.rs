//! Shared Kernel - Vocabulary shared by every client crate
//!
//! This crate contains the pieces that mean the same thing everywhere:
//! - Error classification and the user-facing [`error::app_error::AppError`]
//! - Typed integer identifiers for backend records
//! - The `{ success, data, pagination? }` response envelopes
//!
//! **Design Principle**: Nothing here knows how a request is sent.

pub mod envelope;
pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
