//! Platform Crate - Client-side technical infrastructure
//!
//! This crate provides the technical foundations shared by the feature crates:
//! - CSRF-aware HTTP client with a single refresh-and-retry cycle
//! - CSRF token cache (one token per client, injected, never global)
//! - Navigation and notice seams for the surrounding UI shell
//! - Query cache for decoded read responses
//! - Password strength evaluation

pub mod client;
pub mod config;
pub mod csrf;
pub mod error;
pub mod navigation;
pub mod notice;
pub mod password;
pub mod query_cache;
pub mod retry;

pub use client::{ApiClient, ApiRequest, ApiResponse};
pub use config::ClientConfig;
pub use csrf::{CsrfToken, CsrfTokenCache};
pub use error::{ClientError, ClientResult};
