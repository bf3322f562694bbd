//! Infrastructure Layer
//!
//! HTTP implementation of the auth gateway.

pub mod dto;
pub mod http;

pub use http::HttpAuthGateway;
