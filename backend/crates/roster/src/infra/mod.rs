//! Infrastructure Layer
//!
//! HTTP implementation of the resource clients.

pub mod http;

pub use http::ResourceClient;
