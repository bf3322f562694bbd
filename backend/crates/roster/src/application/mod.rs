//! Application Layer
//!
//! Query building and configuration.

pub mod config;
pub mod query;

pub use config::RosterConfig;
pub use query::ListQuery;
