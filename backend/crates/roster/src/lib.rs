//! Roster Client Module
//!
//! Typed access to the `/api/*` resources of the team-management backend.
//!
//! Clean Architecture structure:
//! - `domain/` - Resource entities and the `Resource` trait
//! - `application/` - List queries and configuration
//! - `infra/` - `ResourceClient` over the platform `ApiClient`
//!
//! ## Behaviour
//! - Envelopes are unwrapped; `success: false` becomes an error
//! - Reads are served from the shared query cache when enabled
//! - Mutations invalidate every cached read of their collection

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::RosterConfig;
pub use application::query::ListQuery;
pub use domain::entities::{Player, Recruit, ScheduleEvent, ScoutingReport, Team};
pub use domain::resource::{Page, Resource};
pub use error::{RosterError, RosterResult};
pub use infra::http::ResourceClient;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
