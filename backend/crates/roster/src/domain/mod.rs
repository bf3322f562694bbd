//! Domain Layer
//!
//! Resource entities and the trait tying them to their collections.

pub mod entities;
pub mod resource;

pub use entities::{Player, Recruit, ScheduleEvent, ScoutingReport, Team};
pub use resource::{Page, Resource};
