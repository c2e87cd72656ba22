//! Search and analytics core for public-housing sale exercises.
//!
//! Everything under [`listing`], [`search`], [`ballot`], [`metrics`] and
//! [`dashboard`] is pure: identical inputs produce identical outputs and no
//! I/O happens outside [`listing::loader`].

pub mod ballot;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod listing;
pub mod metrics;
pub mod search;
pub mod telemetry;

pub use dashboard::{bounds_for_exercise, Dashboard, DashboardOptions, UnitView};
