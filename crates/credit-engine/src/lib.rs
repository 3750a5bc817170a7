//! Credit scoring and loan-affordability engine.
//!
//! The `lending` module holds the domain model and the decision engines;
//! `config`, `telemetry`, and `error` carry the service plumbing shared
//! with the API crate.

pub mod config;
pub mod error;
pub mod lending;
pub mod telemetry;
