//! Activity ingestion and aggregation
//!
//! Samples arrive through [`ActivityService::log_activity`]; the pure
//! functions in [`aggregate`] turn stored samples into dashboard reports.

pub mod aggregate;
pub mod ports;
mod service;

pub use service::ActivityService;
