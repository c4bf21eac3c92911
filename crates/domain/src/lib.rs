//! # WorkTracker Domain
//!
//! Business domain types and models for WorkTracker.
//!
//! This crate contains:
//! - Domain data types (ActivitySample, AppSession, TeamMember, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures and the fixed team roster
//! - Domain constants and pure time helpers
//!
//! ## Architecture
//! - No dependencies on other WorkTracker crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod roster;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use roster::Roster;
pub use types::*;
