//! # WorkTracker Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The activity aggregation and categorization engine
//! - Session and idle state-machine services
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `worktracker-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod activity;
pub mod classify;
pub mod idle;
pub mod session;

// Re-export specific items to avoid ambiguity
pub use activity::ports::SampleRepository;
pub use activity::ActivityService;
pub use classify::{categorize, normalize_app_name, normalize_process_name};
pub use idle::IdleDetectionService;
pub use session::ports::{AppSessionRepository, TeamMemberRepository, WorkSessionRepository};
pub use session::{AppSessionService, SessionService};
