//! Command layer
//!
//! Thin async functions over [`crate::AppContext`], one per externally
//! exposed operation. Every command logs its outcome with a stable command
//! name and duration.

pub mod activity;
pub mod sessions;
