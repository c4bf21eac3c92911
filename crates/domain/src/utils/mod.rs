//! Pure domain utilities

pub mod time;
pub mod title;
