//! Session state machines
//!
//! [`SessionService`] drives the per-member Working/Idle state and coarse
//! work sessions; [`AppSessionService`] tracks per-application focus bouts.

mod app_service;
pub mod ports;
mod service;

pub use app_service::AppSessionService;
pub use service::SessionService;
