//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod call_service;
mod dashboard_service;
mod session_locks;

pub use call_service::{CallService, IncomingCall};
pub use dashboard_service::{DashboardService, TestCallError};
