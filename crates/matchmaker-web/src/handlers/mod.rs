//! HTTP handlers for all API routes.

pub mod diseases;
pub mod system;
pub mod targets;
