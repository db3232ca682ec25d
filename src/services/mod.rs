//! Service layer for business logic.
//!
//! This module contains services that encapsulate complex business logic
//! and coordinate between different parts of the application.

pub mod visits;

// Re-export commonly used types and functions
pub use visits::VisitListService;
