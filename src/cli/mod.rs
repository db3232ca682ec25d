//! CLI command handlers for Hallmap.
//!
//! This module provides headless, scriptable access to the catalog
//! tooling for automation, testing, and CI integration.

pub mod common;
pub mod export;
pub mod inspect;
pub mod search;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::ExitCode;
pub use export::ExportArgs;
pub use inspect::InspectArgs;
pub use search::SearchArgs;
pub use validate::ValidateArgs;
