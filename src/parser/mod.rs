//! Parsing and serialization for various file formats.
//!
//! This module handles reading catalog snapshot JSON files and reading
//! and writing visit lists as Markdown with YAML frontmatter.

pub mod catalog_json;
pub mod visit_list;

// Re-export commonly used functions
pub use catalog_json::{load_catalog, parse_catalog_str, validate_catalog};
pub use visit_list::{parse_visit_list, save_visit_list};
