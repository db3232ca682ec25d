//! Data models for the event catalog and visit lists.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod catalog;
pub mod cell;
pub mod circle;
pub mod visit;

// Re-export all model types
pub use catalog::{Block, Catalog, EventDay, Genre, Hall, VenueMap};
pub use cell::{CellOrientation, LayoutCell};
pub use circle::Circle;
pub use visit::{FavoriteRecord, VisitList, VisitListMeta, VISIT_LIST_VERSION};
