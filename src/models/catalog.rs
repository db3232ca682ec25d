//! The in-memory event catalog.
//!
//! A [`Catalog`] bundles everything one event snapshot describes: days,
//! halls, venue maps, blocks, genres, the venue layout cells and the
//! exhibitor list. It is loaded once at startup and treated as
//! immutable afterwards; all mutable state (favorites, visited marks)
//! lives in the visit list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Circle, LayoutCell};

/// One day of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDay {
    /// Day number, 1-based.
    pub day: u8,
    /// Calendar date of the day.
    pub date: NaiveDate,
}

/// An exhibition hall within the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hall {
    /// Hall identifier.
    pub hall_id: u32,
    /// Display name (e.g. "East 1-2-3").
    pub name: String,
    /// Venue map the hall is drawn on.
    pub map_id: u32,
}

/// A named block of spaces ("\u{3042}", "A", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block identifier.
    pub block_id: u32,
    /// Short block name printed on space labels.
    pub name: String,
}

/// A catalog genre grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre identifier.
    pub genre_id: u32,
    /// Genre display name.
    pub name: String,
}

/// One venue map image's coordinate space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueMap {
    /// Map identifier.
    pub map_id: u32,
    /// Display name.
    pub name: String,
    /// Width in venue coordinates.
    pub width: u32,
    /// Height in venue coordinates.
    pub height: u32,
    /// Side length of one layout cell in venue coordinates.
    pub space_size: u32,
}

/// A complete event catalog snapshot.
///
/// Ordering invariants established by the loader and relied on
/// throughout: `circles` is sorted by `circle_id`, `cells` by
/// `(block_id, space_number)`. Lookups below binary-search on these
/// orderings.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Event display name (e.g. "Comic Market 105").
    pub event_name: String,
    /// Event days, ascending.
    pub days: Vec<EventDay>,
    /// Exhibition halls.
    pub halls: Vec<Hall>,
    /// Venue maps referenced by the halls.
    pub maps: Vec<VenueMap>,
    /// Space blocks.
    pub blocks: Vec<Block>,
    /// Catalog genres.
    pub genres: Vec<Genre>,
    /// Layout cells, sorted by `(block_id, space_number)`.
    pub cells: Vec<LayoutCell>,
    /// Exhibitors, sorted by `circle_id`.
    pub circles: Vec<Circle>,
}

impl Catalog {
    /// Looks up a circle by its identifier.
    #[must_use]
    pub fn circle(&self, circle_id: u32) -> Option<&Circle> {
        self.circles
            .binary_search_by_key(&circle_id, |c| c.circle_id)
            .ok()
            .map(|idx| &self.circles[idx])
    }

    /// Looks up a layout cell by its `(block_id, space_number)` identity.
    #[must_use]
    pub fn cell(&self, block_id: u32, space_number: u32) -> Option<&LayoutCell> {
        self.cells
            .binary_search_by_key(&(block_id, space_number), LayoutCell::identity)
            .ok()
            .map(|idx| &self.cells[idx])
    }

    /// Display name of a block, when known.
    #[must_use]
    pub fn block_name(&self, block_id: u32) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.block_id == block_id)
            .map(|b| b.name.as_str())
    }

    /// Display name of a genre, when known.
    #[must_use]
    pub fn genre_name(&self, genre_id: u32) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.genre_id == genre_id)
            .map(|g| g.name.as_str())
    }

    /// Hall record by identifier.
    #[must_use]
    pub fn hall(&self, hall_id: u32) -> Option<&Hall> {
        self.halls.iter().find(|h| h.hall_id == hall_id)
    }

    /// Venue map record by identifier.
    #[must_use]
    pub fn map(&self, map_id: u32) -> Option<&VenueMap> {
        self.maps.iter().find(|m| m.map_id == map_id)
    }

    /// Day numbers of the event, ascending.
    #[must_use]
    pub fn day_numbers(&self) -> Vec<u8> {
        self.days.iter().map(|d| d.day).collect()
    }

    /// Space label the catalog prints for a circle, e.g. "\u{3042}-42b".
    ///
    /// Falls back to the numeric block id when the block name is not in
    /// the snapshot.
    #[must_use]
    pub fn space_label(&self, circle: &Circle) -> String {
        let block = self
            .block_name(circle.block_id)
            .map_or_else(|| circle.block_id.to_string(), ToString::to_string);
        format!(
            "{}-{:02}{}",
            block,
            circle.space_number,
            circle.space_sub_letter()
        )
    }

    /// Layout cells drawn on one venue map, in `(block_id,
    /// space_number)` order.
    pub fn cells_for_map(&self, map_id: u32) -> impl Iterator<Item = &LayoutCell> {
        self.cells.iter().filter(move |c| c.map_id == map_id)
    }

    /// Circles exhibiting on one day, in `circle_id` order.
    pub fn circles_on_day(&self, day: u8) -> impl Iterator<Item = &Circle> {
        self.circles.iter().filter(move |c| c.day == day)
    }

    /// Circles occupying one cell on one day, ordered by space half
    /// then identifier.
    #[must_use]
    pub fn circles_in_cell(&self, day: u8, block_id: u32, space_number: u32) -> Vec<&Circle> {
        let mut found: Vec<&Circle> = self
            .circles
            .iter()
            .filter(|c| {
                c.day == day && c.block_id == block_id && c.space_number == space_number
            })
            .collect();
        found.sort_by_key(|c| (c.space_sub, c.circle_id));
        found
    }
}
