//! Exhibitor ("circle") records from the catalog snapshot.

use serde::{Deserialize, Serialize};

/// One exhibitor entry for one event day.
///
/// A circle occupies half of a layout cell: `space_sub` 0 is the "a"
/// half and 1 the "b" half. Two circles on the same day may share the
/// same `(block_id, space_number)` with different halves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    /// Catalog-wide exhibitor identifier.
    pub circle_id: u32,
    /// Circle name as printed in the catalog.
    pub name: String,
    /// Representative pen name.
    #[serde(default)]
    pub penname: String,
    /// Genre the circle is grouped under.
    pub genre_id: u32,
    /// Event day (1-based) the circle exhibits on.
    pub day: u8,
    /// Block of the assigned space.
    pub block_id: u32,
    /// Space number within the block.
    pub space_number: u32,
    /// Which half of the space: 0 = "a", 1 = "b".
    #[serde(default)]
    pub space_sub: u8,
    /// Free-form catalog description, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Circle {
    /// Letter suffix for the space half ("a" or "b").
    #[must_use]
    pub const fn space_sub_letter(&self) -> char {
        if self.space_sub == 0 {
            'a'
        } else {
            'b'
        }
    }

    /// Case-insensitive match of `query` against name and pen name.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.penname.to_lowercase().contains(&query)
    }
}
