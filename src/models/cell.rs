//! Venue layout cells and their orientation.
//!
//! A layout cell is one physical exhibitor space drawn on a venue map.
//! Cells are loaded once from the catalog snapshot and never mutated;
//! the map index copies them into its entries.

use serde::{Deserialize, Serialize};

/// How a cell splits into per-exhibitor sub-slices when more than one
/// exhibitor shares it.
///
/// `Left`/`Right` cells slice along the x axis, `Top`/`Bottom` cells
/// along the y axis. `Bottom` and `Right` reverse the slice order so
/// that walking the aisle reads the spaces in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CellOrientation {
    /// Orientation missing from the source data. Treated like `Left`.
    #[default]
    Unknown,
    /// Spaces face an aisle on the left; slices run left to right.
    Left,
    /// Spaces face an aisle below; slices run bottom to top.
    Bottom,
    /// Spaces face an aisle on the right; slices run right to left.
    Right,
    /// Spaces face an aisle above; slices run top to bottom.
    Top,
}

impl CellOrientation {
    /// Numeric code used by the catalog snapshot format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Left => 1,
            Self::Bottom => 2,
            Self::Right => 3,
            Self::Top => 4,
        }
    }

    /// Whether sub-slice order is reversed relative to ascending
    /// exhibitor order.
    #[must_use]
    pub const fn reverses_order(self) -> bool {
        matches!(self, Self::Bottom | Self::Right)
    }

    /// Whether sub-slices stack along the y axis instead of the x axis.
    #[must_use]
    pub const fn splits_vertically(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl From<u8> for CellOrientation {
    /// Codes outside the known range degrade to `Unknown`.
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Left,
            2 => Self::Bottom,
            3 => Self::Right,
            4 => Self::Top,
            _ => Self::Unknown,
        }
    }
}

impl From<CellOrientation> for u8 {
    fn from(orientation: CellOrientation) -> Self {
        orientation.code()
    }
}

/// One physical exhibitor space on a venue map.
///
/// `(block_id, space_number)` is the cell identity and is unique within
/// an event. Position is the cell's top-left corner in venue
/// coordinates (y grows downward); the cell spans one `space_size`
/// square of the map it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCell {
    /// Block the space belongs to (e.g. the "\u{3042}" block).
    pub block_id: u32,
    /// Space number within the block.
    pub space_number: u32,
    /// Top-left x in venue coordinates.
    pub x: i32,
    /// Top-left y in venue coordinates (y grows downward).
    pub y: i32,
    /// Which way the cell's sub-slices stack.
    pub orientation: CellOrientation,
    /// Hall the cell sits in.
    pub hall_id: u32,
    /// Venue map the cell is drawn on.
    pub map_id: u32,
}

impl LayoutCell {
    /// The `(block_id, space_number)` pair identifying this cell.
    #[must_use]
    pub const fn identity(&self) -> (u32, u32) {
        (self.block_id, self.space_number)
    }
}
