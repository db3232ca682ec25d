//! The layout index: coordinate hit-testing for one map and day.
//!
//! The index flattens the catalog's layout cells and exhibitor
//! assignments for a single map/day selection into an ordered entry
//! list. It is built once per selection, shared immutably with the
//! overlay worker, and rebuilt from scratch whenever the selection
//! changes.

use std::sync::Arc;

use crate::map::geometry::{cell_rect, slice_order, slice_rect, PointF, RectF};
use crate::models::{Catalog, LayoutCell};

/// One occupied cell and the exhibitors assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// The physical cell.
    pub cell: LayoutCell,
    /// Exhibitor ids in the cell, ascending.
    pub circle_ids: Vec<u32>,
}

/// The cell a map interaction resolved to.
///
/// Carries everything the UI needs to draw and describe the hit:
/// the cell, its exhibitors in slice order (the left-to-right or
/// top-to-bottom order they are drawn in) and the cell's device-space
/// rectangle at the zoom the hit was made at.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSelection {
    /// The resolved cell.
    pub cell: LayoutCell,
    /// Exhibitor ids in slice order.
    pub circle_ids: Vec<u32>,
    /// Device-space rectangle of the cell.
    pub rect: RectF,
}

impl HighlightSelection {
    /// Device-space sub-rectangle of the `ordinal`-th exhibitor in
    /// [`Self::circle_ids`].
    #[must_use]
    pub fn member_rect(&self, ordinal: usize) -> RectF {
        slice_rect(
            &self.rect,
            self.cell.orientation,
            ordinal,
            self.circle_ids.len().max(1),
        )
    }

    /// Position of a circle within the slice order, when present.
    #[must_use]
    pub fn member_index(&self, circle_id: u32) -> Option<usize> {
        self.circle_ids.iter().position(|&id| id == circle_id)
    }
}

/// Immutable hit-testing index for one map and day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutIndex {
    day: u8,
    map_id: u32,
    entries: Vec<IndexEntry>,
}

impl LayoutIndex {
    /// Builds the index for one map/day selection.
    ///
    /// Only cells with at least one exhibitor on the selected day get
    /// an entry; empty cells are drawn by the map view but never
    /// resolve to a selection. Entries inherit the catalog's
    /// `(block_id, space_number)` cell order, which fixes which cell
    /// wins when drawn rectangles happen to overlap.
    #[must_use]
    pub fn build(catalog: &Catalog, day: u8, map_id: u32) -> Self {
        let mut entries = Vec::new();
        for cell in catalog.cells_for_map(map_id) {
            // Circles are sorted by id, so the filter yields ascending ids.
            let circle_ids: Vec<u32> = catalog
                .circles_on_day(day)
                .filter(|c| c.block_id == cell.block_id && c.space_number == cell.space_number)
                .map(|c| c.circle_id)
                .collect();
            if !circle_ids.is_empty() {
                entries.push(IndexEntry {
                    cell: *cell,
                    circle_ids,
                });
            }
        }
        Self {
            day,
            map_id,
            entries,
        }
    }

    /// An empty index, used before a catalog is loaded.
    #[must_use]
    pub fn empty(day: u8, map_id: u32) -> Arc<Self> {
        Arc::new(Self {
            day,
            map_id,
            entries: Vec::new(),
        })
    }

    /// Day this index was built for.
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Map this index was built for.
    #[must_use]
    pub const fn map_id(&self) -> u32 {
        self.map_id
    }

    /// The index entries in `(block_id, space_number)` order.
    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no cell on this map is occupied on this day.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a device-space point to the cell under it.
    ///
    /// Walks the entries in order and returns the first whose
    /// device-space rectangle contains the point; containment is
    /// half-open so a point on a shared edge belongs to exactly one
    /// cell. Points outside every occupied cell resolve to `None`
    /// without complaint.
    ///
    /// # Arguments
    ///
    /// * `point` - Device-space point (venue coordinates divided by
    ///   `zoom_divisor`)
    /// * `zoom_divisor` - Active zoom divisor; 0 is treated as 1
    /// * `space_size` - Cell side length in venue coordinates
    #[must_use]
    pub fn resolve(
        &self,
        point: PointF,
        zoom_divisor: u32,
        space_size: u32,
    ) -> Option<HighlightSelection> {
        for entry in &self.entries {
            let rect = cell_rect(&entry.cell, space_size, zoom_divisor);
            if rect.contains(point) {
                return Some(HighlightSelection {
                    cell: entry.cell,
                    circle_ids: slice_order(&entry.circle_ids, entry.cell.orientation),
                    rect,
                });
            }
        }
        None
    }

    /// Finds the cell an exhibitor sits in and its slice position.
    ///
    /// Used to jump from the circle list to the map. Returns the same
    /// selection [`Self::resolve`] would produce for a point inside
    /// the cell, plus the exhibitor's ordinal in slice order.
    #[must_use]
    pub fn locate_circle(
        &self,
        circle_id: u32,
        zoom_divisor: u32,
        space_size: u32,
    ) -> Option<(HighlightSelection, usize)> {
        for entry in &self.entries {
            if entry.circle_ids.contains(&circle_id) {
                let selection = HighlightSelection {
                    cell: entry.cell,
                    circle_ids: slice_order(&entry.circle_ids, entry.cell.orientation),
                    rect: cell_rect(&entry.cell, space_size, zoom_divisor),
                };
                let ordinal = selection.member_index(circle_id)?;
                return Some((selection, ordinal));
            }
        }
        None
    }
}
