//! Geometric primitives shared by hit-testing and overlay rendering.
//!
//! Venue coordinates are y-down with the origin at the top-left of a
//! map. Device coordinates are venue coordinates divided by the active
//! zoom divisor. Both hit-testing and the visited overlay derive
//! per-exhibitor sub-rectangles through the same two functions here
//! ([`slice_order`] and [`slice_rect`]), so a point resolved to an
//! exhibitor always lands inside the sub-rectangle its checkmark is
//! drawn in.

use crate::models::{CellOrientation, LayoutCell};

/// A point in venue or device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downward.
    pub y: f64,
}

impl PointF {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in venue or device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// Left edge.
    pub x: f64,
    /// Top edge (y grows downward).
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl RectF {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment test: the left and top edges belong to
    /// the rectangle, the right and bottom edges do not. Adjacent
    /// cells therefore never both claim a shared edge.
    #[must_use]
    pub fn contains(&self, point: PointF) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> PointF {
        PointF::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The largest square sharing this rectangle's center that fits
    /// inside it.
    #[must_use]
    pub fn inscribed_square(&self) -> RectF {
        let side = self.width.min(self.height);
        RectF::new(
            self.x + (self.width - side) / 2.0,
            self.y + (self.height - side) / 2.0,
            side,
            side,
        )
    }
}

/// Device-space rectangle of a layout cell.
///
/// Cells are `space_size` squares in venue coordinates; dividing by
/// the zoom divisor maps them into device space. A divisor of 1 yields
/// venue coordinates unchanged.
///
/// # Examples
///
/// ```
/// use hallmap::map::geometry::cell_rect;
/// use hallmap::models::{CellOrientation, LayoutCell};
///
/// let cell = LayoutCell {
///     block_id: 1,
///     space_number: 1,
///     x: 100,
///     y: 100,
///     orientation: CellOrientation::Left,
///     hall_id: 1,
///     map_id: 1,
/// };
/// let rect = cell_rect(&cell, 50, 2);
/// assert_eq!((rect.x, rect.y, rect.width, rect.height), (50.0, 50.0, 25.0, 25.0));
/// ```
#[must_use]
pub fn cell_rect(cell: &LayoutCell, space_size: u32, zoom_divisor: u32) -> RectF {
    let zoom = f64::from(zoom_divisor.max(1));
    let side = f64::from(space_size) / zoom;
    RectF::new(f64::from(cell.x) / zoom, f64::from(cell.y) / zoom, side, side)
}

/// Orders a cell's exhibitor ids into slice order.
///
/// Slice order is ascending by id, reversed for `Bottom` and `Right`
/// oriented cells so sub-slice 0 is always the slice at the smallest
/// coordinate along the split axis.
#[must_use]
pub fn slice_order(circle_ids: &[u32], orientation: CellOrientation) -> Vec<u32> {
    let mut ordered: Vec<u32> = circle_ids.to_vec();
    ordered.sort_unstable();
    if orientation.reverses_order() {
        ordered.reverse();
    }
    ordered
}

/// The `ordinal`-th of `count` equal sub-slices of a cell rectangle.
///
/// `Left`/`Right`/`Unknown` cells slice along x, `Top`/`Bottom` cells
/// along y. Ordinal 0 is the slice at the smallest coordinate; pair
/// ordinals with [`slice_order`] to find which exhibitor owns which
/// slice. Slice edges are computed from the ordinal so the last slice
/// always ends exactly on the cell edge.
#[must_use]
pub fn slice_rect(
    rect: &RectF,
    orientation: CellOrientation,
    ordinal: usize,
    count: usize,
) -> RectF {
    let count = count.max(1);
    let ordinal = ordinal.min(count - 1);
    let (lo, hi) = (ordinal as f64 / count as f64, (ordinal + 1) as f64 / count as f64);
    if orientation.splits_vertically() {
        let top = rect.y + rect.height * lo;
        RectF::new(rect.x, top, rect.width, rect.y + rect.height * hi - top)
    } else {
        let left = rect.x + rect.width * lo;
        RectF::new(left, rect.y, rect.x + rect.width * hi - left, rect.height)
    }
}
