//! Venue map engine: hit-testing, the visited overlay and highlight
//! blinking.
//!
//! Everything here is UI-agnostic. The map view feeds device-space
//! points into [`LayoutIndex::resolve`], draws the [`OverlayPath`]
//! maintained by [`OverlayState`], and consults [`BlinkState`] for
//! highlight visibility on each frame.

pub mod blink;
pub mod geometry;
pub mod index;
pub mod overlay;

pub use blink::BlinkState;
pub use geometry::{PointF, RectF};
pub use index::{HighlightSelection, IndexEntry, LayoutIndex};
pub use overlay::{recompute, CheckGlyph, OverlayPath, OverlayState};
