//! The visited overlay: checkmark glyphs over visited spaces.
//!
//! The overlay is a single vector path holding one checkmark per
//! visited exhibitor, recomputed from scratch whenever the visited set
//! or the layout index changes. Recomputation runs on a background
//! thread and the finished path is adopted atomically on the next
//! poll, so the UI never observes a partially built overlay.

use std::collections::HashSet;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

use crate::map::geometry::{cell_rect, slice_order, slice_rect, PointF};
use crate::map::index::LayoutIndex;

/// Checkmark vertices as fractions of the inscribed square's side,
/// y-down: start of the short stroke, the bottom vertex, end of the
/// long stroke.
const CHECK_ANCHORS: [(f64, f64); 3] = [(0.20, 0.55), (0.40, 0.75), (0.80, 0.30)];

/// One checkmark glyph: three points, two line segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckGlyph {
    /// Stroke points in draw order.
    pub points: [PointF; 3],
}

impl CheckGlyph {
    /// The two line segments of the stroke.
    #[must_use]
    pub const fn segments(&self) -> [(PointF, PointF); 2] {
        [
            (self.points[0], self.points[1]),
            (self.points[1], self.points[2]),
        ]
    }
}

/// The complete visited overlay for one map and day, in venue
/// coordinates. The map view scales it by the active zoom divisor when
/// drawing, so zoom changes never force a recompute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayPath {
    glyphs: Vec<CheckGlyph>,
}

impl OverlayPath {
    /// The glyphs in deterministic draw order.
    #[must_use]
    pub fn glyphs(&self) -> &[CheckGlyph] {
        &self.glyphs
    }

    /// Number of checkmarks in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the path draws nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Builds the visited overlay for an index and visited set.
///
/// For every visited exhibitor present in the index, the exhibitor's
/// venue-space sub-rectangle is derived exactly as hit-testing does
/// (slice order and equal split along the cell's orientation axis),
/// and a checkmark is inscribed in the largest centered square of that
/// sub-rectangle. Visited ids that are not in the index contribute
/// nothing. An empty visited set yields an empty path.
///
/// Glyph order follows index entry order, then slice order within a
/// cell, so identical inputs always produce an identical path.
#[must_use]
pub fn recompute(index: &LayoutIndex, visited: &HashSet<u32>, space_size: u32) -> OverlayPath {
    let mut glyphs = Vec::new();
    if visited.is_empty() {
        return OverlayPath { glyphs };
    }
    for entry in index.entries() {
        let ordered = slice_order(&entry.circle_ids, entry.cell.orientation);
        if ordered.iter().all(|id| !visited.contains(id)) {
            continue;
        }
        let rect = cell_rect(&entry.cell, space_size, 1);
        for (ordinal, circle_id) in ordered.iter().enumerate() {
            if !visited.contains(circle_id) {
                continue;
            }
            let slice = slice_rect(&rect, entry.cell.orientation, ordinal, ordered.len());
            let square = slice.inscribed_square();
            let points = CHECK_ANCHORS.map(|(fx, fy)| {
                PointF::new(square.x + square.width * fx, square.y + square.height * fy)
            });
            glyphs.push(CheckGlyph { points });
        }
    }
    OverlayPath { glyphs }
}

/// Result sent back from an overlay worker thread.
struct OverlayResult {
    generation: u64,
    path: OverlayPath,
}

/// Overlay state for tracking background recomputation.
///
/// Each call to [`Self::schedule`] bumps a generation counter, drops
/// the previous worker's channel and spawns a fresh one-shot thread;
/// a result is only adopted when its generation still matches, so a
/// superseded recompute can never overwrite a newer one.
pub struct OverlayState {
    path: OverlayPath,
    generation: u64,
    receiver: Option<Receiver<OverlayResult>>,
}

impl OverlayState {
    /// Creates an empty overlay with no recompute in flight.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: OverlayPath::default(),
            generation: 0,
            receiver: None,
        }
    }

    /// The overlay currently being drawn.
    #[must_use]
    pub fn path(&self) -> &OverlayPath {
        &self.path
    }

    /// Whether a recompute is still in flight.
    #[must_use]
    pub fn is_recomputing(&self) -> bool {
        self.receiver.is_some()
    }

    /// Generation of the most recently scheduled recompute.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedules a recompute on a background thread.
    ///
    /// The current path stays in place until the new one is adopted by
    /// [`Self::poll`].
    pub fn schedule(&mut self, index: Arc<LayoutIndex>, visited: HashSet<u32>, space_size: u32) {
        self.generation += 1;
        let generation = self.generation;
        let (sender, receiver) = channel();
        self.receiver = Some(receiver);

        thread::spawn(move || {
            let path = recompute(&index, &visited, space_size);
            // The UI may have scheduled a newer recompute and dropped
            // this channel; that is not an error.
            let _ = sender.send(OverlayResult { generation, path });
        });
    }

    /// Polls the worker channel, adopting a finished path.
    ///
    /// Returns `true` when the overlay changed and the map should be
    /// redrawn.
    pub fn poll(&mut self) -> bool {
        if let Some(receiver) = &self.receiver {
            match receiver.try_recv() {
                Ok(result) => {
                    self.receiver = None;
                    if result.generation == self.generation {
                        self.path = result.path;
                        true
                    } else {
                        // Stale result from a superseded schedule.
                        false
                    }
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => false,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    // Worker thread is gone without a result.
                    self.receiver = None;
                    false
                }
            }
        } else {
            false
        }
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}
