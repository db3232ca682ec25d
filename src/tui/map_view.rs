//! The venue map widget.
//!
//! Draws the current map's layout cells, the visited overlay and the
//! active highlight on a braille canvas, and maps terminal mouse
//! positions back into device-space points for hit-testing. Device
//! space is venue space divided by the zoom divisor; one device unit
//! corresponds to one braille dot, so zooming out (larger divisor)
//! fits more of the venue on screen.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Line, Rectangle},
        Block, Borders,
    },
    Frame,
};

use crate::map::geometry::{cell_rect, PointF, RectF};
use crate::tui::AppState;

/// Horizontal braille dots per terminal cell.
const DOTS_X: f64 = 2.0;
/// Vertical braille dots per terminal cell.
const DOTS_Y: f64 = 4.0;

/// Scroll position of the map view, in device-space units.
///
/// Offsets are stored unclamped; [`Self::clamped`] resolves them
/// against the current map and widget size, so resizes and zoom
/// changes never leave the view stranded outside the map.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapViewport {
    /// Requested left edge.
    pub offset_x: f64,
    /// Requested top edge.
    pub offset_y: f64,
}

impl MapViewport {
    /// Moves the viewport by a device-space delta.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Centers the viewport on a device-space point.
    pub fn center_on(&mut self, point: PointF, visible_w: f64, visible_h: f64) {
        self.offset_x = point.x - visible_w / 2.0;
        self.offset_y = point.y - visible_h / 2.0;
    }

    /// Resets to the map origin.
    pub fn reset(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    /// Effective top-left corner for a map of `map_w` x `map_h` device
    /// units seen through a `visible_w` x `visible_h` window.
    #[must_use]
    pub fn clamped(&self, map_w: f64, map_h: f64, visible_w: f64, visible_h: f64) -> (f64, f64) {
        let max_x = (map_w - visible_w).max(0.0);
        let max_y = (map_h - visible_h).max(0.0);
        (
            self.offset_x.clamp(0.0, max_x),
            self.offset_y.clamp(0.0, max_y),
        )
    }
}

/// The map widget.
pub struct MapView;

impl MapView {
    /// Device-space extent visible inside the widget area.
    #[must_use]
    pub fn visible_extent(area: Rect) -> (f64, f64) {
        let inner = Self::inner_area(area);
        (f64::from(inner.width) * DOTS_X, f64::from(inner.height) * DOTS_Y)
    }

    /// Area inside the widget's border.
    #[must_use]
    pub fn inner_area(area: Rect) -> Rect {
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    }

    /// Maps a terminal mouse position to a device-space point, or
    /// `None` when the position is outside the drawable area.
    #[must_use]
    pub fn device_point_at(area: Rect, state: &AppState, column: u16, row: u16) -> Option<PointF> {
        let inner = Self::inner_area(area);
        if column < inner.x
            || column >= inner.x + inner.width
            || row < inner.y
            || row >= inner.y + inner.height
        {
            return None;
        }
        let (visible_w, visible_h) = Self::visible_extent(area);
        let (off_x, off_y) = Self::effective_offset(state, visible_w, visible_h);
        // Use the center of the character cell's dot block.
        let x = off_x + f64::from(column - inner.x) * DOTS_X + DOTS_X / 2.0;
        let y = off_y + f64::from(row - inner.y) * DOTS_Y + DOTS_Y / 2.0;
        Some(PointF::new(x, y))
    }

    /// The viewport's effective offset for the current map and zoom.
    #[must_use]
    pub fn effective_offset(state: &AppState, visible_w: f64, visible_h: f64) -> (f64, f64) {
        let (map_w, map_h) = Self::device_map_size(state);
        state
            .map_viewport
            .clamped(map_w, map_h, visible_w, visible_h)
    }

    /// Current map size in device units.
    #[must_use]
    pub fn device_map_size(state: &AppState) -> (f64, f64) {
        let zoom = f64::from(state.zoom_divisor.max(1));
        state.current_map().map_or((0.0, 0.0), |map| {
            (f64::from(map.width) / zoom, f64::from(map.height) / zoom)
        })
    }

    /// Renders the map canvas.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let Some(map) = state.current_map() else {
            let block = Block::default()
                .title(" Map ")
                .borders(Borders::ALL)
                .style(Style::default().bg(theme.background).fg(theme.text_muted));
            f.render_widget(block, area);
            return;
        };

        let hall_name = state
            .current_hall()
            .map_or_else(|| map.name.clone(), |h| h.name.clone());
        let title = format!(
            " {} - Day {} (1/{}x) ",
            hall_name, state.day, state.zoom_divisor
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background).fg(theme.primary));

        let (visible_w, visible_h) = Self::visible_extent(area);
        let (off_x, off_y) = Self::effective_offset(state, visible_w, visible_h);
        let zoom = f64::from(state.zoom_divisor.max(1));
        let space_size = state.space_size();

        let canvas = Canvas::default()
            .block(block)
            .background_color(theme.background)
            .marker(Marker::Braille)
            .x_bounds([off_x, off_x + visible_w])
            .y_bounds([-(off_y + visible_h), -off_y])
            .paint(|ctx| {
                // Cell outlines.
                for cell in state.catalog.cells_for_map(map.map_id) {
                    let rect = cell_rect(cell, space_size, state.zoom_divisor);
                    let occupied = state.index.entries().iter().any(|e| e.cell == *cell);
                    let color = if occupied {
                        theme.map_cell_occupied
                    } else {
                        theme.map_cell
                    };
                    draw_rect(ctx, &rect, color);
                }

                // Visited checkmarks. The path is venue-space; scale
                // by the zoom divisor at draw time.
                ctx.layer();
                for glyph in state.overlay.path().glyphs() {
                    for (from, to) in glyph.segments() {
                        ctx.draw(&Line {
                            x1: from.x / zoom,
                            y1: -(from.y / zoom),
                            x2: to.x / zoom,
                            y2: -(to.y / zoom),
                            color: theme.map_visited,
                        });
                    }
                }

                // Active highlight, honoring the blink phase.
                if state.blink.is_visible() {
                    if let Some(selection) = &state.highlight {
                        ctx.layer();
                        draw_rect(ctx, &selection.rect, theme.accent);
                        if !selection.circle_ids.is_empty() {
                            let member =
                                selection.member_rect(state.highlight_member);
                            draw_rect(ctx, &member, theme.accent);
                        }
                        let label = state.space_label_for_cell(&selection.cell);
                        ctx.print(
                            selection.rect.x,
                            -(selection.rect.y - 1.0),
                            TextLine::styled(label, Style::default().fg(theme.accent)),
                        );
                    }
                }
            });

        f.render_widget(canvas, area);
    }
}

/// Draws a y-down rectangle on the y-up canvas.
fn draw_rect(ctx: &mut ratatui::widgets::canvas::Context<'_>, rect: &RectF, color: ratatui::style::Color) {
    ctx.draw(&Rectangle {
        x: rect.x,
        y: -(rect.y + rect.height),
        width: rect.width,
        height: rect.height,
        color,
    });
}
