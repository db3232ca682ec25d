//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Allow clone assignment patterns - common in UI state management
#![allow(clippy::assigning_clones)]
// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod circle_detail;
pub mod circle_list;
pub mod component;
pub mod handlers;
pub mod help_overlay;
pub mod map_view;
pub mod pickers;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::map::geometry::cell_rect;
use crate::map::{BlinkState, HighlightSelection, LayoutIndex, OverlayState, PointF};
use crate::models::{Catalog, Hall, LayoutCell, VenueMap, VisitList};
use crate::parser::save_visit_list;

// Re-export TUI components
pub use circle_detail::CircleDetail;
pub use circle_list::{CircleList, CircleListState};
pub use component::{Component, ComponentEvent};
pub use help_overlay::HelpOverlayState;
pub use map_view::{MapView, MapViewport};
pub use pickers::PickerState;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Popup types that can be displayed over the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Exhibitor detail popup
    CircleDetail,
    /// Day selection popup
    DayPicker,
    /// Hall selection popup
    HallPicker,
    /// Genre filter popup
    GenrePicker,
    /// Help overlay popup
    Help,
}

/// Which main pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The venue map pane
    Map,
    /// The exhibitor list pane
    List,
}

/// Active component - holds the currently active popup component
///
/// Only one component can be active at a time.
#[derive(Debug)]
pub enum ActiveComponent {
    /// Exhibitor detail component
    CircleDetail(CircleDetail),
    /// Day, hall or genre picker component
    Picker(PickerState),
}

/// Areas of the main screen, derived purely from the frame size so
/// mouse handlers can hit-test against the same rectangles the
/// renderer used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenChunks {
    /// Title bar strip.
    pub title: Rect,
    /// Venue map pane.
    pub map: Rect,
    /// Exhibitor list pane.
    pub list: Rect,
    /// Status bar strip.
    pub status: Rect,
}

/// Splits the frame into title, map, list and status areas.
#[must_use]
pub fn layout_chunks(area: Rect) -> ScreenChunks {
    let rows = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(4), // Status bar
        ])
        .split(area);
    let panes = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[1]);
    ScreenChunks {
        title: rows[0],
        map: panes[0],
        list: panes[1],
        status: rows[2],
    }
}

/// Application state - single source of truth
///
/// All UI components read from this state immutably.
/// Only event handlers modify state explicitly.
pub struct AppState {
    // Core data
    /// Loaded event catalog
    pub catalog: Catalog,
    /// The user's favorite and visit records
    pub visit_list: VisitList,
    /// Where the visit list is saved
    pub visit_list_path: PathBuf,
    /// Whether the visit list has unsaved changes
    pub dirty: bool,

    // View state
    /// Current UI theme
    pub theme: Theme,
    /// Active event day
    pub day: u8,
    /// Active hall
    pub hall_id: u32,
    /// Active zoom divisor (venue units per device unit)
    pub zoom_divisor: u32,
    /// Hit-test index for the active day and map
    pub index: Arc<LayoutIndex>,
    /// Visited overlay and its background recompute state
    pub overlay: OverlayState,
    /// Highlighted cell, if any
    pub highlight: Option<HighlightSelection>,
    /// Which member of the highlighted cell is focused
    pub highlight_member: usize,
    /// Highlight blink machine
    pub blink: BlinkState,
    /// Map scroll state
    pub map_viewport: MapViewport,
    /// Exhibitor list filter and cursor state
    pub circle_list: CircleListState,
    /// Which pane receives keyboard input
    pub focus: Focus,
    /// Whether the list search prompt is capturing keystrokes
    pub search_active: bool,

    // Popups
    /// Currently active popup (if any)
    pub active_popup: Option<PopupType>,
    /// Currently active component (if any)
    pub active_component: Option<ActiveComponent>,
    /// Help overlay scroll state
    pub help_overlay_state: HelpOverlayState,

    // Status
    /// Status bar message
    pub status_message: String,
    /// Current error message (if any)
    pub error_message: Option<String>,

    // System resources
    /// Application configuration
    pub config: Config,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates a new `AppState` from a loaded catalog and visit list.
    ///
    /// The first event day and hall become active, the layout index is
    /// built for them and an initial overlay recompute is scheduled.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog has no days or no halls.
    pub fn new(
        catalog: Catalog,
        visit_list: VisitList,
        visit_list_path: PathBuf,
        config: Config,
    ) -> Result<Self> {
        let day = catalog
            .days
            .first()
            .map(|d| d.day)
            .context("catalog has no event days")?;
        let hall_id = catalog
            .halls
            .first()
            .map(|h| h.hall_id)
            .context("catalog has no halls")?;
        let theme = Theme::from_mode(config.ui.theme_mode);
        let zoom_divisor = config.ui.default_zoom;

        let mut state = Self {
            catalog,
            visit_list,
            visit_list_path,
            dirty: false,
            theme,
            day,
            hall_id,
            zoom_divisor,
            index: LayoutIndex::empty(day, 0),
            overlay: OverlayState::new(),
            highlight: None,
            highlight_member: 0,
            blink: BlinkState::new(),
            map_viewport: MapViewport::default(),
            circle_list: CircleListState::default(),
            focus: Focus::Map,
            search_active: false,
            active_popup: None,
            active_component: None,
            help_overlay_state: HelpOverlayState::new(),
            status_message: "Press ? for help".to_string(),
            error_message: None,
            config,
            should_quit: false,
        };
        state.rebuild_index();
        state.refilter_list();
        if state.config.ui.show_help_on_startup {
            state.open_help();
        }
        Ok(state)
    }

    /// The active hall.
    #[must_use]
    pub fn current_hall(&self) -> Option<&Hall> {
        self.catalog.hall(self.hall_id)
    }

    /// The venue map of the active hall.
    #[must_use]
    pub fn current_map(&self) -> Option<&VenueMap> {
        self.current_hall()
            .and_then(|hall| self.catalog.map(hall.map_id))
    }

    /// Cell side length of the active map's coordinate space.
    #[must_use]
    pub fn space_size(&self) -> u32 {
        self.current_map().map_or(1, |m| m.space_size)
    }

    /// Label printed next to a highlighted cell, e.g. "A-42".
    #[must_use]
    pub fn space_label_for_cell(&self, cell: &LayoutCell) -> String {
        let block = self
            .catalog
            .block_name(cell.block_id)
            .map_or_else(|| cell.block_id.to_string(), ToString::to_string);
        format!("{}-{:02}", block, cell.space_number)
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Mark the visit list as having unsaved changes
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear dirty flag (after save)
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Rebuilds the layout index for the active day and hall.
    ///
    /// The highlight is dropped because it may refer to a cell that no
    /// longer exists in the new index, and a fresh overlay recompute
    /// is scheduled.
    pub fn rebuild_index(&mut self) {
        let map_id = self.current_hall().map_or(0, |h| h.map_id);
        self.index = Arc::new(LayoutIndex::build(&self.catalog, self.day, map_id));
        self.clear_highlight();
        self.schedule_overlay();
    }

    /// Schedules a background overlay recompute for the current
    /// visited set.
    pub fn schedule_overlay(&mut self) {
        self.overlay.schedule(
            Arc::clone(&self.index),
            self.visit_list.visited_for(self.day),
            self.space_size(),
        );
    }

    /// Re-runs the list filter against the current day and filters.
    pub fn refilter_list(&mut self) {
        self.circle_list
            .refilter(&self.catalog, self.day, &self.visit_list);
    }

    /// Switches the active day.
    pub fn select_day(&mut self, day: u8) {
        if self.day == day {
            return;
        }
        self.day = day;
        self.rebuild_index();
        self.refilter_list();
        self.set_status(format!("Switched to day {day}"));
    }

    /// Switches the active hall and resets the viewport.
    pub fn select_hall(&mut self, hall_id: u32) {
        if self.hall_id == hall_id || self.catalog.hall(hall_id).is_none() {
            return;
        }
        self.hall_id = hall_id;
        self.map_viewport.reset();
        self.rebuild_index();
        if let Some(hall) = self.current_hall() {
            let name = hall.name.clone();
            self.set_status(format!("Switched to {name}"));
        }
    }

    /// Cycles to the next zoom divisor, rescaling the highlight and
    /// viewport so the same venue point stays in view.
    pub fn cycle_zoom(&mut self) {
        use crate::constants::ZOOM_DIVISORS;
        let position = ZOOM_DIVISORS
            .iter()
            .position(|z| *z == self.zoom_divisor)
            .unwrap_or(0);
        let next = ZOOM_DIVISORS[(position + 1) % ZOOM_DIVISORS.len()];
        let ratio = f64::from(self.zoom_divisor) / f64::from(next);
        self.zoom_divisor = next;
        self.map_viewport.offset_x *= ratio;
        self.map_viewport.offset_y *= ratio;
        let space_size = self.space_size();
        if let Some(selection) = &mut self.highlight {
            selection.rect = cell_rect(&selection.cell, space_size, next);
        }
        self.set_status(format!("Zoom 1/{next}x"));
    }

    /// Hit-tests a device-space point. A hit sets a steady highlight
    /// (tap selections do not blink); a miss clears any existing one,
    /// so tapping empty space dismisses the selection.
    pub fn highlight_at(&mut self, point: PointF) {
        let selection = self
            .index
            .resolve(point, self.zoom_divisor, self.space_size());
        if let Some(selection) = selection {
            let label = self.space_label_for_cell(&selection.cell);
            let members = selection.circle_ids.len();
            self.highlight = Some(selection);
            self.highlight_member = 0;
            self.blink.arm(false, Instant::now());
            self.set_status(format!("{label} - {members} circle(s)"));
        } else {
            self.clear_highlight();
        }
    }

    /// Drops the highlight and cancels any blink in flight.
    pub fn clear_highlight(&mut self) {
        self.highlight = None;
        self.highlight_member = 0;
        self.blink.cancel();
    }

    /// Highlights `circle_id`'s space, switching hall when the circle
    /// exhibits elsewhere, and centers the map on it.
    pub fn jump_to_circle(&mut self, circle_id: u32) {
        let Some(circle) = self.catalog.circle(circle_id) else {
            self.set_error(format!("Circle {circle_id} is not in the catalog"));
            return;
        };
        let target_hall = self
            .catalog
            .cell(circle.block_id, circle.space_number)
            .map(|cell| cell.hall_id);
        match target_hall {
            Some(hall_id) => {
                if hall_id != self.hall_id {
                    self.select_hall(hall_id);
                }
            }
            None => {
                let label = self.catalog.space_label(circle);
                self.set_error(format!("{label} is not on any map"));
                return;
            }
        }

        let located =
            self.index
                .locate_circle(circle_id, self.zoom_divisor, self.space_size());
        if let Some((selection, member)) = located {
            let center = selection.rect.center();
            self.highlight = Some(selection);
            self.highlight_member = member;
            self.blink.arm(true, Instant::now());
            // Nominal window; the renderer clamps to the real one.
            self.map_viewport.center_on(center, 200.0, 100.0);
            self.focus = Focus::Map;
        }
    }

    /// Toggles the visited mark for a circle and reschedules the
    /// overlay.
    pub fn toggle_visited(&mut self, circle_id: u32) {
        let Some(circle) = self.catalog.circle(circle_id) else {
            return;
        };
        let name = circle.name.clone();
        let day = circle.day;
        let now_visited = self.visit_list.toggle_visited(day, circle_id, &name);
        self.mark_dirty();
        if day == self.day {
            self.schedule_overlay();
        }
        self.refilter_list();
        if now_visited {
            self.set_status(format!("Visited {name}"));
        } else {
            self.set_status(format!("Unmarked {name}"));
        }
    }

    /// Cycles the favorite color bucket for a circle.
    pub fn cycle_color(&mut self, circle_id: u32) {
        let Some(circle) = self.catalog.circle(circle_id) else {
            return;
        };
        let name = circle.name.clone();
        let day = circle.day;
        let color = self.visit_list.cycle_color(day, circle_id, &name);
        self.mark_dirty();
        self.refilter_list();
        if color == 0 {
            self.set_status(format!("Cleared color for {name}"));
        } else {
            self.set_status(format!("Color {color} for {name}"));
        }
    }

    /// Stores an edited memo for a circle.
    pub fn set_memo(&mut self, circle_id: u32, memo: &str) {
        let Some(circle) = self.catalog.circle(circle_id) else {
            return;
        };
        let name = circle.name.clone();
        let day = circle.day;
        self.visit_list.set_memo(day, circle_id, &name, memo);
        self.mark_dirty();
        self.set_status("Memo updated");
    }

    /// Saves the visit list to its path.
    pub fn save_visit_list(&mut self) {
        match save_visit_list(&self.visit_list, &self.visit_list_path) {
            Ok(()) => {
                self.mark_clean();
                self.set_status(format!(
                    "Saved to {}",
                    self.visit_list_path.display()
                ));
            }
            Err(e) => self.set_error(format!("Save failed: {e:#}")),
        }
    }

    /// Copies a circle's details to the system clipboard.
    pub fn copy_circle_info(&mut self, circle_id: u32) {
        let Some(circle) = self.catalog.circle(circle_id) else {
            return;
        };
        let space = self.catalog.space_label(circle);
        let genre = self.catalog.genre_name(circle.genre_id).unwrap_or("-");
        let text = format!(
            "{} ({}) Day {} {} [{}]",
            circle.name, circle.penname, circle.day, space, genre
        );
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.set_status("Circle info copied to clipboard"),
            Err(e) => self.set_error(format!("Failed to copy to clipboard: {e}")),
        }
    }

    // === Component Management Methods (Component Trait Pattern) ===

    /// Open the exhibitor detail popup
    pub fn open_circle_detail(&mut self, circle_id: u32) {
        let Some(detail) = CircleDetail::new(&self.catalog, &self.visit_list, self.day, circle_id)
        else {
            self.set_error(format!("Circle {circle_id} is not in the catalog"));
            return;
        };
        self.active_component = Some(ActiveComponent::CircleDetail(detail));
        self.active_popup = Some(PopupType::CircleDetail);
    }

    /// Open the day picker popup
    pub fn open_day_picker(&mut self) {
        let picker = PickerState::days(&self.catalog, self.day);
        self.active_component = Some(ActiveComponent::Picker(picker));
        self.active_popup = Some(PopupType::DayPicker);
    }

    /// Open the hall picker popup
    pub fn open_hall_picker(&mut self) {
        let picker = PickerState::halls(&self.catalog, self.hall_id);
        self.active_component = Some(ActiveComponent::Picker(picker));
        self.active_popup = Some(PopupType::HallPicker);
    }

    /// Open the genre filter popup
    pub fn open_genre_picker(&mut self) {
        let picker = PickerState::genres(&self.catalog, self.circle_list.genre_filter);
        self.active_component = Some(ActiveComponent::Picker(picker));
        self.active_popup = Some(PopupType::GenrePicker);
    }

    /// Open the help overlay
    pub fn open_help(&mut self) {
        self.help_overlay_state.scroll_to_top();
        self.active_popup = Some(PopupType::Help);
    }

    /// Close the currently active component
    pub fn close_component(&mut self) {
        self.active_component = None;
        self.active_popup = None;
    }

    /// Applies an event emitted by a popup component.
    pub fn apply_component_event(&mut self, event: ComponentEvent) {
        match event {
            ComponentEvent::DaySelected(day) => self.select_day(day),
            ComponentEvent::HallSelected(hall_id) => self.select_hall(hall_id),
            ComponentEvent::GenreSelected(genre_id) => {
                self.circle_list.genre_filter = genre_id;
                self.refilter_list();
            }
            ComponentEvent::VisitedToggled(circle_id) => self.toggle_visited(circle_id),
            ComponentEvent::ColorCycled(circle_id) => self.cycle_color(circle_id),
            ComponentEvent::JumpToMap(circle_id) => self.jump_to_circle(circle_id),
            ComponentEvent::CopyCircleInfo(circle_id) => self.copy_circle_info(circle_id),
            ComponentEvent::MemoEdited(circle_id, memo) => self.set_memo(circle_id, &memo),
            ComponentEvent::Closed => {}
        }
        // Keep an open detail popup in sync with the applied change.
        if let Some(ActiveComponent::CircleDetail(detail)) = &mut self.active_component {
            let record = self.visit_list.record(self.day, detail.circle_id());
            detail.refresh(record);
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Apply theme based on user preference (Auto detects OS, Dark/Light are explicit)
        state.theme = Theme::from_mode(state.config.ui.theme_mode);

        // Drive the highlight blink machine; the final tick clears
        // the highlight entirely.
        let generation = state.blink.generation();
        if state.blink.tick(generation, Instant::now()) {
            state.highlight = None;
            state.highlight_member = 0;
        }

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handlers::handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    handlers::handle_mouse_event(state, mouse, area)?;
                }
                _ => {} // Resize re-renders on the next loop
            }
        }

        // Adopt a finished overlay recompute, if any
        if state.overlay.poll() {
            // Overlay changed, will redraw on next loop
        }

        // Check if should quit
        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    // This ensures consistent background regardless of terminal settings
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = layout_chunks(f.area());

    render_title_bar(f, chunks.title, state);
    MapView::render(f, chunks.map, state);
    CircleList::render(f, chunks.list, state, state.focus == Focus::List);
    StatusBar::render(f, chunks.status, state, &state.theme);

    // Render popup if active
    if let Some(popup_type) = &state.active_popup {
        render_popup(f, popup_type, state);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with event name and dirty indicator
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let dirty_indicator = if state.dirty { " *" } else { "" };
    let search = if state.search_active {
        format!("  /{}_", state.circle_list.query)
    } else {
        String::new()
    };
    let title = format!(
        " {} - Day {}{}{}",
        state.catalog.event_name, state.day, dirty_indicator, search
    );

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Render active popup
fn render_popup(f: &mut Frame, popup_type: &PopupType, state: &AppState) {
    match popup_type {
        PopupType::CircleDetail => {
            if let Some(ActiveComponent::CircleDetail(ref detail)) = state.active_component {
                detail.render(f, f.area(), &state.theme);
            }
        }
        PopupType::DayPicker | PopupType::HallPicker | PopupType::GenrePicker => {
            if let Some(ActiveComponent::Picker(ref picker)) = state.active_component {
                picker.render(f, f.area(), &state.theme);
            }
        }
        PopupType::Help => {
            state.help_overlay_state.render(f, f.area(), &state.theme);
        }
    }
}

/// Render error message overlay
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    // Clear the background area first
    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(2), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new("Press Enter or Esc to dismiss")
        .style(Style::default().fg(theme.text_muted));
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Block as HallBlock, CellOrientation, Circle, EventDay, Genre, LayoutCell,
    };
    use chrono::NaiveDate;

    fn test_catalog() -> Catalog {
        Catalog {
            event_name: "Test Market 1".to_string(),
            days: vec![
                EventDay {
                    day: 1,
                    date: NaiveDate::from_ymd_opt(2025, 8, 16).unwrap(),
                },
                EventDay {
                    day: 2,
                    date: NaiveDate::from_ymd_opt(2025, 8, 17).unwrap(),
                },
            ],
            halls: vec![
                Hall {
                    hall_id: 1,
                    name: "East 1".to_string(),
                    map_id: 1,
                },
                Hall {
                    hall_id: 2,
                    name: "West 1".to_string(),
                    map_id: 2,
                },
            ],
            maps: vec![
                VenueMap {
                    map_id: 1,
                    name: "East".to_string(),
                    width: 400,
                    height: 300,
                    space_size: 50,
                },
                VenueMap {
                    map_id: 2,
                    name: "West".to_string(),
                    width: 400,
                    height: 300,
                    space_size: 50,
                },
            ],
            blocks: vec![HallBlock {
                block_id: 1,
                name: "A".to_string(),
            }],
            genres: vec![Genre {
                genre_id: 1,
                name: "Original".to_string(),
            }],
            cells: vec![
                LayoutCell {
                    block_id: 1,
                    space_number: 1,
                    x: 100,
                    y: 100,
                    orientation: CellOrientation::Left,
                    hall_id: 1,
                    map_id: 1,
                },
                LayoutCell {
                    block_id: 1,
                    space_number: 2,
                    x: 150,
                    y: 100,
                    orientation: CellOrientation::Left,
                    hall_id: 2,
                    map_id: 2,
                },
            ],
            circles: vec![
                Circle {
                    circle_id: 10,
                    name: "East Circle".to_string(),
                    penname: "east".to_string(),
                    genre_id: 1,
                    day: 1,
                    block_id: 1,
                    space_number: 1,
                    space_sub: 0,
                    description: None,
                },
                Circle {
                    circle_id: 20,
                    name: "West Circle".to_string(),
                    penname: "west".to_string(),
                    genre_id: 1,
                    day: 1,
                    block_id: 1,
                    space_number: 2,
                    space_sub: 0,
                    description: None,
                },
            ],
        }
    }

    fn test_state() -> AppState {
        let catalog = test_catalog();
        let visits = VisitList::new("test-event", &[1, 2]);
        AppState::new(
            catalog,
            visits,
            PathBuf::from("/tmp/visits.md"),
            Config::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_starts_on_first_day_and_hall() {
        let state = test_state();
        assert_eq!(state.day, 1);
        assert_eq!(state.hall_id, 1);
        assert_eq!(state.index.entries().len(), 1);
        assert!(state.overlay.is_recomputing());
    }

    #[test]
    fn test_select_day_rebuilds_index_and_clears_highlight() {
        let mut state = test_state();
        state.highlight_at(PointF::new(110.0, 110.0));
        assert!(state.highlight.is_some());

        state.select_day(2);
        assert_eq!(state.day, 2);
        assert!(state.highlight.is_none());
        // Day 2 has no circles, so the index is empty.
        assert!(state.index.entries().is_empty());
    }

    #[test]
    fn test_highlight_at_miss_clears_existing_selection() {
        let mut state = test_state();
        state.highlight_at(PointF::new(110.0, 110.0));
        assert!(state.highlight.is_some());

        // Tapping empty space dismisses the selection.
        state.highlight_at(PointF::new(5.0, 5.0));
        assert!(state.highlight.is_none());
        assert_eq!(state.highlight_member, 0);
        assert!(!state.blink.is_blinking());
    }

    #[test]
    fn test_tap_highlight_is_steady() {
        use crate::constants::{BLINK_INTERVAL, BLINK_TOGGLES};

        let mut state = test_state();
        state.highlight_at(PointF::new(110.0, 110.0));
        assert!(state.highlight.is_some());
        assert!(!state.blink.is_blinking());
        assert!(state.blink.is_visible());

        // Replay the run loop's tick-and-clear across a full blink
        // cycle; a tap selection must survive untouched.
        let generation = state.blink.generation();
        let t0 = Instant::now();
        for step in 1..=u32::from(BLINK_TOGGLES) {
            let now = t0 + BLINK_INTERVAL * step + Duration::from_millis(1);
            if state.blink.tick(generation, now) {
                state.highlight = None;
                state.highlight_member = 0;
            }
        }
        assert!(state.highlight.is_some());
        assert!(state.blink.is_visible());
    }

    #[test]
    fn test_jump_to_circle_arms_blink() {
        let mut state = test_state();
        state.jump_to_circle(10);
        assert!(state.highlight.is_some());
        assert!(state.blink.is_blinking());
        assert!(state.blink.is_visible());
    }

    #[test]
    fn test_jump_to_circle_switches_hall() {
        let mut state = test_state();
        state.jump_to_circle(20);
        assert_eq!(state.hall_id, 2);
        let selection = state.highlight.expect("highlight after jump");
        assert_eq!(selection.cell.space_number, 2);
    }

    #[test]
    fn test_toggle_visited_marks_dirty_and_reschedules() {
        let mut state = test_state();
        // Drain the initial recompute.
        for _ in 0..200 {
            if state.overlay.poll() || !state.overlay.is_recomputing() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        state.toggle_visited(10);
        assert!(state.dirty);
        assert!(state.overlay.is_recomputing());
        assert_eq!(state.visit_list.visited_count(1), 1);
    }

    #[test]
    fn test_cycle_zoom_rescales_highlight() {
        let mut state = test_state();
        state.highlight_at(PointF::new(110.0, 110.0));
        let full = state.highlight.as_ref().unwrap().rect;
        state.cycle_zoom();
        let halved = state.highlight.as_ref().unwrap().rect;
        assert!((halved.width - full.width / 2.0).abs() < 1e-9);
        assert!((halved.x - full.x / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_component_event_day() {
        let mut state = test_state();
        state.apply_component_event(ComponentEvent::DaySelected(2));
        assert_eq!(state.day, 2);
    }

    #[test]
    fn test_genre_filter_refilters_list() {
        let mut state = test_state();
        assert_eq!(state.circle_list.filtered().len(), 2);
        state.apply_component_event(ComponentEvent::GenreSelected(Some(999)));
        assert_eq!(state.circle_list.filtered().len(), 0);
        state.apply_component_event(ComponentEvent::GenreSelected(None));
        assert_eq!(state.circle_list.filtered().len(), 2);
    }

    #[test]
    fn test_layout_chunks_partition() {
        let chunks = layout_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(chunks.title.height, 3);
        assert_eq!(chunks.status.height, 4);
        assert_eq!(chunks.map.y, 3);
        assert_eq!(chunks.map.height, 33);
        assert_eq!(chunks.map.width + chunks.list.width, 100);
    }
}
