//! Component trait pattern for TUI components.
//!
//! This module defines the trait and event types used to implement
//! self-contained, testable TUI popups that handle their own input and
//! rendering and communicate with the parent through emitted events.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::tui::Theme;

/// A component that can be rendered and handle input.
///
/// Components are self-contained UI elements that manage their own state,
/// handle keyboard input, and can emit events to communicate with the parent.
pub trait Component {
    /// Event type this component can emit
    type Event;

    /// Handle keyboard input.
    ///
    /// Returns `Some(Event)` if the component wants to signal something to the parent.
    /// Returns `None` if input was handled internally without needing parent action.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Render the component.
    ///
    /// The component should render itself within the provided area.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);

    /// Check if component should close.
    ///
    /// Returns `true` if the component has finished its work and should be closed.
    /// Default implementation returns `false`.
    fn should_close(&self) -> bool {
        false
    }
}

/// Events that can be emitted by popup components.
///
/// These events are emitted by components and processed by the parent (AppState)
/// to update application state or trigger actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentEvent {
    // Selection events
    /// User selected an event day
    DaySelected(u8),

    /// User selected a hall
    HallSelected(u32),

    /// User selected a genre filter (None clears the filter)
    GenreSelected(Option<u32>),

    // Action events
    /// User toggled the visited mark for a circle
    VisitedToggled(u32),

    /// User cycled the favorite color bucket for a circle
    ColorCycled(u32),

    /// User asked to highlight a circle's space on the map
    JumpToMap(u32),

    /// User asked to copy a circle's details to the clipboard
    CopyCircleInfo(u32),

    /// User committed an edited memo for a circle
    MemoEdited(u32, String),

    // Dismissal
    /// Component was dismissed without a selection
    Closed,
}
