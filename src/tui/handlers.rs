//! Input handlers for the main UI, popups and the mouse.

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::tui::{
    layout_chunks, ActiveComponent, AppState, Component, Focus, MapView, PopupType,
};

/// Scroll step for one keypress, in device units.
const SCROLL_X: f64 = 8.0;
const SCROLL_Y: f64 = 4.0;

/// Handle keyboard input events.
///
/// Returns `Ok(true)` when the user quit the application.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    if state.active_popup.is_some() {
        return handle_popup_input(state, key);
    }

    if state.search_active {
        return handle_search_input(state, key);
    }

    handle_main_input(state, key)
}

/// Route input to the active popup component.
fn handle_popup_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if state.active_popup == Some(PopupType::Help) {
        return handle_help_input(state, key);
    }

    let event = match &mut state.active_component {
        Some(ActiveComponent::CircleDetail(detail)) => detail.handle_input(key),
        Some(ActiveComponent::Picker(picker)) => picker.handle_input(key),
        None => None,
    };
    let should_close = match &state.active_component {
        Some(ActiveComponent::CircleDetail(detail)) => detail.should_close(),
        Some(ActiveComponent::Picker(picker)) => picker.should_close(),
        None => true,
    };
    if should_close {
        state.close_component();
    }
    if let Some(event) = event {
        state.apply_component_event(event);
    }
    Ok(false)
}

/// Handle input for the help overlay.
fn handle_help_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?' | 'q') => {
            state.active_popup = None;
            state.set_status("Press ? for help");
        }
        KeyCode::Up | KeyCode::Char('k') => state.help_overlay_state.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => state.help_overlay_state.scroll_down(),
        KeyCode::PageUp => state.help_overlay_state.page_up(20),
        KeyCode::PageDown => state.help_overlay_state.page_down(20),
        KeyCode::Home => state.help_overlay_state.scroll_to_top(),
        _ => {}
    }
    Ok(false)
}

/// Handle input while the search prompt is capturing keystrokes.
fn handle_search_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            state.search_active = false;
            state.circle_list.query.clear();
            state.refilter_list();
        }
        KeyCode::Enter => {
            state.search_active = false;
            let hits = state.circle_list.filtered().len();
            state.set_status(format!("{hits} match(es)"));
        }
        KeyCode::Backspace => {
            state.circle_list.pop_query_char();
            state.refilter_list();
        }
        KeyCode::Char(c) => {
            state.circle_list.push_query_char(c);
            state.refilter_list();
        }
        _ => {}
    }
    Ok(false)
}

/// Handle input for the main UI.
fn handle_main_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Global bindings first
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(true);
        }
        KeyCode::Char('?') => {
            state.open_help();
            return Ok(false);
        }
        KeyCode::Tab => {
            state.focus = match state.focus {
                Focus::Map => Focus::List,
                Focus::List => Focus::Map,
            };
            return Ok(false);
        }
        KeyCode::Char('d') => {
            state.open_day_picker();
            return Ok(false);
        }
        KeyCode::Char('H') => {
            state.open_hall_picker();
            return Ok(false);
        }
        KeyCode::Char('g') => {
            state.open_genre_picker();
            return Ok(false);
        }
        KeyCode::Char('s') => {
            state.save_visit_list();
            return Ok(false);
        }
        KeyCode::Char('z') => {
            state.cycle_zoom();
            return Ok(false);
        }
        KeyCode::Char('/') => {
            state.focus = Focus::List;
            state.search_active = true;
            return Ok(false);
        }
        KeyCode::Char('F') => {
            state.circle_list.favorites_only = !state.circle_list.favorites_only;
            state.refilter_list();
            let status = if state.circle_list.favorites_only {
                "Showing favorites only"
            } else {
                "Showing all circles"
            };
            state.set_status(status);
            return Ok(false);
        }
        _ => {}
    }

    match state.focus {
        Focus::Map => handle_map_input(state, key),
        Focus::List => handle_list_input(state, key),
    }
}

/// Handle input when the map pane has focus.
fn handle_map_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => state.map_viewport.scroll_by(-SCROLL_X, 0.0),
        KeyCode::Right | KeyCode::Char('l') => state.map_viewport.scroll_by(SCROLL_X, 0.0),
        KeyCode::Up | KeyCode::Char('k') => state.map_viewport.scroll_by(0.0, -SCROLL_Y),
        KeyCode::Down | KeyCode::Char('j') => state.map_viewport.scroll_by(0.0, SCROLL_Y),
        KeyCode::Char('c') => {
            if let Some(selection) = &state.highlight {
                let center = selection.rect.center();
                // Nominal window; the renderer clamps to the real one.
                state.map_viewport.center_on(center, 200.0, 100.0);
            }
        }
        KeyCode::Char('n') => {
            // Step focus through the highlighted cell's members.
            if let Some(selection) = &state.highlight {
                let members = selection.circle_ids.len();
                if members > 0 {
                    state.highlight_member = (state.highlight_member + 1) % members;
                }
            }
        }
        KeyCode::Enter => {
            let focused = state.highlight.as_ref().and_then(|selection| {
                selection.circle_ids.get(state.highlight_member).copied()
            });
            if let Some(circle_id) = focused {
                state.open_circle_detail(circle_id);
            }
        }
        KeyCode::Char('v' | ' ') => {
            // Toggle visited for the focused member of the highlighted
            // cell; cycle through members with `n` first.
            let focused = state.highlight.as_ref().and_then(|selection| {
                selection.circle_ids.get(state.highlight_member).copied()
            });
            if let Some(circle_id) = focused {
                state.toggle_visited(circle_id);
            }
        }
        KeyCode::Esc => state.clear_highlight(),
        _ => {}
    }
    Ok(false)
}

/// Handle input when the exhibitor list has focus.
fn handle_list_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.circle_list.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => state.circle_list.move_selection(1),
        KeyCode::PageUp => state.circle_list.move_selection(-10),
        KeyCode::PageDown => state.circle_list.move_selection(10),
        KeyCode::Enter => {
            if let Some(circle_id) = state.circle_list.selected_circle_id() {
                state.open_circle_detail(circle_id);
            }
        }
        KeyCode::Char('v' | ' ') => {
            if let Some(circle_id) = state.circle_list.selected_circle_id() {
                state.toggle_visited(circle_id);
            }
        }
        KeyCode::Char('f') => {
            if let Some(circle_id) = state.circle_list.selected_circle_id() {
                state.cycle_color(circle_id);
            }
        }
        KeyCode::Char('y') => {
            if let Some(circle_id) = state.circle_list.selected_circle_id() {
                state.copy_circle_info(circle_id);
            }
        }
        KeyCode::Char('m') => {
            if let Some(circle_id) = state.circle_list.selected_circle_id() {
                state.jump_to_circle(circle_id);
            }
        }
        KeyCode::Esc => {
            state.circle_list.clear_filters();
            state.refilter_list();
            state.set_status("Filters cleared");
        }
        _ => {}
    }
    Ok(false)
}

/// Handle mouse input events.
///
/// `area` is the full frame rectangle; the handler re-derives the pane
/// layout from it so hits land on the same rectangles the renderer
/// used.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent, area: Rect) -> Result<()> {
    // Popups own the screen; the mouse only works on the main panes.
    if state.active_popup.is_some() || state.error_message.is_some() {
        return Ok(());
    }

    let chunks = layout_chunks(area);
    let over_map = contains(chunks.map, mouse.column, mouse.row);
    let over_list = contains(chunks.list, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if over_map {
                state.focus = Focus::Map;
                if let Some(point) =
                    MapView::device_point_at(chunks.map, state, mouse.column, mouse.row)
                {
                    state.highlight_at(point);
                }
            } else if over_list {
                state.focus = Focus::List;
            }
        }
        MouseEventKind::ScrollUp => {
            if over_map {
                state.map_viewport.scroll_by(0.0, -SCROLL_Y);
            } else if over_list {
                state.circle_list.move_selection(-1);
            }
        }
        MouseEventKind::ScrollDown => {
            if over_map {
                state.map_viewport.scroll_by(0.0, SCROLL_Y);
            } else if over_list {
                state.circle_list.move_selection(1);
            }
        }
        _ => {}
    }
    Ok(())
}

const fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{
        Block as HallBlock, Catalog, CellOrientation, Circle, EventDay, Genre, Hall, LayoutCell,
        VenueMap, VisitList,
    };
    use chrono::NaiveDate;
    use std::path::PathBuf;

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
            halls: vec![Hall {
                hall_id: 1,
                name: "East 1".to_string(),
                map_id: 1,
            }],
            maps: vec![VenueMap {
                map_id: 1,
                name: "East".to_string(),
                width: 400,
                height: 300,
                space_size: 50,
            }],
            blocks: vec![HallBlock {
                block_id: 1,
                name: "A".to_string(),
            }],
            genres: vec![Genre {
                genre_id: 1,
                name: "Original".to_string(),
            }],
            cells: vec![LayoutCell {
                block_id: 1,
                space_number: 1,
                x: 100,
                y: 100,
                orientation: CellOrientation::Left,
                hall_id: 1,
                map_id: 1,
            }],
            circles: vec![Circle {
                circle_id: 10,
                name: "Alpha Works".to_string(),
                penname: "alpha".to_string(),
                genre_id: 1,
                day: 1,
                block_id: 1,
                space_number: 1,
                space_sub: 0,
                description: None,
            }],
        }
    }

    fn test_state() -> AppState {
        let mut config = Config::new();
        config.ui.show_help_on_startup = false;
        AppState::new(
            test_catalog(),
            VisitList::new("test-event", &[1, 2]),
            PathBuf::from("/tmp/visits.md"),
            config,
        )
        .unwrap()
    }

    fn press(state: &mut AppState, code: KeyCode) -> bool {
        handle_key_event(state, KeyEvent::from(code)).unwrap()
    }

    #[test]
    fn test_q_quits() {
        let mut state = test_state();
        assert!(press(&mut state, KeyCode::Char('q')));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut state = test_state();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(&mut state, key).unwrap());
    }

    #[test]
    fn test_tab_toggles_focus() {
        let mut state = test_state();
        assert_eq!(state.focus, Focus::Map);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::List);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Map);
    }

    #[test]
    fn test_error_overlay_blocks_input() {
        let mut state = test_state();
        state.set_error("boom");
        assert!(!press(&mut state, KeyCode::Char('q')));
        assert!(state.error_message.is_some());
        press(&mut state, KeyCode::Esc);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_search_captures_and_filters() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('/'));
        assert!(state.search_active);
        // 'q' is query text while searching, not quit.
        assert!(!press(&mut state, KeyCode::Char('q')));
        assert_eq!(state.circle_list.query, "q");
        assert!(state.circle_list.filtered().is_empty());
        press(&mut state, KeyCode::Esc);
        assert!(!state.search_active);
        assert!(state.circle_list.query.is_empty());
        assert_eq!(state.circle_list.filtered().len(), 1);
    }

    #[test]
    fn test_list_visited_toggle() {
        let mut state = test_state();
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Char('v'));
        assert!(state.dirty);
        assert_eq!(state.visit_list.visited_count(1), 1);
    }

    #[test]
    fn test_enter_opens_detail_popup() {
        let mut state = test_state();
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.active_popup, Some(PopupType::CircleDetail));
        // Esc inside the popup closes it.
        press(&mut state, KeyCode::Esc);
        assert!(state.active_popup.is_none());
    }

    #[test]
    fn test_day_picker_flow() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.active_popup, Some(PopupType::DayPicker));
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        assert!(state.active_popup.is_none());
        assert_eq!(state.day, 2);
    }

    #[test]
    fn test_map_v_toggles_visited_for_focused_member() {
        let mut state = test_state();
        state.highlight_at(crate::map::PointF::new(110.0, 110.0));
        press(&mut state, KeyCode::Char('v'));
        assert!(state.dirty);
        assert_eq!(state.visit_list.visited_count(1), 1);
        // Without a highlight the key does nothing.
        let mut idle = test_state();
        press(&mut idle, KeyCode::Char('v'));
        assert_eq!(idle.visit_list.visited_count(1), 0);
    }

    #[test]
    fn test_list_m_jumps_to_circle_on_map() {
        let mut state = test_state();
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Char('m'));
        assert_eq!(state.focus, Focus::Map);
        let selection = state.highlight.as_ref().expect("highlight after jump");
        assert_eq!(selection.cell.space_number, 1);
        assert!(state.blink.is_blinking());
    }

    #[test]
    fn test_map_enter_opens_focused_member() {
        let mut state = test_state();
        state.highlight_at(crate::map::PointF::new(110.0, 110.0));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.active_popup, Some(PopupType::CircleDetail));
    }

    #[test]
    fn test_mouse_click_resolves_cell() {
        let mut state = test_state();
        let area = Rect::new(0, 0, 120, 40);
        let chunks = layout_chunks(area);
        // Click the top-left braille cell of the map pane; the
        // viewport starts at the origin, so this lands near (1, 2) in
        // device space - outside the cell at (100, 100).
        let miss = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: chunks.map.x + 1,
            row: chunks.map.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut state, miss, area).unwrap();
        assert!(state.highlight.is_none());

        // The cell spans [100, 150) device units at zoom 1; column
        // offset 51 maps to x = 51*2 + 1 = 103.
        let hit = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: chunks.map.x + 1 + 51,
            row: chunks.map.y + 1 + 26,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut state, hit, area).unwrap();
        let selection = state.highlight.as_ref().expect("cell under click");
        assert_eq!(selection.cell.space_number, 1);
    }

    #[test]
    fn test_wheel_scrolls_map() {
        let mut state = test_state();
        let area = Rect::new(0, 0, 120, 40);
        let chunks = layout_chunks(area);
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: chunks.map.x + 2,
            row: chunks.map.y + 2,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut state, wheel, area).unwrap();
        assert!((state.map_viewport.offset_y - SCROLL_Y).abs() < f64::EPSILON);
    }
}
