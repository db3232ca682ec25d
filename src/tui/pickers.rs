//! Selection popups for day, hall and genre.
//!
//! All three share one list-driven picker: the constructors bake the
//! emitted event into each row, so the parent only has to forward the
//! picker's [`ComponentEvent`].

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::Catalog;
use crate::tui::component::{Component, ComponentEvent};
use crate::tui::{centered_rect, Theme};

/// One selectable row.
#[derive(Debug, Clone)]
struct PickerItem {
    label: String,
    event: ComponentEvent,
}

/// A centered single-column selection popup.
#[derive(Debug, Clone)]
pub struct PickerState {
    title: String,
    items: Vec<PickerItem>,
    /// Currently selected row
    pub selected: usize,
    should_close: bool,
}

impl PickerState {
    fn new(title: &str, items: Vec<PickerItem>) -> Self {
        Self {
            title: title.to_string(),
            items,
            selected: 0,
            should_close: false,
        }
    }

    /// Picker over the event's days.
    #[must_use]
    pub fn days(catalog: &Catalog, current: u8) -> Self {
        let items = catalog
            .days
            .iter()
            .map(|d| PickerItem {
                label: format!("Day {} ({})", d.day, d.date.format("%Y-%m-%d")),
                event: ComponentEvent::DaySelected(d.day),
            })
            .collect();
        let mut picker = Self::new(" Select Day ", items);
        picker.selected = catalog
            .days
            .iter()
            .position(|d| d.day == current)
            .unwrap_or(0);
        picker
    }

    /// Picker over the venue's halls.
    #[must_use]
    pub fn halls(catalog: &Catalog, current: u32) -> Self {
        let items = catalog
            .halls
            .iter()
            .map(|h| PickerItem {
                label: h.name.clone(),
                event: ComponentEvent::HallSelected(h.hall_id),
            })
            .collect();
        let mut picker = Self::new(" Select Hall ", items);
        picker.selected = catalog
            .halls
            .iter()
            .position(|h| h.hall_id == current)
            .unwrap_or(0);
        picker
    }

    /// Picker over the catalog genres, with a leading "all" row that
    /// clears the filter.
    #[must_use]
    pub fn genres(catalog: &Catalog, current: Option<u32>) -> Self {
        let mut items = vec![PickerItem {
            label: "All genres".to_string(),
            event: ComponentEvent::GenreSelected(None),
        }];
        items.extend(catalog.genres.iter().map(|g| PickerItem {
            label: g.name.clone(),
            event: ComponentEvent::GenreSelected(Some(g.genre_id)),
        }));
        let mut picker = Self::new(" Filter by Genre ", items);
        picker.selected = current.map_or(0, |genre_id| {
            catalog
                .genres
                .iter()
                .position(|g| g.genre_id == genre_id)
                .map_or(0, |i| i + 1)
        });
        picker
    }

    /// Move selection up, wrapping at the top.
    pub fn select_previous(&mut self) {
        if !self.items.is_empty() {
            if self.selected > 0 {
                self.selected -= 1;
            } else {
                self.selected = self.items.len() - 1;
            }
        }
    }

    /// Move selection down, wrapping at the bottom.
    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }
}

impl Component for PickerState {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Enter => {
                self.should_close = true;
                self.items.get(self.selected).map(|item| item.event.clone())
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_close = true;
                Some(ComponentEvent::Closed)
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(40, 50, area);
        f.render_widget(Clear, popup);
        let background = Block::default().style(Style::default().bg(theme.background));
        f.render_widget(background, popup);

        let list_area = Rect {
            height: popup.height.saturating_sub(1),
            ..popup
        };
        let help_area = Rect {
            y: popup.y + popup.height.saturating_sub(1),
            height: 1,
            ..popup
        };

        let list_items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| ListItem::new(item.label.clone()))
            .collect();
        let list = List::new(list_items)
            .block(
                Block::default()
                    .title(self.title.clone())
                    .borders(Borders::ALL)
                    .style(Style::default().bg(theme.background).fg(theme.text)),
            )
            .highlight_style(
                Style::default()
                    .bg(theme.surface)
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected.min(self.items.len().saturating_sub(1))));
        f.render_stateful_widget(list, list_area, &mut list_state);

        let help = Paragraph::new("^|v: Navigate | Enter: Select | Esc: Cancel")
            .style(Style::default().bg(theme.background).fg(theme.text_muted));
        f.render_widget(help, help_area);
    }

    fn should_close(&self) -> bool {
        self.should_close
    }
}
