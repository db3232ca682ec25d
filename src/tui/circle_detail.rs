//! Detail popup for a single exhibitor.
//!
//! Shows the catalog entry together with the user's favorite state and
//! lets them toggle visited, cycle the color bucket, edit the memo,
//! copy the details or jump to the space on the map. All mutations are
//! emitted as [`ComponentEvent`]s; the parent owns the visit list and
//! calls [`CircleDetail::refresh`] after applying them.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::{Catalog, Circle, FavoriteRecord, VisitList};
use crate::tui::component::{Component, ComponentEvent};
use crate::tui::{centered_rect, Theme};

/// State for the exhibitor detail popup.
#[derive(Debug, Clone)]
pub struct CircleDetail {
    circle: Circle,
    space: String,
    genre: String,
    hall: String,
    color: u8,
    visited: bool,
    memo: String,
    memo_input: Option<String>,
    should_close: bool,
}

impl CircleDetail {
    /// Builds the popup for `circle_id`, or `None` when the catalog
    /// has no such circle.
    #[must_use]
    pub fn new(catalog: &Catalog, visit_list: &VisitList, day: u8, circle_id: u32) -> Option<Self> {
        let circle = catalog.circle(circle_id)?.clone();
        let space = catalog.space_label(&circle);
        let genre = catalog
            .genre_name(circle.genre_id)
            .unwrap_or("-")
            .to_string();
        let hall = catalog
            .cell(circle.block_id, circle.space_number)
            .and_then(|cell| catalog.hall(cell.hall_id))
            .map_or_else(|| "-".to_string(), |h| h.name.clone());
        let mut detail = Self {
            circle,
            space,
            genre,
            hall,
            color: 0,
            visited: false,
            memo: String::new(),
            memo_input: None,
            should_close: false,
        };
        detail.refresh(visit_list.record(day, circle_id));
        Some(detail)
    }

    /// Circle shown by this popup.
    #[must_use]
    pub const fn circle_id(&self) -> u32 {
        self.circle.circle_id
    }

    /// Re-reads the favorite state after the parent applied an event.
    pub fn refresh(&mut self, record: Option<&FavoriteRecord>) {
        match record {
            Some(r) => {
                self.color = r.color;
                self.visited = r.visited;
                self.memo.clone_from(&r.memo);
            }
            None => {
                self.color = 0;
                self.visited = false;
                self.memo.clear();
            }
        }
    }

    /// Whether the memo field is being edited.
    #[must_use]
    pub const fn is_editing_memo(&self) -> bool {
        self.memo_input.is_some()
    }

    fn handle_memo_input(&mut self, key: KeyEvent) -> Option<ComponentEvent> {
        match key.code {
            KeyCode::Enter => {
                let memo = self.memo_input.take().unwrap_or_default();
                Some(ComponentEvent::MemoEdited(self.circle.circle_id, memo))
            }
            KeyCode::Esc => {
                self.memo_input = None;
                None
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.memo_input.as_mut() {
                    buffer.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = self.memo_input.as_mut() {
                    buffer.push(c);
                }
                None
            }
            _ => None,
        }
    }
}

impl Component for CircleDetail {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        if self.is_editing_memo() {
            return self.handle_memo_input(key);
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_close = true;
                Some(ComponentEvent::Closed)
            }
            KeyCode::Char('v' | ' ') => {
                Some(ComponentEvent::VisitedToggled(self.circle.circle_id))
            }
            KeyCode::Char('f') => Some(ComponentEvent::ColorCycled(self.circle.circle_id)),
            KeyCode::Char('y') => Some(ComponentEvent::CopyCircleInfo(self.circle.circle_id)),
            KeyCode::Char('m') => {
                self.memo_input = Some(self.memo.clone());
                None
            }
            KeyCode::Enter | KeyCode::Char('g') => {
                self.should_close = true;
                Some(ComponentEvent::JumpToMap(self.circle.circle_id))
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(55, 70, area);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", self.circle.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Fields
                Constraint::Min(2),    // Description
                Constraint::Length(3), // Memo
                Constraint::Length(1), // Controls
            ])
            .margin(1)
            .split(inner);

        let label = Style::default().fg(theme.text_muted);
        let value = Style::default().fg(theme.text);
        let color_span = if self.color > 0 {
            Span::styled(
                format!("● {}", self.color),
                Style::default().fg(theme.favorite_color(self.color)),
            )
        } else {
            Span::styled("none", label)
        };
        let visited_span = if self.visited {
            Span::styled("✔ visited", Style::default().fg(theme.map_visited))
        } else {
            Span::styled("not yet", label)
        };
        let fields = vec![
            Line::from(vec![
                Span::styled("Penname  ", label),
                Span::styled(&self.circle.penname, value),
            ]),
            Line::from(vec![
                Span::styled("Space    ", label),
                Span::styled(&self.space, value),
                Span::styled(format!("  Day {}", self.circle.day), label),
            ]),
            Line::from(vec![
                Span::styled("Hall     ", label),
                Span::styled(&self.hall, value),
            ]),
            Line::from(vec![
                Span::styled("Genre    ", label),
                Span::styled(&self.genre, value),
            ]),
            Line::from(vec![
                Span::styled("Color    ", label),
                color_span,
                Span::raw("  "),
                visited_span,
            ]),
        ];
        f.render_widget(Paragraph::new(fields), chunks[0]);

        let description = self.circle.description.as_deref().unwrap_or("");
        f.render_widget(
            Paragraph::new(description)
                .style(Style::default().fg(theme.text))
                .wrap(Wrap { trim: true }),
            chunks[1],
        );

        let (memo_text, memo_style) = match &self.memo_input {
            Some(buffer) => (format!("{buffer}_"), Style::default().fg(theme.accent)),
            None => (self.memo.clone(), Style::default().fg(theme.text)),
        };
        let memo_block = Block::default()
            .title("Memo")
            .borders(Borders::ALL)
            .border_style(if self.is_editing_memo() {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.text_muted)
            });
        f.render_widget(
            Paragraph::new(memo_text).style(memo_style).block(memo_block),
            chunks[2],
        );

        let controls = if self.is_editing_memo() {
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
                Span::raw(" save  "),
                Span::styled("Esc", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
                Span::raw(" cancel"),
            ])
        } else {
            Line::from(vec![
                Span::styled("v", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::raw(" visited  "),
                Span::styled("f", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::raw(" color  "),
                Span::styled("m", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::raw(" memo  "),
                Span::styled("y", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::raw(" copy  "),
                Span::styled("Enter", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::raw(" map  "),
                Span::styled("Esc", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
                Span::raw(" close"),
            ])
        };
        f.render_widget(
            Paragraph::new(controls).alignment(Alignment::Center),
            chunks[3],
        );
    }

    fn should_close(&self) -> bool {
        self.should_close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Block as HallBlock, CellOrientation, EventDay, Genre, Hall, LayoutCell, VenueMap,
    };
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent};

    fn catalog() -> Catalog {
        Catalog {
            event_name: "Test Event".to_string(),
            days: vec![EventDay {
                day: 1,
                date: NaiveDate::from_ymd_opt(2024, 8, 11).unwrap(),
            }],
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
                space_size: 10,
            }],
            blocks: vec![HallBlock {
                block_id: 1,
                name: "A".to_string(),
            }],
            genres: vec![Genre {
                genre_id: 10,
                name: "Original".to_string(),
            }],
            cells: vec![LayoutCell {
                block_id: 1,
                space_number: 1,
                x: 0,
                y: 0,
                orientation: CellOrientation::Top,
                hall_id: 1,
                map_id: 1,
            }],
            circles: vec![Circle {
                circle_id: 100,
                name: "Alpha Works".to_string(),
                penname: "alpha".to_string(),
                genre_id: 10,
                day: 1,
                block_id: 1,
                space_number: 1,
                space_sub: 0,
                description: Some("Original art books".to_string()),
            }],
        }
    }

    fn detail() -> CircleDetail {
        let catalog = catalog();
        let visits = VisitList::new("test-event", &[1]);
        CircleDetail::new(&catalog, &visits, 1, 100).unwrap()
    }

    #[test]
    fn test_new_resolves_labels() {
        let d = detail();
        assert_eq!(d.space, "A-01a");
        assert_eq!(d.genre, "Original");
        assert_eq!(d.hall, "East 1");
        assert!(!d.visited);
        assert_eq!(d.color, 0);
    }

    #[test]
    fn test_unknown_circle_yields_none() {
        let catalog = catalog();
        let visits = VisitList::new("test-event", &[1]);
        assert!(CircleDetail::new(&catalog, &visits, 1, 999).is_none());
    }

    #[test]
    fn test_toggle_keys_emit_events() {
        let mut d = detail();
        assert_eq!(
            d.handle_input(KeyEvent::from(KeyCode::Char('v'))),
            Some(ComponentEvent::VisitedToggled(100))
        );
        assert_eq!(
            d.handle_input(KeyEvent::from(KeyCode::Char('f'))),
            Some(ComponentEvent::ColorCycled(100))
        );
        assert_eq!(
            d.handle_input(KeyEvent::from(KeyCode::Char('y'))),
            Some(ComponentEvent::CopyCircleInfo(100))
        );
        assert!(!d.should_close());
    }

    #[test]
    fn test_enter_jumps_to_map_and_closes() {
        let mut d = detail();
        assert_eq!(
            d.handle_input(KeyEvent::from(KeyCode::Enter)),
            Some(ComponentEvent::JumpToMap(100))
        );
        assert!(d.should_close());
    }

    #[test]
    fn test_memo_edit_commit() {
        let mut d = detail();
        assert_eq!(d.handle_input(KeyEvent::from(KeyCode::Char('m'))), None);
        assert!(d.is_editing_memo());
        for c in "new print".chars() {
            assert_eq!(d.handle_input(KeyEvent::from(KeyCode::Char(c))), None);
        }
        assert_eq!(
            d.handle_input(KeyEvent::from(KeyCode::Enter)),
            Some(ComponentEvent::MemoEdited(100, "new print".to_string()))
        );
        assert!(!d.is_editing_memo());
    }

    #[test]
    fn test_memo_edit_cancel_keeps_original() {
        let mut d = detail();
        d.refresh(Some(&FavoriteRecord {
            circle_id: 100,
            name: "Alpha Works".to_string(),
            color: 2,
            memo: "keep me".to_string(),
            visited: true,
        }));
        d.handle_input(KeyEvent::from(KeyCode::Char('m')));
        d.handle_input(KeyEvent::from(KeyCode::Char('x')));
        assert_eq!(d.handle_input(KeyEvent::from(KeyCode::Esc)), None);
        assert!(!d.is_editing_memo());
        assert_eq!(d.memo, "keep me");
        assert_eq!(d.color, 2);
        assert!(d.visited);
    }

    #[test]
    fn test_q_closes_outside_memo_edit() {
        let mut d = detail();
        d.handle_input(KeyEvent::from(KeyCode::Char('m')));
        d.handle_input(KeyEvent::from(KeyCode::Char('q')));
        // While editing, 'q' is text input.
        assert!(!d.should_close());
        d.handle_input(KeyEvent::from(KeyCode::Esc));
        assert_eq!(
            d.handle_input(KeyEvent::from(KeyCode::Char('q'))),
            Some(ComponentEvent::Closed)
        );
        assert!(d.should_close());
    }
}
