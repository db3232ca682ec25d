//! Searchable exhibitor list for the active day.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::models::{Catalog, VisitList};
use crate::tui::AppState;

/// Filter and selection state for the exhibitor list.
///
/// The filtered id list is cached and refreshed explicitly via
/// [`Self::refilter`] whenever the day, query, genre filter or
/// favorites toggle changes.
#[derive(Debug, Default)]
pub struct CircleListState {
    /// Live search query.
    pub query: String,
    /// Restricts the list to one genre when set.
    pub genre_filter: Option<u32>,
    /// Show only circles with a favorite record.
    pub favorites_only: bool,
    /// Selected row within the filtered list.
    pub selected: usize,
    filtered: Vec<u32>,
}

impl CircleListState {
    /// Recomputes the filtered circle ids for `day`.
    ///
    /// Results are ordered by placement (block, space, sub-id) so the
    /// list reads like walking the hall.
    pub fn refilter(&mut self, catalog: &Catalog, day: u8, visit_list: &VisitList) {
        let mut ids: Vec<u32> = catalog
            .circles_on_day(day)
            .filter(|c| {
                self.genre_filter.is_none_or(|g| c.genre_id == g)
            })
            .filter(|c| self.query.is_empty() || c.matches_query(&self.query))
            .filter(|c| {
                !self.favorites_only || visit_list.record(day, c.circle_id).is_some()
            })
            .map(|c| c.circle_id)
            .collect();
        ids.sort_by_key(|id| {
            catalog
                .circle(*id)
                .map_or((u32::MAX, u32::MAX, u8::MAX, *id), |c| {
                    (c.block_id, c.space_number, c.space_sub, c.circle_id)
                })
        });
        self.filtered = ids;
        if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len().saturating_sub(1);
        }
    }

    /// Filtered circle ids in display order.
    #[must_use]
    pub fn filtered(&self) -> &[u32] {
        &self.filtered
    }

    /// Circle id under the cursor, if any.
    #[must_use]
    pub fn selected_circle_id(&self) -> Option<u32> {
        self.filtered.get(self.selected).copied()
    }

    /// Moves the cursor by `delta`, clamping to the list bounds.
    pub fn move_selection(&mut self, delta: i32) {
        if self.filtered.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.filtered.len() - 1;
        let next = i64::from(delta) + self.selected as i64;
        self.selected = next.clamp(0, last as i64) as usize;
    }

    /// Jumps the cursor to the row showing `circle_id`, if present.
    pub fn select_circle(&mut self, circle_id: u32) {
        if let Some(pos) = self.filtered.iter().position(|id| *id == circle_id) {
            self.selected = pos;
        }
    }

    /// Appends a character to the search query.
    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    /// Removes the last character from the search query.
    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    /// Clears the query and all filters.
    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.genre_filter = None;
        self.favorites_only = false;
    }
}

/// The exhibitor list widget.
pub struct CircleList;

impl CircleList {
    /// Renders the list for the active day.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
        let theme = &state.theme;
        let list = &state.circle_list;
        let visited = state.visit_list.visited_for(state.day);

        let border_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.primary)
        };
        let mut title = format!(" Circles ({}) ", list.filtered().len());
        if !list.query.is_empty() {
            title = format!(" Circles ({}) /{} ", list.filtered().len(), list.query);
        }
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.background));

        let header = Row::new(vec![
            Cell::from(""),
            Cell::from("Space"),
            Cell::from("Circle"),
            Cell::from("Genre"),
        ])
        .style(
            Style::default()
                .fg(theme.text_muted)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = list
            .filtered()
            .iter()
            .filter_map(|id| state.catalog.circle(*id))
            .map(|circle| {
                let record = state.visit_list.record(state.day, circle.circle_id);
                let mark = match record {
                    Some(r) if r.color > 0 => Span::styled(
                        if visited.contains(&circle.circle_id) {
                            "✔"
                        } else {
                            "●"
                        },
                        Style::default().fg(theme.favorite_color(r.color)),
                    ),
                    _ if visited.contains(&circle.circle_id) => {
                        Span::styled("✔", Style::default().fg(theme.map_visited))
                    }
                    _ => Span::raw(" "),
                };
                let space = state.catalog.space_label(circle);
                let style = if visited.contains(&circle.circle_id) {
                    Style::default().fg(theme.text_muted)
                } else {
                    Style::default().fg(theme.text)
                };
                Row::new(vec![
                    Cell::from(Line::from(mark)),
                    Cell::from(space),
                    Cell::from(circle.name.clone()),
                    Cell::from(
                        state
                            .catalog
                            .genre_name(circle.genre_id)
                            .unwrap_or("-")
                            .to_string(),
                    ),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(1),
                Constraint::Length(7),
                Constraint::Fill(2),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(theme.surface)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

        let mut table_state = TableState::default();
        if !list.filtered().is_empty() {
            table_state.select(Some(list.selected));
        }
        f.render_stateful_widget(table, area, &mut table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Block as HallBlock, Catalog, CellOrientation, Circle, EventDay, Genre, Hall, LayoutCell,
        VenueMap, VisitList,
    };
    use chrono::NaiveDate;

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
            blocks: vec![HallBlock {
                block_id: 1,
                name: "A".to_string(),
            }],
            genres: vec![
                Genre {
                    genre_id: 10,
                    name: "Original".to_string(),
                },
                Genre {
                    genre_id: 20,
                    name: "Music".to_string(),
                },
            ],
            maps: vec![VenueMap {
                map_id: 1,
                name: "East".to_string(),
                width: 400,
                height: 300,
                space_size: 10,
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
            circles: vec![
                Circle {
                    circle_id: 100,
                    name: "Alpha Works".to_string(),
                    penname: "alpha".to_string(),
                    genre_id: 10,
                    day: 1,
                    block_id: 1,
                    space_number: 2,
                    space_sub: 0,
                    description: None,
                },
                Circle {
                    circle_id: 200,
                    name: "Beta Sounds".to_string(),
                    penname: "beta".to_string(),
                    genre_id: 20,
                    day: 1,
                    block_id: 1,
                    space_number: 1,
                    space_sub: 0,
                    description: None,
                },
            ],
        }
    }

    fn visit_list() -> VisitList {
        VisitList::new("test-event", &[1])
    }

    #[test]
    fn test_refilter_orders_by_placement() {
        let catalog = catalog();
        let visits = visit_list();
        let mut list = CircleListState::default();
        list.refilter(&catalog, 1, &visits);
        // Space A-01 (circle 200) comes before A-02 (circle 100).
        assert_eq!(list.filtered(), &[200, 100]);
    }

    #[test]
    fn test_refilter_applies_query_and_genre() {
        let catalog = catalog();
        let visits = visit_list();
        let mut list = CircleListState {
            query: "alpha".to_string(),
            ..CircleListState::default()
        };
        list.refilter(&catalog, 1, &visits);
        assert_eq!(list.filtered(), &[100]);

        list.query.clear();
        list.genre_filter = Some(20);
        list.refilter(&catalog, 1, &visits);
        assert_eq!(list.filtered(), &[200]);
    }

    #[test]
    fn test_refilter_favorites_only() {
        let catalog = catalog();
        let mut visits = visit_list();
        visits
            .insert_record(
                1,
                crate::models::FavoriteRecord {
                    circle_id: 100,
                    name: "Alpha Works".to_string(),
                    color: 3,
                    memo: String::new(),
                    visited: false,
                },
            )
            .unwrap();
        let mut list = CircleListState {
            favorites_only: true,
            ..CircleListState::default()
        };
        list.refilter(&catalog, 1, &visits);
        assert_eq!(list.filtered(), &[100]);
    }

    #[test]
    fn test_selection_clamps_after_refilter() {
        let catalog = catalog();
        let visits = visit_list();
        let mut list = CircleListState {
            selected: 5,
            ..CircleListState::default()
        };
        list.refilter(&catalog, 1, &visits);
        assert_eq!(list.selected, 1);

        list.query = "no such circle".to_string();
        list.refilter(&catalog, 1, &visits);
        assert_eq!(list.selected, 0);
        assert!(list.selected_circle_id().is_none());
    }

    #[test]
    fn test_move_selection_bounds() {
        let catalog = catalog();
        let visits = visit_list();
        let mut list = CircleListState::default();
        list.refilter(&catalog, 1, &visits);
        list.move_selection(-3);
        assert_eq!(list.selected, 0);
        list.move_selection(10);
        assert_eq!(list.selected, 1);
    }

    #[test]
    fn test_select_circle_by_id() {
        let catalog = catalog();
        let visits = visit_list();
        let mut list = CircleListState::default();
        list.refilter(&catalog, 1, &visits);
        list.select_circle(100);
        assert_eq!(list.selected, 1);
        assert_eq!(list.selected_circle_id(), Some(100));
    }
}
