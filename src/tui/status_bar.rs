//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Focus, PopupType, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut content_lines: Vec<Line> = Vec::new();

        // First line: error, status message, or nothing
        if let Some(error) = &state.error_message {
            content_lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.clone()),
            ]));
        } else if !state.status_message.is_empty() {
            content_lines.push(Line::from(state.status_message.clone()));
        }

        // Second line: where we are and how far along
        content_lines.push(Self::summary_line(state, theme));

        const MAX_CONTENT_LINES: usize = 2;
        let padding_needed = MAX_CONTENT_LINES.saturating_sub(content_lines.len());

        let mut status_text: Vec<Line> = Vec::new();
        for line in content_lines.into_iter().take(MAX_CONTENT_LINES) {
            status_text.push(line);
        }
        for _ in 0..padding_needed {
            status_text.push(Line::from(""));
        }
        status_text.push(Self::help_line(state, theme));

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Day, hall, progress and zoom in one glance.
    fn summary_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hall = state
            .current_hall()
            .map_or_else(|| "-".to_string(), |h| h.name.clone());
        let total = state.catalog.circles_on_day(state.day).count();
        let visited = state.visit_list.visited_count(state.day);

        let mut spans = vec![
            Span::styled("Day ", Style::default().fg(theme.text_muted)),
            Span::styled(
                state.day.to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(hall, Style::default().fg(theme.text)),
            Span::raw("  "),
            Span::styled("Visited ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{visited}/{total}"),
                Style::default().fg(theme.map_visited),
            ),
            Span::raw("  "),
            Span::styled(
                format!("Zoom 1/{}x", state.zoom_divisor),
                Style::default().fg(theme.text_muted),
            ),
        ];
        if state.overlay.is_recomputing() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                "updating overlay...",
                Style::default().fg(theme.warning),
            ));
        }
        if state.dirty {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                "unsaved *",
                Style::default().fg(theme.warning),
            ));
        }
        Line::from(spans)
    }

    /// Bottom help line, contextual on the active popup or focus.
    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hints: &[(&str, &str)] = match &state.active_popup {
            Some(PopupType::CircleDetail) => &[
                ("v", "Visited"),
                ("f", "Color"),
                ("m", "Memo"),
                ("y", "Copy"),
                ("Enter", "Map"),
                ("Esc", "Close"),
            ],
            Some(PopupType::DayPicker | PopupType::HallPicker | PopupType::GenrePicker) => {
                &[("^|v", "Navigate"), ("Enter", "Select"), ("Esc", "Cancel")]
            }
            Some(PopupType::Help) => &[("Esc", "Close")],
            None if state.search_active => &[("Enter", "Apply"), ("Esc", "Clear search")],
            None => match state.focus {
                Focus::Map => &[
                    ("Click", "Inspect"),
                    ("d/H/g", "Day/Hall/Genre"),
                    ("z", "Zoom"),
                    ("Tab", "List"),
                    ("q", "Quit"),
                ],
                Focus::List => &[
                    ("j/k", "Move"),
                    ("Enter", "Details"),
                    ("v", "Visited"),
                    ("/", "Search"),
                    ("Tab", "Map"),
                ],
            },
        };

        let mut spans: Vec<Span<'static>> = Vec::new();
        spans.push(Span::styled("Help: ", Style::default().fg(theme.primary)));
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(
                (*key).to_string(),
                Style::default().fg(theme.accent),
            ));
            spans.push(Span::raw(": "));
            spans.push(Span::raw((*action).to_string()));
        }
        if state.active_popup.is_none() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("?", Style::default().fg(theme.accent)));
            spans.push(Span::raw(": Help"));
        }
        Line::from(spans)
    }
}
