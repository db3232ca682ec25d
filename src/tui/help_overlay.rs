//! Help overlay widget showing all keyboard shortcuts organized by category.
//!
//! Scrollable modal opened with '?' that documents every binding in
//! the browser.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use super::Theme;

/// State for the help overlay.
#[derive(Debug, Clone)]
pub struct HelpOverlayState {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    /// Total number of content lines
    total_lines: usize,
}

impl HelpOverlayState {
    /// Creates a new help overlay state.
    #[must_use]
    pub fn new() -> Self {
        let content = Self::get_help_content(&Theme::default());
        let total_lines = content.len();
        Self {
            scroll_offset: 0,
            total_lines,
        }
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub const fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines {
            self.scroll_offset += 1;
        }
    }

    /// Scroll to the top.
    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll down by a page (approximation based on visible height).
    pub fn page_down(&mut self, visible_height: usize) {
        self.scroll_offset =
            (self.scroll_offset + visible_height).min(self.total_lines.saturating_sub(1));
    }

    /// Scroll up by a page (approximation based on visible height).
    pub const fn page_up(&mut self, visible_height: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(visible_height);
    }

    fn section(theme: &Theme, title: &'static str) -> Line<'static> {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn binding(theme: &Theme, key: &'static str, action: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled("  ", Style::default().fg(theme.text)),
            Span::styled(format!("{key:<12}"), Style::default().fg(theme.success)),
            Span::styled(action, Style::default().fg(theme.text)),
        ])
    }

    /// Get the help content organized by category.
    fn get_help_content(theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "                    Hallmap - Help                    ",
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Self::section(theme, "═══ NAVIGATION ═══"),
            Line::from(""),
        ];
        lines.push(Self::binding(theme, "Tab", "Switch focus between map and list"));
        lines.push(Self::binding(theme, "Arrow Keys", "Scroll map / move list cursor"));
        lines.push(Self::binding(theme, "h/j/k/l", "VIM-style scroll and movement"));
        lines.push(Self::binding(theme, "d", "Pick event day"));
        lines.push(Self::binding(theme, "H", "Pick hall"));
        lines.push(Self::binding(theme, "g", "Filter by genre"));
        lines.push(Line::from(""));
        lines.push(Self::section(theme, "═══ MAP ═══"));
        lines.push(Line::from(""));
        lines.push(Self::binding(theme, "Click", "Inspect the space under the cursor"));
        lines.push(Self::binding(theme, "Wheel", "Scroll the map"));
        lines.push(Self::binding(theme, "z", "Cycle zoom (1/1x, 1/2x, 1/4x)"));
        lines.push(Self::binding(theme, "c", "Center the map on the highlight"));
        lines.push(Self::binding(theme, "n", "Focus the next circle in the space"));
        lines.push(Self::binding(theme, "Esc", "Clear the highlight"));
        lines.push(Line::from(""));
        lines.push(Self::section(theme, "═══ LIST & SEARCH ═══"));
        lines.push(Line::from(""));
        lines.push(Self::binding(theme, "/", "Search circles by name or penname"));
        lines.push(Self::binding(theme, "Enter", "Open circle details"));
        lines.push(Self::binding(theme, "m", "Jump to the circle's space on the map"));
        lines.push(Self::binding(theme, "F", "Toggle favorites-only view"));
        lines.push(Self::binding(theme, "Esc", "Clear search and filters"));
        lines.push(Line::from(""));
        lines.push(Self::section(theme, "═══ FAVORITES & VISITS ═══"));
        lines.push(Line::from(""));
        lines.push(Self::binding(theme, "v / Space", "Toggle visited mark"));
        lines.push(Self::binding(theme, "f", "Cycle favorite color (1-9, off)"));
        lines.push(Self::binding(theme, "m", "Edit memo (in details popup)"));
        lines.push(Self::binding(theme, "y", "Copy circle info to clipboard"));
        lines.push(Line::from(""));
        lines.push(Self::section(theme, "═══ FILES ═══"));
        lines.push(Line::from(""));
        lines.push(Self::binding(theme, "s", "Save the visit list"));
        lines.push(Line::from(""));
        lines.push(Self::section(theme, "═══ TIPS ═══"));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  • Checkmarks on the map show spaces you already visited",
            Style::default().fg(theme.text),
        )));
        lines.push(Line::from(Span::styled(
            "  • Jumping to a circle from the list blinks its space on the map",
            Style::default().fg(theme.text),
        )));
        lines.push(Line::from(Span::styled(
            "  • 'unsaved *' in the status bar means the visit list has changes",
            Style::default().fg(theme.text),
        )));
        lines.push(Line::from(Span::styled(
            "  • The overlay recomputes in the background; the map stays responsive",
            Style::default().fg(theme.text),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "          Press '?' or Esc to close • ↑↓ to scroll          ",
            Style::default().fg(theme.text_muted),
        )));
        lines
    }

    /// Render the help overlay as a centered modal.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = (area.width * 60) / 100;
        let height = (area.height * 80) / 100;
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;

        let modal_area = Rect {
            x: x + area.x,
            y: y + area.y,
            width,
            height,
        };
        frame.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let content_area = chunks[0];
        let scrollbar_area = chunks[1];

        let content = Self::get_help_content(theme);
        let visible_height = content_area.height.saturating_sub(2) as usize;
        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.background)),
            )
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, content_area);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(theme.primary));

        let mut scrollbar_state =
            ScrollbarState::new(self.total_lines.saturating_sub(visible_height))
                .position(self.scroll_offset);

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

impl Default for HelpOverlayState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_bounds() {
        let mut state = HelpOverlayState::new();
        state.scroll_up();
        assert_eq!(state.scroll_offset, 0);
        state.scroll_down();
        assert_eq!(state.scroll_offset, 1);
        state.scroll_to_top();
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_page_movement_clamps() {
        let mut state = HelpOverlayState::new();
        state.page_down(10_000);
        assert_eq!(state.scroll_offset, state.total_lines - 1);
        state.page_up(10);
        assert_eq!(state.scroll_offset, state.total_lines - 11);
        state.page_up(10_000);
        assert_eq!(state.scroll_offset, 0);
    }
}
