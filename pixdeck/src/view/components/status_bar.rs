//! src/view/components/status_bar.rs
//!
//! Bottom line: focused pane, committed query, how many images are loaded and
//! the next page cursor on the left; the last fetch error or the attribution
//! on the right.

use crate::{
    model::{app_state::AppState, ui_state::Focus},
    view::theme,
};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

pub const ATTRIBUTION: &str = "Images sourced from Unsplash · ? for help";

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame<'_>, app: &AppState, area: Rect) {
        let mode_str = match app.ui.focus {
            Focus::Search => "SEARCH",
            Focus::Categories => "CATEGORIES",
            Focus::Grid => "GRID",
        };

        let query = if app.committed_query().is_empty() {
            "All images".to_string()
        } else {
            format!("\"{}\"", app.committed_query())
        };

        let grid = &app.grid;
        let left_text = format!(
            " {} | {} | {} images | next page {}",
            mode_str,
            query,
            grid.records().len(),
            grid.page()
        );

        let right = match grid.last_error() {
            Some(error) => Span::styled(
                format!("Last fetch failed: {error} (m to retry) "),
                Style::default().fg(theme::RED),
            ),
            None => Span::styled(format!("{ATTRIBUTION} "), Style::default().fg(theme::COMMENT)),
        };

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Paragraph::new(left_text)
            .style(Style::default().fg(theme::FOREGROUND).bg(theme::CURRENT_LINE))
            .alignment(Alignment::Left)
            .render(layout[0], frame.buffer_mut());

        Paragraph::new(Line::from(right))
            .style(Style::default().bg(theme::CURRENT_LINE))
            .alignment(Alignment::Right)
            .render(layout[1], frame.buffer_mut());
    }
}
