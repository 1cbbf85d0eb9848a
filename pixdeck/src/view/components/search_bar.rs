//! Search input box and the suggestion panel that drops down under it.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::model::search_state::SearchState;
use crate::view::theme;

pub const PLACEHOLDER: &str = "Search for images...";

pub struct SearchBar;

impl SearchBar {
    pub fn render(frame: &mut Frame<'_>, search: &SearchState, focused: bool, area: Rect) {
        let border = if focused {
            theme::focused_border_style()
        } else {
            theme::border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Search ")
            .border_style(border)
            .style(theme::base_style());
        let inner = block.inner(area);

        let content = if search.text().is_empty() {
            Line::from(Span::styled(PLACEHOLDER, theme::placeholder_style()))
        } else {
            Line::from(Span::styled(
                search.text().to_string(),
                Style::default().fg(theme::FOREGROUND),
            ))
        };

        // Keep the cursor inside the box for long queries
        let cursor = u16::try_from(search.cursor()).unwrap_or(u16::MAX);
        let skip = cursor.saturating_sub(inner.width.saturating_sub(1));
        frame.render_widget(Paragraph::new(content).block(block).scroll((0, skip)), area);

        if focused && inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((inner.x + cursor - skip, inner.y));
        }
    }

    /// Panel rectangle under the search box, clipped to the screen
    pub fn panel_area(search_area: Rect, count: usize, screen: Rect) -> Rect {
        let wanted = u16::try_from(count).unwrap_or(u16::MAX).saturating_add(2);
        let y = search_area.y + search_area.height;
        let room = (screen.y + screen.height).saturating_sub(y);
        Rect::new(search_area.x, y, search_area.width, wanted.min(room))
    }

    pub fn render_panel(frame: &mut Frame<'_>, search: &SearchState, area: Rect) {
        frame.render_widget(Clear, area);

        let items: Vec<ListItem<'_>> = search
            .suggestions()
            .iter()
            .map(|s| ListItem::new(Line::from(format!("  {s}"))))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme::PURPLE))
                    .style(theme::base_style()),
            )
            .style(Style::default().fg(theme::FOREGROUND))
            .highlight_style(theme::highlight_style().add_modifier(Modifier::BOLD));

        let mut list_state = ListState::default().with_selected(search.highlighted());
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
