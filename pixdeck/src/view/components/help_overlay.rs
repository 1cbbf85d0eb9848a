//! Key reference overlay.
use crate::view::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame<'_>, area: Rect) {
        let overlay_area = Self::centered_rect(70, 80, area);
        frame.render_widget(Clear, overlay_area);

        let help_paragraph = Paragraph::new(Text::from(Self::help_lines()))
            .block(
                Block::default()
                    .title(" PixelOcean Help ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme::CYAN))
                    .style(Style::default().bg(theme::BACKGROUND)),
            )
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: false });

        frame.render_widget(help_paragraph, overlay_area);
    }

    fn section(title: &'static str) -> Line<'static> {
        Line::from(Span::styled(
            title,
            Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD),
        ))
    }

    fn help_lines() -> Vec<Line<'static>> {
        vec![
            Self::section("General"),
            Line::from("  Tab / Shift+Tab  Move focus: search, categories, grid"),
            Line::from("  /                Focus the search box"),
            Line::from("  r                Reload the current query"),
            Line::from("  m                Load the next page"),
            Line::from("  x                Dismiss the notification"),
            Line::from("  ?                Toggle this help"),
            Line::from("  q / Ctrl+C       Quit"),
            Line::from(""),
            Self::section("Search"),
            Line::from("  Enter            Search, or pick the highlighted suggestion"),
            Line::from("  Up / Down        Move through suggestions"),
            Line::from("  Esc              Hide suggestions, then leave the box"),
            Line::from("  Ctrl+U           Clear the line"),
            Line::from(""),
            Self::section("Categories"),
            Line::from("  Left / Right     Move between chips"),
            Line::from("  Enter / Space    Show the category"),
            Line::from(""),
            Self::section("Grid"),
            Line::from("  Arrows / hjkl    Move the selection"),
            Line::from("  PgUp / PgDn      Scroll a screen"),
            Line::from("  g / G            First / last image"),
            Line::from("  Enter / click    Open the image"),
            Line::from(""),
            Self::section("Image"),
            Line::from("  d                Download (opens the full image)"),
            Line::from("  l                Like"),
            Line::from("  s                Copy the share link"),
            Line::from("  Esc / q / click outside  Close"),
        ]
    }

    fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vertical[1])[1]
    }
}
