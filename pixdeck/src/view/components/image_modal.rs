//! src/view/components/image_modal.rs
//! ============================================================================
//! # ImageModal: detail overlay for the selected image
//!
//! Draws nothing unless the modal holds an image. The preview is a shaded box
//! sized to the image's aspect ratio (terminal cells are about twice as tall
//! as they are wide), followed by the metadata and the action keys.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::model::modal_state::ModalState;
use crate::view::components::image_card::{shade_for, truncate};
use crate::view::theme;

const DETAIL_LINES: u16 = 6;

pub struct ImageModal;

/// Centered rectangle the modal occupies on a given screen
pub fn modal_area(screen: Rect) -> Rect {
    let width = (screen.width * 80 / 100).max(30).min(screen.width);
    let height = (screen.height * 80 / 100).max(12).min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}

/// Preview box inside `area` keeping the image's shape
fn preview_rect(area: Rect, aspect: f64) -> Rect {
    if area.width == 0 || area.height == 0 {
        return area;
    }
    // One cell is roughly 1:2, so a square image is twice as wide in cells
    let cell_aspect = aspect * 2.0;
    let mut width = area.width;
    let mut height = (f64::from(width) / cell_aspect).round() as u16;
    if height > area.height {
        height = area.height;
        width = ((f64::from(height) * cell_aspect).round() as u16).clamp(1, area.width);
    }
    let height = height.max(1);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, height)
}

impl ImageModal {
    /// Returns the rectangle drawn, for backdrop click detection
    pub fn render(frame: &mut Frame<'_>, modal: &ModalState, screen: Rect) -> Option<Rect> {
        let image = modal.image()?;
        let title = modal.title().unwrap_or_default();
        let area = modal_area(screen);

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(
                " {} ",
                truncate(title, usize::from(area.width.saturating_sub(4)))
            ))
            .title_style(Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(theme::PURPLE))
            .style(theme::base_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [preview_area, details_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(DETAIL_LINES)]).areas(inner);

        let preview = preview_rect(preview_area, image.aspect_ratio());
        let shade: String = std::iter::repeat_n(shade_for(image.aspect_ratio()), usize::from(preview.width)).collect();
        let shade_lines: Vec<Line<'_>> = (0..preview.height)
            .map(|_| Line::from(Span::styled(shade.clone(), Style::default().fg(theme::CURRENT_LINE))))
            .collect();
        frame.render_widget(Paragraph::new(shade_lines), preview);

        let key = |k: &'static str| Span::styled(k, Style::default().fg(theme::PINK).add_modifier(Modifier::BOLD));
        let label = |l: &'static str| Span::styled(l, Style::default().fg(theme::FOREGROUND));

        let details = vec![
            Line::from(vec![
                Span::styled(
                    format!("By {}", image.user.name),
                    Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" (@{})", image.user.username), Style::default().fg(theme::COMMENT)),
            ]),
            Line::from(Span::styled(
                format!("{} × {}", image.width, image.height),
                Style::default().fg(theme::COMMENT),
            )),
            Line::from(Span::styled(image.urls.regular.as_str(), Style::default().fg(theme::GREEN))),
            Line::default(),
            Line::from(vec![
                key("[d]"),
                label(" Download  "),
                key("[l]"),
                label(" Like  "),
                key("[s]"),
                label(" Share  "),
                key("[Esc]"),
                label(" Close"),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(details)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            details_area,
        );

        Some(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::modal_state::ScrollLock;
    use crate::model::test_support::record;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn area_is_centered_and_clamped() {
        let area = modal_area(Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(10, 4, 80, 32));

        let tiny = modal_area(Rect::new(0, 0, 20, 8));
        assert_eq!(tiny, Rect::new(0, 0, 20, 8));
    }

    #[test]
    fn preview_keeps_shape_within_bounds() {
        let area = Rect::new(0, 0, 60, 20);
        let wide = preview_rect(area, 2.0);
        assert_eq!((wide.width, wide.height), (60, 15));

        let tall = preview_rect(area, 0.5);
        assert_eq!((tall.width, tall.height), (20, 20));
        assert_eq!(tall.x, 20);
    }

    #[test]
    fn closed_modal_draws_nothing() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let modal = ModalState::new(ScrollLock::default());
        let mut drawn = None;
        terminal
            .draw(|f| {
                let area = f.area();
                drawn = ImageModal::render(f, &modal, area);
            })
            .unwrap();
        assert!(drawn.is_none());
    }

    #[test]
    fn open_modal_shows_author_size_and_url() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut modal = ModalState::new(ScrollLock::default());
        modal.open(record("m", 1600, 900));
        let mut drawn = None;
        terminal
            .draw(|f| {
                let area = f.area();
                drawn = ImageModal::render(f, &modal, area);
            })
            .unwrap();

        assert_eq!(drawn, Some(modal_area(Rect::new(0, 0, 100, 40))));
        let screen = screen_text(&terminal);
        assert!(screen.contains("image m"));
        assert!(screen.contains("By Dorothea Lange (@dlange)"));
        assert!(screen.contains("1600 × 900"));
        assert!(screen.contains("https://images.example/m?regular"));
        assert!(screen.contains("[d] Download"));
    }
}
