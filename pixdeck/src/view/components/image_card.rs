//! src/view/components/image_card.rs
//! ============================================================================
//! # ImageCard: one masonry tile
//!
//! A bordered tile with a shaded placeholder standing in for the picture,
//! followed by the alt text, the author and the pixel dimensions. The shade
//! gets lighter as the image gets wider.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use stockr::ImageRecord;

use crate::view::theme;

pub struct ImageCard<'a> {
    record: &'a ImageRecord,
    selected: bool,
}

impl<'a> ImageCard<'a> {
    pub fn new(record: &'a ImageRecord, selected: bool) -> Self {
        Self { record, selected }
    }
}

/// Fill glyph for a given aspect ratio: portrait dense, landscape light
pub fn shade_for(aspect: f64) -> char {
    if aspect < 0.8 {
        '▓'
    } else if aspect <= 1.25 {
        '▒'
    } else {
        '░'
    }
}

/// Cut `text` to at most `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

impl Widget for ImageCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::card_border_style(self.selected))
            .style(theme::base_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = usize::from(inner.width);
        let record = self.record;
        let alt = if record.alt_description.trim().is_empty() {
            "Untitled image"
        } else {
            record.alt_description.as_str()
        };

        let title_style = if self.selected {
            Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::FOREGROUND).add_modifier(Modifier::BOLD)
        };
        let captions = [
            Line::from(Span::styled(truncate(alt, width), title_style)),
            Line::from(Span::styled(
                truncate(&format!("By {}", record.user.name), width),
                Style::default().fg(theme::CYAN),
            )),
            Line::from(Span::styled(
                truncate(&format!("{}×{}", record.width, record.height), width),
                Style::default().fg(theme::COMMENT),
            )),
        ];

        let caption_lines = captions.len().min(usize::from(inner.height));
        let shade_lines = usize::from(inner.height) - caption_lines;
        let shade: String = std::iter::repeat_n(shade_for(record.aspect_ratio()), width).collect();

        let mut lines: Vec<Line<'_>> = (0..shade_lines)
            .map(|_| Line::from(Span::styled(shade.clone(), theme::skeleton_style())))
            .collect();
        lines.extend(captions.into_iter().take(caption_lines));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::record;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate("mountain lake", 8), "mountai…");
        assert_eq!(truncate("lake", 8), "lake");
        assert_eq!(truncate("lake", 0), "");
    }

    #[test]
    fn shade_tracks_aspect_ratio() {
        assert_eq!(shade_for(0.5), '▓');
        assert_eq!(shade_for(1.0), '▒');
        assert_eq!(shade_for(1.8), '░');
    }

    #[test]
    fn card_shows_caption_below_placeholder() {
        let image = record("a", 1000, 2000);
        let area = Rect::new(0, 0, 20, 8);
        let mut buf = Buffer::empty(area);
        ImageCard::new(&image, true).render(area, &mut buf);

        assert!(row(&buf, 1).contains('▓'));
        assert!(row(&buf, 4).contains("image a"));
        assert!(row(&buf, 5).contains("By Dorothea Lange"));
        assert!(row(&buf, 6).contains("1000×2000"));
    }

    #[test]
    fn tiny_card_keeps_title_first() {
        let image = record("b", 1000, 1000);
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        ImageCard::new(&image, false).render(area, &mut buf);
        assert!(row(&buf, 1).contains("image b"));
    }
}
