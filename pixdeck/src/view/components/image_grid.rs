//! src/view/components/image_grid.rs
//! ============================================================================
//! # ImageGrid: masonry viewport plus footer line
//!
//! Cards are painted into a scratch buffer at full height and then copied row
//! by row, so a card cut by the top or bottom edge still shows its visible
//! part. The footer carries the loading dots or the end-of-results text.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::model::grid_state::GridState;
use crate::model::masonry::CardSlot;
use crate::view::components::image_card::ImageCard;
use crate::view::theme;

pub const EMPTY_TITLE: &str = "No images found";
pub const EMPTY_HINT: &str = "Try a different search term";
pub const END_TEXT: &str = "No more images to load";

pub struct ImageGrid;

impl ImageGrid {
    /// Card viewport and the footer line under it
    pub fn split(area: Rect) -> (Rect, Rect) {
        let [cards, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        (cards, footer)
    }

    pub fn render(buf: &mut Buffer, grid: &GridState, cards: Rect, footer: Rect, tick: u64) {
        if grid.is_empty_result() {
            Self::render_empty(buf, cards);
        } else {
            let scroll = grid.scroll();
            let layout = grid.layout();
            for slot in layout.visible(scroll, cards.height) {
                if let Some(record) = grid.records().get(slot.index) {
                    let card = ImageCard::new(record, grid.selected() == Some(slot.index));
                    let x = cards.x + slot.column * layout.column_width;
                    Self::blit_card(buf, card, slot, x, layout.column_width, cards, scroll);
                }
            }
        }

        Self::render_footer(buf, grid, footer, tick);
    }

    fn blit_card(
        buf: &mut Buffer,
        card: ImageCard<'_>,
        slot: &CardSlot,
        x: u16,
        width: u16,
        viewport: Rect,
        scroll: u32,
    ) {
        let width = width.min((viewport.x + viewport.width).saturating_sub(x));
        if width == 0 {
            return;
        }

        let scratch_area = Rect::new(0, 0, width, slot.height);
        let mut scratch = Buffer::empty(scratch_area);
        card.render(scratch_area, &mut scratch);

        let bottom = scroll + u32::from(viewport.height);
        for row in 0..slot.height {
            let line = slot.top + u32::from(row);
            if line < scroll || line >= bottom {
                continue;
            }
            // Within the viewport, so it fits in u16
            let y = viewport.y + (line - scroll) as u16;
            for col in 0..width {
                buf[(x + col, y)] = scratch[(col, row)].clone();
            }
        }
    }

    fn render_empty(buf: &mut Buffer, area: Rect) {
        if area.height == 0 {
            return;
        }
        let top = area.height.saturating_sub(2) / 2;
        let text_area = Rect::new(area.x, area.y + top, area.width, area.height - top);

        Paragraph::new(vec![
            Line::from(Span::styled(
                EMPTY_TITLE,
                Style::default()
                    .fg(theme::FOREGROUND)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(EMPTY_HINT, Style::default().fg(theme::COMMENT))),
        ])
        .alignment(Alignment::Center)
        .render(text_area, buf);
    }

    fn render_footer(buf: &mut Buffer, grid: &GridState, area: Rect, tick: u64) {
        let line = if grid.is_loading() {
            Self::loading_dots(tick)
        } else if grid.is_end_of_results() {
            Line::from(Span::styled(END_TEXT, Style::default().fg(theme::COMMENT)))
        } else {
            Line::default()
        };

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    /// Three dots with one lit, advancing every tick
    fn loading_dots(tick: u64) -> Line<'static> {
        let lit = (tick % 3) as usize;
        let spans: Vec<Span<'static>> = (0..3)
            .map(|i| {
                let color = if i == lit { theme::PURPLE } else { theme::CURRENT_LINE };
                Span::styled("● ", Style::default().fg(color))
            })
            .collect();
        Line::from(spans)
    }
}
