//! src/view/components/category_bar.rs
//! ============================================================================
//! # CategoryBar: horizontal chip row
//!
//! Chips are laid out left to right and stop at the edge of the bar. The
//! rectangles of the chips actually drawn are returned for mouse hit-testing.

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::Span,
    widgets::{Block, BorderType, Borders},
};
use smallvec::SmallVec;

use crate::model::category_state::{CategoryState, SKELETON_COUNT};
use crate::view::theme;

const CHIP_GAP: u16 = 1;
const SKELETON_WIDTH: u16 = 10;

pub struct CategoryBar;

impl CategoryBar {
    pub fn render(
        frame: &mut Frame<'_>,
        categories: &CategoryState,
        focused: bool,
        tick: u64,
        area: Rect,
    ) -> SmallVec<[(usize, Rect); 12]> {
        let border = if focused {
            theme::focused_border_style()
        } else {
            theme::border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Categories ")
            .border_style(border)
            .style(theme::base_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return SmallVec::new();
        }

        if categories.is_loading() {
            Self::render_skeletons(frame, tick, inner);
            return SmallVec::new();
        }

        let mut placed = SmallVec::new();
        let right = inner.x + inner.width;
        let mut x = inner.x;

        for (index, label) in categories.chips().enumerate() {
            let text = format!(" {label} ");
            let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
            if x + width > right {
                break;
            }

            let mut style = if categories.is_active(index) {
                theme::chip_active_style()
            } else {
                theme::chip_style()
            };
            if focused && categories.cursor() == index {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
            }

            let rect = Rect::new(x, inner.y, width, 1);
            frame.render_widget(Span::styled(text, style), rect);
            placed.push((index, rect));
            x += width + CHIP_GAP;
        }

        placed
    }

    fn render_skeletons(frame: &mut Frame<'_>, tick: u64, inner: Rect) {
        let glyph = if tick % 2 == 0 { "░" } else { "▒" };
        let mut x = inner.x;
        for _ in 0..SKELETON_COUNT {
            if x + SKELETON_WIDTH > inner.x + inner.width {
                break;
            }
            let rect = Rect::new(x, inner.y, SKELETON_WIDTH, 1);
            frame.render_widget(
                Span::styled(glyph.repeat(usize::from(SKELETON_WIDTH)), theme::skeleton_style()),
                rect,
            );
            x += SKELETON_WIDTH + CHIP_GAP;
        }
    }
}
