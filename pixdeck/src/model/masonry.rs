//! src/model/masonry.rs
//! ============================================================================
//! # Masonry: shortest-column card placement
//!
//! Each card spans a number of 10 px grid rows derived from its aspect ratio
//! in a 300 px column. In the terminal four grid rows make one line, and
//! cards are dropped in order into whichever column is currently shortest.

use stockr::ImageRecord;

/// Nominal column width the row span is computed against, in pixels
pub const COLUMN_WIDTH_PX: f64 = 300.0;
/// Height of one grid row, in pixels
pub const ROW_UNIT_PX: f64 = 10.0;
/// Grid rows folded into one terminal line
pub const GRID_ROWS_PER_LINE: u32 = 4;
/// Smallest card that still fits a border plus one line of text
pub const MIN_CARD_LINES: u16 = 3;

/// Number of grid rows a card of the given dimensions spans:
/// `ceil(300 / (10 * aspect) + 2)`.
///
/// Degenerate dimensions are treated as a square image. Evaluated in integers
/// as `ceil(30 * height / width) + 2` so exact ratios never round up.
pub fn row_span(width: u32, height: u32) -> u32 {
    let (width, height) = if width == 0 || height == 0 {
        (1, 1)
    } else {
        (u64::from(width), u64::from(height))
    };

    let rows_per_column = (COLUMN_WIDTH_PX / ROW_UNIT_PX) as u64;
    let span = (rows_per_column * height).div_ceil(width) + 2;
    u32::try_from(span).unwrap_or(u32::MAX)
}

/// Terminal lines a card occupies for a given row span
pub fn card_lines(span: u32) -> u16 {
    let lines = span.div_ceil(GRID_ROWS_PER_LINE);
    u16::try_from(lines).unwrap_or(u16::MAX).max(MIN_CARD_LINES)
}

/// Column count for an area, never below one
pub fn column_count(area_width: u16, min_card_width: u16) -> u16 {
    (area_width / min_card_width.max(1)).max(1)
}

/// Where one card sits, in content coordinates (lines from the top)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    pub index: usize,
    pub column: u16,
    pub top: u32,
    pub height: u16,
}

impl CardSlot {
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.top + u32::from(self.height)
    }
}

/// Vertical neighbour lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasonryLayout {
    pub columns: u16,
    pub column_width: u16,
    /// `slots[i]` belongs to record `i`
    pub slots: Vec<CardSlot>,
    pub content_height: u32,
}

impl MasonryLayout {
    pub fn compute(records: &[ImageRecord], area_width: u16, min_card_width: u16) -> Self {
        let columns = column_count(area_width, min_card_width);
        let column_width = (area_width / columns).max(1);
        let mut heights = vec![0u32; usize::from(columns)];
        let mut slots = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            // Leftmost wins ties
            let (column, top) = heights
                .iter()
                .copied()
                .enumerate()
                .min_by_key(|&(col, h)| (h, col))
                .unwrap_or((0, 0));

            let height = card_lines(row_span(record.width, record.height));
            heights[column] = top + u32::from(height);

            slots.push(CardSlot {
                index,
                column: column as u16,
                top,
                height,
            });
        }

        Self {
            columns,
            column_width,
            slots,
            content_height: heights.into_iter().max().unwrap_or(0),
        }
    }

    pub fn slot(&self, index: usize) -> Option<&CardSlot> {
        self.slots.get(index)
    }

    /// Slots intersecting `[offset, offset + viewport)`
    pub fn visible(&self, offset: u32, viewport: u16) -> impl Iterator<Item = &CardSlot> {
        let end = offset + u32::from(viewport);
        self.slots
            .iter()
            .filter(move |slot| slot.bottom() > offset && slot.top < end)
    }

    /// Card in the same column directly above or below `index`
    pub fn neighbor(&self, index: usize, direction: Vertical) -> Option<usize> {
        let current = self.slot(index)?;
        let same_column = self.slots.iter().filter(|s| s.column == current.column);

        match direction {
            Vertical::Up => same_column
                .filter(|s| s.top < current.top)
                .max_by_key(|s| s.top)
                .map(|s| s.index),
            Vertical::Down => same_column
                .filter(|s| s.top > current.top)
                .min_by_key(|s| s.top)
                .map(|s| s.index),
        }
    }

    /// Card under a point given relative to the grid's content origin
    pub fn hit_test(&self, x: u16, line: u32) -> Option<usize> {
        let column = x / self.column_width.max(1);
        if column >= self.columns {
            return None;
        }

        self.slots
            .iter()
            .find(|s| s.column == column && s.top <= line && line < s.bottom())
            .map(|s| s.index)
    }
}
