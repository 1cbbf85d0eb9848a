//! src/model/grid_state.rs
//! ============================================================================
//! # GridState: paginated result list behind the image grid
//!
//! Owns the records for the committed query, the page cursor, and the
//! viewport over the masonry layout. It never performs I/O: `reset` and
//! `request_next_page` hand back a [`PageRequest`] that the dispatcher runs,
//! and the result comes back through [`GridState::apply`].
//!
//! Every reset bumps a generation counter. A response tagged with an older
//! generation belongs to a superseded query and is dropped unseen.

use stockr::ImageRecord;
use tracing::{debug, info, warn};

use crate::model::masonry::{MasonryLayout, Vertical};
use crate::model::modal_state::ScrollLock;

/// Everything a background task needs to fetch one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub query: String,
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    #[inline]
    pub fn is_reset(&self) -> bool {
        self.page == 1
    }
}

/// Result of one page fetch as reported by the task
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Loaded(Vec<ImageRecord>),
    Failed(String),
}

/// What `apply` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageApplied {
    /// Page 1 for a new query replaced the list
    Replaced(usize),
    /// A later page was appended
    Appended(usize),
    /// Zero records: nothing further to load
    Exhausted,
    /// The fetch failed; the list is untouched
    Failed,
    /// Superseded by a newer query
    Stale,
}

#[derive(Debug, Clone)]
pub struct GridState {
    query: String,
    records: Vec<ImageRecord>,
    page: u32,
    has_more: bool,
    loading: bool,
    generation: u64,
    in_flight: Option<u32>,
    last_error: Option<String>,
    page_size: u32,

    layout: MasonryLayout,
    area_width: u16,
    viewport_height: u16,
    scroll: u32,
    selected: Option<usize>,
    min_card_width: u16,
    load_more_threshold: u16,
    scroll_lock: ScrollLock,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(12, 28, 3)
    }
}

impl GridState {
    pub fn new(page_size: u32, min_card_width: u16, load_more_threshold: u16) -> Self {
        Self {
            query: String::new(),
            records: Vec::new(),
            page: 1,
            has_more: true,
            loading: false,
            generation: 0,
            in_flight: None,
            last_error: None,
            page_size: page_size.max(1),
            layout: MasonryLayout::default(),
            area_width: 0,
            viewport_height: 0,
            scroll: 0,
            selected: None,
            min_card_width,
            load_more_threshold,
            scroll_lock: ScrollLock::default(),
        }
    }

    /* --------------------------- accessors --------------------------- */

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn layout(&self) -> &MasonryLayout {
        &self.layout
    }

    pub fn scroll(&self) -> u32 {
        self.scroll
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&ImageRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.records.is_empty()
    }

    pub fn is_end_of_results(&self) -> bool {
        !self.loading && !self.has_more && !self.records.is_empty()
    }

    /* --------------------------- pagination -------------------------- */

    /// Start over for a new committed query. Always yields page 1.
    pub fn reset(&mut self, query: impl Into<String>) -> PageRequest {
        self.query = query.into();
        self.generation += 1;
        self.records.clear();
        self.page = 1;
        self.has_more = true;
        self.loading = true;
        self.in_flight = Some(1);
        self.last_error = None;
        self.scroll = 0;
        self.selected = None;
        self.relayout();

        info!(
            "Grid reset for query {:?} (generation {})",
            self.query, self.generation
        );

        PageRequest {
            generation: self.generation,
            query: self.query.clone(),
            page: 1,
            per_page: self.page_size,
        }
    }

    /// Next page at the cursor, unless one is in flight or results ran out.
    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        if self.loading || !self.has_more {
            debug!(
                "Next page suppressed (loading={}, has_more={})",
                self.loading, self.has_more
            );
            return None;
        }

        self.loading = true;
        self.in_flight = Some(self.page);
        debug!("Requesting page {} for {:?}", self.page, self.query);

        Some(PageRequest {
            generation: self.generation,
            query: self.query.clone(),
            page: self.page,
            per_page: self.page_size,
        })
    }

    /// Fold a finished fetch into the list.
    pub fn apply(&mut self, generation: u64, outcome: PageOutcome) -> PageApplied {
        if generation != self.generation {
            debug!(
                "Dropping stale page (generation {} != {})",
                generation, self.generation
            );
            return PageApplied::Stale;
        }

        let page = self.in_flight.take().unwrap_or(self.page);
        self.loading = false;

        match outcome {
            PageOutcome::Failed(reason) => {
                warn!("Page {} for {:?} failed: {}", page, self.query, reason);
                self.last_error = Some(reason);
                PageApplied::Failed
            }
            PageOutcome::Loaded(batch) => {
                self.last_error = None;
                let count = batch.len();
                self.has_more = count > 0;

                let applied = if page == 1 {
                    self.records = batch;
                    self.page = 2;
                    PageApplied::Replaced(count)
                } else {
                    self.records.extend(batch);
                    self.page += 1;
                    PageApplied::Appended(count)
                };

                self.relayout();
                if self.selected.is_none() && !self.records.is_empty() {
                    self.selected = Some(0);
                }

                if count == 0 {
                    info!("No more results for {:?}", self.query);
                    PageApplied::Exhausted
                } else {
                    applied
                }
            }
        }
    }

    /// Bottom of the viewport within `threshold` lines of the content end
    pub fn near_end(&self) -> bool {
        let bottom = self.scroll + u32::from(self.viewport_height);
        let trigger = self
            .layout
            .content_height
            .saturating_sub(u32::from(self.load_more_threshold));
        bottom >= trigger
    }

    /// Page request if the viewport reached the end of the content
    pub fn check_near_end(&mut self) -> Option<PageRequest> {
        if self.near_end() {
            self.request_next_page()
        } else {
            None
        }
    }

    /* ---------------------------- viewport --------------------------- */

    /// Grid area changed; re-flow the cards
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        if self.area_width == width && self.viewport_height == height {
            return;
        }
        self.area_width = width;
        self.viewport_height = height;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = MasonryLayout::compute(&self.records, self.area_width, self.min_card_width);
        self.clamp_scroll();
    }

    fn max_scroll(&self) -> u32 {
        self.layout
            .content_height
            .saturating_sub(u32::from(self.viewport_height))
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Handle to the flag that freezes scrolling while a modal is up
    pub fn scroll_lock(&self) -> ScrollLock {
        self.scroll_lock.clone()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    /// Scroll by a signed number of lines. Returns whether the offset moved.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        if self.is_scroll_locked() {
            return false;
        }
        let before = self.scroll;
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll());
        self.scroll != before
    }

    pub fn page_down(&mut self) -> bool {
        self.scroll_by(i32::from(self.viewport_height.max(1)))
    }

    pub fn page_up(&mut self) -> bool {
        self.scroll_by(-i32::from(self.viewport_height.max(1)))
    }

    /* --------------------------- selection --------------------------- */

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.records.len() || self.is_scroll_locked() {
            return false;
        }
        self.selected = Some(index);
        self.ensure_selected_visible();
        true
    }

    pub fn select_next(&mut self) -> bool {
        match self.selected {
            Some(i) => self.select(i + 1),
            None => self.select(0),
        }
    }

    pub fn select_prev(&mut self) -> bool {
        match self.selected {
            Some(i) if i > 0 => self.select(i - 1),
            Some(_) => false,
            None => self.select(0),
        }
    }

    pub fn select_vertical(&mut self, direction: Vertical) -> bool {
        let Some(current) = self.selected else {
            return self.select(0);
        };
        match self.layout.neighbor(current, direction) {
            Some(next) => self.select(next),
            // Nothing further down this column: still reveal the content below
            None if direction == Vertical::Down => self.scroll_by(1),
            None => self.scroll_by(-1),
        }
    }

    pub fn select_first(&mut self) -> bool {
        if self.is_scroll_locked() {
            return false;
        }
        self.scroll = 0;
        self.select(0)
    }

    pub fn select_last(&mut self) -> bool {
        match self.records.len() {
            0 => false,
            n => self.select(n - 1),
        }
    }

    fn ensure_selected_visible(&mut self) {
        let Some(slot) = self.selected.and_then(|i| self.layout.slot(i)).copied() else {
            return;
        };
        let viewport = u32::from(self.viewport_height);

        if slot.top < self.scroll {
            self.scroll = slot.top;
        } else if slot.bottom() > self.scroll + viewport {
            // Tall cards align to their top rather than hiding it
            self.scroll = slot.bottom().saturating_sub(viewport).min(slot.top);
        }
        self.clamp_scroll();
    }

    /// Record under a point relative to the grid's top-left corner
    pub fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        self.layout.hit_test(x, self.scroll + u32::from(y))
    }
}
