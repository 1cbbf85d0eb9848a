//! src/model/category_state.rs
//! ============================================================================
//! # CategoryState: chip bar with an "All" pseudo-category
//!
//! Chip 0 is always "All". Picking it commits the empty query and clears the
//! selection; any other chip commits its own label.

use tracing::{info, warn};

pub const ALL_LABEL: &str = "All";
/// Placeholder chips drawn while the category list is pending
pub const SKELETON_COUNT: usize = 6;

#[derive(Debug, Clone)]
pub struct CategoryState {
    categories: Vec<String>,
    loading: bool,
    selected: Option<String>,
    /// Keyboard highlight over `All + categories`
    cursor: usize,
}

impl Default for CategoryState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            loading: true,
            selected: None,
            cursor: 0,
        }
    }
}

impl CategoryState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Chip labels in display order, "All" first
    pub fn chips(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL_LABEL).chain(self.categories.iter().map(String::as_str))
    }

    pub fn chip_count(&self) -> usize {
        self.categories.len() + 1
    }

    /// Whether chip `index` renders as the active one
    pub fn is_active(&self, index: usize) -> bool {
        match (index, self.selected.as_deref()) {
            (0, None) => true,
            (0, Some(_)) => false,
            (i, Some(sel)) => self.categories.get(i - 1).is_some_and(|c| c == sel),
            (_, None) => false,
        }
    }

    pub fn apply_loaded(&mut self, result: Result<Vec<String>, String>) {
        self.loading = false;
        match result {
            Ok(categories) => {
                info!("Loaded {} categories", categories.len());
                self.categories = categories;
            }
            Err(reason) => {
                warn!("Error fetching categories: {}", reason);
                self.categories.clear();
            }
        }
        self.cursor = self.cursor.min(self.chip_count() - 1);
    }

    /// Commit chip `index`; returns the query it stands for
    pub fn pick(&mut self, index: usize) -> Option<String> {
        if index == 0 {
            self.selected = None;
            self.cursor = 0;
            return Some(String::new());
        }

        let label = self.categories.get(index - 1)?.clone();
        self.selected = Some(label.clone());
        self.cursor = index;
        Some(label)
    }

    pub fn pick_cursor(&mut self) -> Option<String> {
        self.pick(self.cursor)
    }

    /// A free-text search leaves no category active
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chip_count() - 1);
    }
}
