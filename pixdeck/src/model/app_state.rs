//! src/model/app_state.rs
//! ============================================================================
//! # AppState: page composition
//!
//! Holds the committed query and wires the sub-states together: the search
//! input and the category bar both commit queries, the grid resets whenever
//! the committed query changes, and opening a card fills the modal.

use stockr::ImageRecord;
use tracing::info;

use crate::config::Config;
use crate::model::{
    category_state::CategoryState,
    grid_state::{GridState, PageRequest},
    modal_state::ModalState,
    search_state::SearchState,
    ui_state::{Focus, UIState},
};

#[derive(Debug)]
pub struct AppState {
    committed_query: String,
    pub search: SearchState,
    pub categories: CategoryState,
    pub grid: GridState,
    pub modal: ModalState,
    pub ui: UIState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let grid = GridState::new(
            config.provider.page_size,
            config.grid.min_card_width,
            config.grid.load_more_threshold,
        );
        let modal = ModalState::new(grid.scroll_lock());

        Self {
            committed_query: String::new(),
            search: SearchState::default(),
            categories: CategoryState::default(),
            grid,
            modal,
            ui: UIState::new(),
        }
    }

    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    /// Reset the grid when the query differs from the committed one
    fn commit(&mut self, query: String) -> Option<PageRequest> {
        let first_load = self.grid.generation() == 0;
        if !first_load && query == self.committed_query {
            return None;
        }

        info!("Committed query {:?}", query);
        self.committed_query = query;
        self.ui.request_redraw();
        Some(self.grid.reset(self.committed_query.clone()))
    }

    /// First load: the unfiltered listing
    pub fn start(&mut self) -> Option<PageRequest> {
        self.commit(String::new())
    }

    /// Free-text search (submit or suggestion pick). Surrounding whitespace is
    /// not part of the query, so blank text means the unfiltered listing.
    pub fn commit_search(&mut self, text: String) -> Option<PageRequest> {
        self.categories.clear_selection();
        self.ui.set_focus(Focus::Grid);
        self.commit(text.trim().to_string())
    }

    /// Category chip `index` (0 is "All")
    pub fn select_category(&mut self, index: usize) -> Option<PageRequest> {
        let query = self.categories.pick(index)?;
        self.commit(query)
    }

    /// Re-run the committed query from page 1
    pub fn reload(&mut self) -> PageRequest {
        self.ui.request_redraw();
        self.grid.reset(self.committed_query.clone())
    }

    pub fn open_image(&mut self, index: usize) -> bool {
        let Some(record) = self.grid.records().get(index).cloned() else {
            return false;
        };
        self.grid.select(index);
        self.show_modal(record);
        true
    }

    pub fn open_selected(&mut self) -> bool {
        match self.grid.selected() {
            Some(index) => self.open_image(index),
            None => false,
        }
    }

    fn show_modal(&mut self, record: ImageRecord) {
        self.modal.open(record);
        self.ui.request_redraw();
    }

    pub fn close_modal(&mut self) -> bool {
        let closed = self.modal.close();
        if closed {
            self.ui.request_redraw();
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grid_state::PageOutcome;
    use crate::model::test_support::records;

    fn started() -> AppState {
        let mut app = AppState::default();
        app.grid.set_viewport(56, 20);
        app.categories.apply_loaded(Ok(stockr::categories()));
        let req = app.commit_search(String::new()).unwrap();
        app.grid.apply(req.generation, PageOutcome::Loaded(records("home", 12)));
        app
    }

    #[test]
    fn startup_issues_the_listing() {
        let mut app = AppState::default();
        let req = app.start().unwrap();
        assert_eq!(req.query, "");
        assert_eq!(req.page, 1);
    }

    #[test]
    fn same_query_does_not_refetch() {
        let mut app = started();
        assert!(app.commit_search(String::new()).is_none());
        assert!(app.commit_search("cats".into()).is_some());
        assert!(app.commit_search("cats".into()).is_none());
    }

    #[test]
    fn blank_and_padded_text_commit_trimmed() {
        let mut app = started();
        assert!(app.commit_search("   ".into()).is_none());
        assert_eq!(app.committed_query(), "");

        let req = app.commit_search("  cats ".into()).unwrap();
        assert_eq!(req.query, "cats");
        assert_eq!(app.committed_query(), "cats");
        assert!(app.commit_search("cats".into()).is_none());

        // "All" returns to the listing exactly once
        assert!(app.select_category(0).is_some());
        assert!(app.commit_search(" ".into()).is_none());
    }

    #[test]
    fn category_commits_label_and_search_clears_it() {
        let mut app = started();
        let food = app.categories.chips().position(|c| c == "Food").unwrap();

        let req = app.select_category(food).unwrap();
        assert_eq!(req.query, "Food");
        assert_eq!(app.committed_query(), "Food");
        assert_eq!(app.categories.selected(), Some("Food"));

        app.commit_search("mountains".into());
        assert_eq!(app.categories.selected(), None);
    }

    #[test]
    fn reload_always_resets() {
        let mut app = started();
        let before = app.grid.generation();
        let req = app.reload();
        assert_eq!(req.page, 1);
        assert_eq!(req.generation, before + 1);
    }

    #[test]
    fn modal_locks_grid_scrolling() {
        let mut app = started();

        assert!(app.open_image(3));
        assert_eq!(app.modal.image().map(|r| r.id.as_str()), Some("home-3"));
        assert!(app.grid.is_scroll_locked());
        assert!(!app.grid.scroll_by(3));

        assert!(app.close_modal());
        assert!(!app.grid.is_scroll_locked());
        assert!(!app.open_image(99));
    }
}
