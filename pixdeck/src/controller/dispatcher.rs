//! src/controller/dispatcher.rs
//! ============================================================================
//! # Dispatcher: applies actions to the application state
//!
//! Owns [`AppState`] and every handle needed to act on it: the image source,
//! the task channel, the suggestion debouncer, and the desktop integrations.
//! Network work is always spawned; results come back as
//! [`TaskResult`]s through the event loop.

use std::ops::ControlFlow;
use std::sync::Arc;

use crossterm::event::{MouseButton, MouseEventKind};
use stockr::ImageSource;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::controller::{
    actions::Action,
    event_loop::TaskResult,
    key_handler::{map_key, map_mouse},
    system::{ShareTarget, UrlOpener},
};
use crate::model::{
    app_state::AppState,
    grid_state::{PageApplied, PageRequest},
    masonry::Vertical,
    search_state::{SUGGESTIONS_DEBOUNCE_KEY, SearchEdit},
    ui_state::Focus,
};
use crate::tasks::{catalog_task, page_task::spawn_page_fetch};
use crate::util::debounce::Debouncer;

pub const LOAD_FAILED_TOAST: &str = "Failed to load images. Please try again.";
pub const DOWNLOAD_TOAST: &str = "Download started. Your image will be downloaded shortly.";
pub const LIKE_TOAST: &str = "Image liked. The image has been added to your favorites.";
pub const SHARE_TOAST: &str = "Link copied. Image link copied to clipboard!";

pub struct Dispatcher {
    pub(crate) state: AppState,
    source: Arc<dyn ImageSource>,
    task_tx: mpsc::UnboundedSender<TaskResult>,
    debouncer: Debouncer<String>,
    page_cancel: Option<CancellationToken>,
    share: Box<dyn ShareTarget>,
    opener: Box<dyn UrlOpener>,
}

impl Dispatcher {
    pub fn new(
        state: AppState,
        source: Arc<dyn ImageSource>,
        task_tx: mpsc::UnboundedSender<TaskResult>,
        debouncer: Debouncer<String>,
        share: Box<dyn ShareTarget>,
        opener: Box<dyn UrlOpener>,
    ) -> Self {
        Self {
            state,
            source,
            task_tx,
            debouncer,
            page_cancel: None,
            share,
            opener,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Startup: load categories and list images for the empty query
    pub fn start(&mut self) {
        info!("Loading categories and initial listing");
        catalog_task::spawn_category_load(Arc::clone(&self.source), self.task_tx.clone());
        if let Some(request) = self.state.start() {
            self.run_page(request);
        }
    }

    fn run_page(&mut self, request: PageRequest) {
        if request.is_reset()
            && let Some(previous) = self.page_cancel.take()
        {
            debug!("Cancelling in-flight page request");
            previous.cancel();
        }

        let token = CancellationToken::new();
        self.page_cancel = Some(token.clone());
        spawn_page_fetch(
            Arc::clone(&self.source),
            request,
            token,
            self.task_tx.clone(),
        );
    }

    fn run_optional_page(&mut self, request: Option<PageRequest>) {
        if let Some(request) = request {
            self.run_page(request);
        }
    }

    fn check_near_end(&mut self) {
        let request = self.state.grid.check_near_end();
        self.run_optional_page(request);
    }

    /// Apply one action. `Break` ends the application.
    pub async fn dispatch(&mut self, action: Action) -> ControlFlow<()> {
        match action {
            Action::Key(key) => {
                if let Some(mapped) = map_key(&self.state, key) {
                    return Box::pin(self.dispatch(mapped)).await;
                }
                return ControlFlow::Continue(());
            }
            Action::Mouse(mouse) => {
                let left_down = mouse.kind == MouseEventKind::Down(MouseButton::Left);
                if left_down
                    && self.state.search.panel_visible()
                    && !self
                        .state
                        .ui
                        .regions
                        .in_search_or_panel(mouse.column, mouse.row)
                {
                    self.state.search.dismiss();
                    self.state.ui.request_redraw();
                }
                if let Some(mapped) = map_mouse(&self.state, mouse) {
                    return Box::pin(self.dispatch(mapped)).await;
                }
                return ControlFlow::Continue(());
            }
            Action::Tick => {
                self.on_tick();
                return ControlFlow::Continue(());
            }
            Action::Quit => {
                info!("Quit requested");
                return ControlFlow::Break(());
            }
            Action::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
            }
            Action::TaskResult(result) => self.handle_task_result(result),

            Action::ToggleHelp => self.state.ui.toggle_help(),
            Action::FocusNext => self.move_focus(self.state.ui.focus.next()),
            Action::FocusPrev => self.move_focus(self.state.ui.focus.prev()),
            Action::FocusSearch => self.move_focus(Focus::Search),
            Action::DismissNotification => {
                self.state.ui.dismiss_notification();
            }

            Action::SearchInput(ch) => {
                let edit = self.state.search.insert_char(ch);
                self.after_edit(edit).await;
            }
            Action::SearchBackspace => {
                let edit = self.state.search.backspace();
                self.after_edit(edit).await;
            }
            Action::SearchDelete => {
                let edit = self.state.search.delete();
                self.after_edit(edit).await;
            }
            Action::SearchClearLine => {
                let edit = self.state.search.clear_line();
                self.after_edit(edit).await;
            }
            Action::SearchCursorLeft => self.state.search.move_left(),
            Action::SearchCursorRight => self.state.search.move_right(),
            Action::SearchCursorHome => self.state.search.move_home(),
            Action::SearchCursorEnd => self.state.search.move_end(),
            Action::SearchHighlightNext => self.state.search.highlight_next(),
            Action::SearchHighlightPrev => self.state.search.highlight_prev(),
            Action::SearchDismiss => self.state.search.dismiss(),
            Action::SearchSubmit => {
                let text = self.state.search.submit();
                self.commit_search(text).await;
            }
            Action::PickSuggestion(index) => {
                if let Some(text) = self.state.search.pick(index) {
                    self.commit_search(text).await;
                }
            }
            Action::LookupSuggestions(text) => {
                // Typing moved on after the window closed
                if text == self.state.search.text() {
                    catalog_task::spawn_suggestion_lookup(
                        Arc::clone(&self.source),
                        text,
                        self.task_tx.clone(),
                    );
                }
            }

            Action::CategoryLeft => self.state.categories.move_left(),
            Action::CategoryRight => self.state.categories.move_right(),
            Action::CategoryPickCursor => {
                let cursor = self.state.categories.cursor();
                let request = self.state.select_category(cursor);
                self.run_optional_page(request);
            }
            Action::PickCategory(index) => {
                self.state.ui.set_focus(Focus::Categories);
                let request = self.state.select_category(index);
                self.run_optional_page(request);
            }

            Action::GridLeft => self.grid_move(|grid| grid.select_prev()),
            Action::GridRight => self.grid_move(|grid| grid.select_next()),
            Action::GridUp => self.grid_move(|grid| grid.select_vertical(Vertical::Up)),
            Action::GridDown => self.grid_move(|grid| grid.select_vertical(Vertical::Down)),
            Action::GridPageUp => self.grid_move(|grid| grid.page_up()),
            Action::GridPageDown => self.grid_move(|grid| grid.page_down()),
            Action::GridHome => self.grid_move(|grid| grid.select_first()),
            Action::GridEnd => self.grid_move(|grid| grid.select_last()),
            Action::ScrollLines(lines) => self.grid_move(|grid| grid.scroll_by(lines)),
            Action::LoadMore => {
                let request = self.state.grid.request_next_page();
                self.run_optional_page(request);
            }
            Action::Reload => {
                let request = self.state.reload();
                self.run_page(request);
            }
            Action::OpenSelected => {
                self.state.open_selected();
            }
            Action::OpenImage(index) => {
                self.state.ui.set_focus(Focus::Grid);
                self.state.open_image(index);
            }

            Action::CloseModal => {
                self.state.close_modal();
            }
            Action::Download => self.download(),
            Action::Like => {
                if self.state.modal.is_open() {
                    self.state.ui.show_success(LIKE_TOAST);
                }
            }
            Action::Share => self.share(),
        }

        self.state.ui.request_redraw();
        ControlFlow::Continue(())
    }

    fn on_tick(&mut self) {
        self.state.ui.frame = self.state.ui.frame.wrapping_add(1);
        self.state.ui.update_notification();
        if self.state.grid.is_loading() || self.state.categories.is_loading() {
            self.state.ui.request_redraw();
        }
    }

    fn move_focus(&mut self, focus: Focus) {
        if self.state.ui.focus == Focus::Search && focus != Focus::Search {
            self.state.search.dismiss();
        }
        if focus == Focus::Search {
            self.state.search.focus();
        }
        self.state.ui.set_focus(focus);
    }

    fn grid_move(&mut self, step: impl FnOnce(&mut crate::model::grid_state::GridState) -> bool) {
        step(&mut self.state.grid);
        // Even a move that hit an edge counts as reaching for more
        self.check_near_end();
    }

    async fn after_edit(&mut self, edit: SearchEdit) {
        match edit {
            SearchEdit::Lookup(text) => {
                self.debouncer.submit(SUGGESTIONS_DEBOUNCE_KEY, text).await;
            }
            SearchEdit::Cleared => self.debouncer.cancel(SUGGESTIONS_DEBOUNCE_KEY).await,
            SearchEdit::Unchanged => {}
        }
    }

    async fn commit_search(&mut self, text: String) {
        self.debouncer.cancel(SUGGESTIONS_DEBOUNCE_KEY).await;
        let request = self.state.commit_search(text);
        self.run_optional_page(request);
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Page {
                generation,
                page,
                outcome,
            } => match self.state.grid.apply(generation, outcome) {
                PageApplied::Failed => {
                    self.state.ui.show_error(LOAD_FAILED_TOAST);
                }
                PageApplied::Stale => {
                    debug!("Ignored stale page {} (generation {})", page, generation);
                }
                applied => debug!("Page {} applied: {:?}", page, applied),
            },
            TaskResult::Categories(result) => self.state.categories.apply_loaded(result),
            TaskResult::Suggestions { query, suggestions } => {
                self.state.search.apply_suggestions(&query, suggestions);
            }
        }
    }

    fn download(&mut self) {
        let Some(url) = self.state.modal.image().map(|image| image.urls.full.clone()) else {
            return;
        };

        self.state.ui.show_info(DOWNLOAD_TOAST);
        if let Err(e) = self.opener.open(&url) {
            warn!("Download failed: {}", e);
            self.state.ui.show_error(e.user_message());
        }
    }

    fn share(&mut self) {
        let Some(payload) = self.state.modal.share_payload() else {
            return;
        };

        match self.share.share(&payload) {
            Ok(()) => self.state.ui.show_success(SHARE_TOAST),
            Err(e) => {
                info!("Share target unavailable ({}), showing link instead", e);
                self.state
                    .ui
                    .show_warning(format!("Sharing is unavailable here. Image link: {}", payload.url));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::system::fakes::{RecordingOpener, RecordingShare};
    use crate::model::test_support::{FakeSource, records};
    use crate::util::debounce::DebounceConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
    use ratatui::layout::Rect;
    use std::time::Duration;
    use stockr::ProviderError;
    use tokio::time::timeout;

    struct Harness {
        dispatcher: Dispatcher,
        task_rx: mpsc::UnboundedReceiver<TaskResult>,
        debounce_rx: mpsc::UnboundedReceiver<(String, String)>,
        source: Arc<FakeSource>,
        share: RecordingShare,
        opener: RecordingOpener,
    }

    impl Harness {
        fn new(source: FakeSource) -> Self {
            Self::with_integrations(source, RecordingShare::default(), RecordingOpener::default())
        }

        fn with_integrations(
            source: FakeSource,
            share: RecordingShare,
            opener: RecordingOpener,
        ) -> Self {
            let source = Arc::new(source);
            let (task_tx, task_rx) = mpsc::unbounded_channel();
            let (debouncer, debounce_rx) =
                Debouncer::new(DebounceConfig::search_input().with_delay(Duration::from_millis(20)));

            let mut state = AppState::default();
            state.grid.set_viewport(56, 20);

            let dispatcher = Dispatcher::new(
                state,
                source.clone(),
                task_tx,
                debouncer,
                Box::new(share.clone()),
                Box::new(opener.clone()),
            );

            Self {
                dispatcher,
                task_rx,
                debounce_rx,
                source,
                share,
                opener,
            }
        }

        /// Feed task results back until nothing arrives for a while
        async fn settle(&mut self) {
            while let Ok(Some(result)) =
                timeout(Duration::from_millis(200), self.task_rx.recv()).await
            {
                self.dispatcher.dispatch(Action::TaskResult(result)).await;
            }
        }

        async fn started(source: FakeSource) -> Self {
            let mut harness = Self::new(source);
            harness.dispatcher.start();
            harness.settle().await;
            harness
        }

        async fn key(&mut self, code: KeyCode) -> ControlFlow<()> {
            self.dispatcher
                .dispatch(Action::Key(KeyEvent::new(code, KeyModifiers::NONE)))
                .await
        }

        fn state(&self) -> &AppState {
            self.dispatcher.state()
        }
    }

    #[tokio::test]
    async fn scenario_listing_on_startup() {
        let h = Harness::started(FakeSource::default().page("", Ok(records("home", 12)))).await;

        assert_eq!(h.source.calls(), vec![(String::new(), 1)]);
        assert_eq!(h.state().grid.records().len(), 12);
        assert_eq!(h.state().grid.page(), 2);
        assert!(h.state().grid.has_more());
        assert!(!h.state().categories.is_loading());
        assert_eq!(h.state().categories.categories().len(), 8);
    }

    #[tokio::test]
    async fn scenario_empty_search_stops_pagination() {
        let mut h = Harness::started(
            FakeSource::default()
                .page("", Ok(records("home", 12)))
                .page("mountains", Ok(Vec::new())),
        )
        .await;

        for ch in "mountains".chars() {
            h.dispatcher.dispatch(Action::SearchInput(ch)).await;
        }
        h.dispatcher.dispatch(Action::SearchSubmit).await;
        h.settle().await;

        assert_eq!(h.source.calls().last(), Some(&("mountains".to_string(), 1)));
        assert!(h.state().grid.is_empty_result());
        assert!(!h.state().grid.has_more());

        let calls = h.source.calls().len();
        h.dispatcher.dispatch(Action::ScrollLines(3)).await;
        h.dispatcher.dispatch(Action::LoadMore).await;
        h.settle().await;
        assert_eq!(h.source.calls().len(), calls);
    }

    #[tokio::test]
    async fn scenario_category_commits_query() {
        let mut h = Harness::started(
            FakeSource::default()
                .page("", Ok(records("home", 12)))
                .page("Food", Ok(records("food", 6))),
        )
        .await;
        let food = h.state().categories.chips().position(|c| c == "Food").unwrap();

        h.dispatcher.dispatch(Action::PickCategory(food)).await;
        assert!(h.state().grid.is_loading());
        assert!(h.state().grid.records().is_empty());
        h.settle().await;

        assert_eq!(h.state().committed_query(), "Food");
        assert!(h.state().categories.is_active(food));
        assert_eq!(h.source.calls().last(), Some(&("Food".to_string(), 1)));
        assert_eq!(h.state().grid.records().len(), 6);
    }

    #[tokio::test]
    async fn scenario_modal_open_and_close() {
        let mut h = Harness::started(FakeSource::default().page("", Ok(records("home", 12)))).await;

        h.dispatcher.dispatch(Action::OpenImage(2)).await;
        let image = h.state().modal.image().unwrap();
        assert_eq!(image.urls.regular, "https://images.example/home-2?regular");
        assert_eq!(image.user.name, "Dorothea Lange");
        assert!(h.state().grid.is_scroll_locked());

        h.key(KeyCode::Esc).await;
        assert!(!h.state().modal.is_open());
        assert!(!h.state().grid.is_scroll_locked());

        // backdrop click
        h.dispatcher.dispatch(Action::OpenImage(0)).await;
        h.dispatcher.state_mut().ui.regions.modal = Some(Rect::new(10, 5, 40, 20));
        h.dispatcher
            .dispatch(Action::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 1,
                row: 1,
                modifiers: KeyModifiers::NONE,
            }))
            .await;
        assert!(!h.state().modal.is_open());
        assert!(!h.state().grid.is_scroll_locked());
    }

    #[tokio::test]
    async fn click_outside_search_hides_suggestions_and_keeps_text() {
        let mut h = Harness::started(FakeSource::default().page("", Ok(records("home", 12)))).await;
        let calls = h.source.calls().len();

        {
            let state = h.dispatcher.state_mut();
            state.ui.focus = Focus::Search;
            state.search.insert_char('p');
            state.search.apply_suggestions("p", stockr::suggest("p"));
            state.ui.regions.search = Rect::new(0, 1, 100, 3);
            state.ui.regions.suggestions = Some(Rect::new(0, 4, 100, 5));
        }
        assert!(h.state().search.panel_visible());

        h.dispatcher
            .dispatch(Action::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 5,
                row: 25,
                modifiers: KeyModifiers::NONE,
            }))
            .await;

        assert!(!h.state().search.panel_visible());
        assert_eq!(h.state().search.text(), "p");
        assert_eq!(h.state().committed_query(), "");
        assert_eq!(h.source.calls().len(), calls);
    }

    #[tokio::test]
    async fn pagination_appends_on_load_more() {
        let mut h = Harness::started(
            FakeSource::default()
                .page("", Ok(records("p1", 12)))
                .page("", Ok(records("p2", 5))),
        )
        .await;

        h.key(KeyCode::Char('m')).await;
        h.key(KeyCode::Char('m')).await;
        h.settle().await;

        assert_eq!(h.source.calls(), vec![(String::new(), 1), (String::new(), 2)]);
        assert_eq!(h.state().grid.records().len(), 17);
        assert_eq!(h.state().grid.page(), 3);
        assert!(h.state().grid.has_more());
    }

    #[tokio::test]
    async fn scrolling_to_the_end_requests_the_next_page() {
        let mut h = Harness::started(FakeSource::default().page("", Ok(records("p1", 12)))).await;

        h.dispatcher.dispatch(Action::ScrollLines(3)).await;
        assert!(!h.state().grid.is_loading());

        h.key(KeyCode::End).await;
        assert!(h.state().grid.is_loading());
        h.settle().await;
        assert_eq!(h.source.calls().last(), Some(&(String::new(), 2)));
    }

    #[tokio::test]
    async fn failed_page_keeps_list_and_raises_toast() {
        let mut h = Harness::started(
            FakeSource::default()
                .page("", Ok(records("p1", 12)))
                .page("", Err(ProviderError::MissingAccessKey)),
        )
        .await;

        h.dispatcher.dispatch(Action::LoadMore).await;
        h.settle().await;

        let grid = &h.state().grid;
        assert_eq!(grid.records().len(), 12);
        assert_eq!(grid.page(), 2);
        assert!(grid.has_more());
        assert!(!grid.is_loading());
        let toast = h.state().ui.notification.as_ref().unwrap();
        assert_eq!(toast.message, LOAD_FAILED_TOAST);
    }

    #[tokio::test]
    async fn superseded_query_never_lands() {
        let mut h = Harness::new(
            FakeSource::default()
                .page("", Ok(records("home", 12)))
                .page("cats", Ok(records("cat", 3))),
        );
        h.dispatcher.start();
        // the listing is still loading when the user searches for cats
        for ch in "cats".chars() {
            h.dispatcher.dispatch(Action::SearchInput(ch)).await;
        }
        h.dispatcher.dispatch(Action::SearchSubmit).await;
        h.settle().await;

        let ids: Vec<_> = h.state().grid.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["cat-0", "cat-1", "cat-2"]);
        assert_eq!(h.state().grid.page(), 2);
    }

    #[tokio::test]
    async fn debounced_typing_shows_suggestions() {
        let mut h = Harness::started(FakeSource::default()).await;
        h.key(KeyCode::Char('/')).await;
        assert_eq!(h.state().ui.focus, Focus::Search);

        for code in [KeyCode::Char('c'), KeyCode::Char('i'), KeyCode::Char('t')] {
            h.key(code).await;
        }

        let (_, text) = h.debounce_rx.recv().await.unwrap();
        assert_eq!(text, "cit");
        h.dispatcher.dispatch(Action::LookupSuggestions(text)).await;
        h.settle().await;

        assert!(h.state().search.panel_visible());
        assert_eq!(h.state().search.suggestions()[0], "city skyline");

        h.key(KeyCode::Down).await;
        h.key(KeyCode::Enter).await;
        h.settle().await;
        assert_eq!(h.state().committed_query(), "city skyline");
        assert!(!h.state().search.panel_visible());
        assert_eq!(h.source.calls().last(), Some(&("city skyline".to_string(), 1)));
    }

    #[tokio::test]
    async fn outdated_lookup_is_skipped() {
        let mut h = Harness::started(FakeSource::default()).await;
        h.key(KeyCode::Char('/')).await;
        h.key(KeyCode::Char('n')).await;
        h.key(KeyCode::Char('a')).await;

        h.dispatcher
            .dispatch(Action::LookupSuggestions("n".to_string()))
            .await;
        h.settle().await;
        assert!(!h.state().search.panel_visible());
    }

    #[tokio::test]
    async fn modal_actions_raise_toasts_and_use_integrations() {
        let mut h = Harness::started(FakeSource::default().page("", Ok(records("home", 12)))).await;
        h.dispatcher.dispatch(Action::OpenImage(1)).await;

        h.key(KeyCode::Char('d')).await;
        assert_eq!(
            *h.opener.opened.lock().unwrap(),
            vec!["https://images.example/home-1?full".to_string()]
        );
        assert!(h.state().ui.notification.as_ref().unwrap().message.starts_with("Download started"));

        h.key(KeyCode::Char('l')).await;
        assert!(h.state().ui.notification.as_ref().unwrap().message.starts_with("Image liked"));

        h.key(KeyCode::Char('s')).await;
        let shared = h.share.shared.lock().unwrap().clone();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].url, "https://unsplash.com/photos/home-1");
        assert!(h.state().ui.notification.as_ref().unwrap().message.starts_with("Link copied"));
    }

    #[tokio::test]
    async fn share_without_clipboard_falls_back_to_link() {
        let share = RecordingShare {
            unavailable: true,
            ..RecordingShare::default()
        };
        let opener = RecordingOpener {
            fail: true,
            ..RecordingOpener::default()
        };
        let mut h = Harness::with_integrations(
            FakeSource::default().page("", Ok(records("home", 12))),
            share,
            opener,
        );
        h.dispatcher.start();
        h.settle().await;
        h.dispatcher.dispatch(Action::OpenImage(0)).await;

        h.dispatcher.dispatch(Action::Share).await;
        let toast = h.state().ui.notification.clone().unwrap();
        assert!(toast.message.contains("https://unsplash.com/photos/home-0"));

        h.dispatcher.dispatch(Action::Download).await;
        let toast = h.state().ui.notification.clone().unwrap();
        assert!(toast.message.contains("no handler"));
    }

    #[tokio::test]
    async fn quit_breaks_the_loop() {
        let mut h = Harness::new(FakeSource::default());
        assert!(h.key(KeyCode::Char('q')).await.is_break());
        assert!(h.dispatcher.dispatch(Action::Tick).await.is_continue());
    }
}
