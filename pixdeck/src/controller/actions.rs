//! src/controller/actions.rs
//! ============================================================================
//! # Actions: Centralized Application Commands
//!
//! Raw terminal events enter as `Key` / `Mouse` / `Resize`; the key handler
//! maps them onto the semantic variants below, which the dispatcher applies.

use crossterm::event::{KeyEvent, MouseEvent};

use crate::controller::event_loop::TaskResult;

#[derive(Debug, Clone)]
pub enum Action {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// A terminal resize event.
    Resize(u16, u16),
    /// Periodic tick for toasts and the loading animation.
    Tick,
    /// Quit the application.
    Quit,
    /// A result from a background task.
    TaskResult(TaskResult),

    ToggleHelp,
    FocusNext,
    FocusPrev,
    FocusSearch,
    DismissNotification,

    // Search input
    SearchInput(char),
    SearchBackspace,
    SearchDelete,
    SearchClearLine,
    SearchCursorLeft,
    SearchCursorRight,
    SearchCursorHome,
    SearchCursorEnd,
    SearchHighlightNext,
    SearchHighlightPrev,
    SearchSubmit,
    SearchDismiss,
    PickSuggestion(usize),
    /// Debounce window closed for this text
    LookupSuggestions(String),

    // Category bar
    CategoryLeft,
    CategoryRight,
    CategoryPickCursor,
    PickCategory(usize),

    // Grid
    GridLeft,
    GridRight,
    GridUp,
    GridDown,
    GridPageUp,
    GridPageDown,
    GridHome,
    GridEnd,
    /// Mouse wheel, in lines
    ScrollLines(i32),
    LoadMore,
    Reload,
    OpenSelected,
    OpenImage(usize),

    // Modal
    CloseModal,
    Download,
    Like,
    Share,
}
