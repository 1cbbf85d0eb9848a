//! src/controller/key_handler.rs
//! ============================================================================
//! # Key Handler: terminal input to actions
//!
//! Pure mapping from key and mouse events to [`Action`]s given the current
//! state. Overlays take precedence: modal, then help, then the focused pane.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::controller::actions::Action;
use crate::model::app_state::AppState;
use crate::model::ui_state::{Focus, contains};

/// Lines moved per mouse wheel notch
pub const WHEEL_LINES: i32 = 3;

pub fn map_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if state.modal.is_open() {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char('d') => Some(Action::Download),
            KeyCode::Char('l') => Some(Action::Like),
            KeyCode::Char('s') => Some(Action::Share),
            _ => None,
        };
    }

    if state.ui.show_help {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => return Some(Action::FocusNext),
        KeyCode::BackTab => return Some(Action::FocusPrev),
        _ => {}
    }

    match state.ui.focus {
        Focus::Search => map_search_key(state, key),
        Focus::Categories => map_global_key(key).or_else(|| map_category_key(key)),
        Focus::Grid => map_global_key(key).or_else(|| map_grid_key(key)),
    }
}

fn map_global_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('/') => Some(Action::FocusSearch),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('m') => Some(Action::LoadMore),
        KeyCode::Char('x') => Some(Action::DismissNotification),
        _ => None,
    }
}

fn map_search_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => Some(Action::SearchSubmit),
        KeyCode::Esc if state.search.panel_visible() => Some(Action::SearchDismiss),
        KeyCode::Esc => Some(Action::FocusNext),
        KeyCode::Down => Some(Action::SearchHighlightNext),
        KeyCode::Up => Some(Action::SearchHighlightPrev),
        KeyCode::Left => Some(Action::SearchCursorLeft),
        KeyCode::Right => Some(Action::SearchCursorRight),
        KeyCode::Home => Some(Action::SearchCursorHome),
        KeyCode::End => Some(Action::SearchCursorEnd),
        KeyCode::Backspace => Some(Action::SearchBackspace),
        KeyCode::Delete => Some(Action::SearchDelete),
        KeyCode::Char('u') if ctrl => Some(Action::SearchClearLine),
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Action::SearchInput(ch))
        }
        _ => None,
    }
}

fn map_category_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::CategoryLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::CategoryRight),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::CategoryPickCursor),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::FocusNext),
        _ => None,
    }
}

fn map_grid_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::GridLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::GridRight),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::GridUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::GridDown),
        KeyCode::PageUp => Some(Action::GridPageUp),
        KeyCode::PageDown => Some(Action::GridPageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::GridHome),
        KeyCode::End | KeyCode::Char('G') => Some(Action::GridEnd),
        KeyCode::Enter => Some(Action::OpenSelected),
        _ => None,
    }
}

pub fn map_mouse(state: &AppState, mouse: MouseEvent) -> Option<Action> {
    let (x, y) = (mouse.column, mouse.row);
    let regions = &state.ui.regions;

    match mouse.kind {
        MouseEventKind::ScrollDown if !state.modal.is_open() => Some(Action::ScrollLines(WHEEL_LINES)),
        MouseEventKind::ScrollUp if !state.modal.is_open() => Some(Action::ScrollLines(-WHEEL_LINES)),
        MouseEventKind::Down(MouseButton::Left) => {
            if state.modal.is_open() {
                // Backdrop click closes; clicks inside the modal do nothing
                return match regions.modal {
                    Some(rect) if contains(rect, x, y) => None,
                    _ => Some(Action::CloseModal),
                };
            }
            if state.ui.show_help {
                return Some(Action::ToggleHelp);
            }
            if state.search.panel_visible()
                && let Some(index) = regions.suggestion_at(x, y)
            {
                return Some(Action::PickSuggestion(index));
            }
            if contains(regions.search, x, y) {
                return Some(Action::FocusSearch);
            }
            if let Some(chip) = regions.chip_at(x, y) {
                return Some(Action::PickCategory(chip));
            }
            if contains(regions.grid, x, y) {
                return state
                    .grid
                    .hit_test(x - regions.grid.x, y - regions.grid.y)
                    .map(Action::OpenImage);
            }
            None
        }
        _ => None,
    }
}
