//! src/model/search_state.rs
//! ============================================================================
//! # SearchState: search input line and suggestion panel
//!
//! `Idle -> Typing -> SuggestionsShown -> {submit | pick | dismiss} -> Idle`
//!
//! Edits move to `Typing` and ask the caller to schedule a debounced lookup.
//! Lookup results are tagged with the text they were computed for and are
//! ignored when the input has moved on since.

use compact_str::CompactString;
use smallvec::SmallVec;
use tracing::{debug, trace};

pub const SUGGESTIONS_DEBOUNCE_KEY: &str = "suggestions";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Typing,
    SuggestionsShown,
}

/// What an edit asks of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEdit {
    /// Cursor moved or nothing changed
    Unchanged,
    /// Text changed; look up suggestions for it once typing settles
    Lookup(String),
    /// Text is blank; drop any pending lookup
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    text: CompactString,
    /// Cursor position in chars
    cursor: usize,
    phase: SearchPhase,
    suggestions: SmallVec<[CompactString; 10]>,
    suggestions_for: CompactString,
    highlighted: Option<usize>,
}

impl SearchState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn suggestions(&self) -> &[CompactString] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn panel_visible(&self) -> bool {
        self.phase == SearchPhase::SuggestionsShown && !self.suggestions.is_empty()
    }

    /* ----------------------------- editing --------------------------- */

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map_or(self.text.len(), |(b, _)| b)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn edited(&mut self) -> SearchEdit {
        self.highlighted = None;

        if self.text.trim().is_empty() {
            self.suggestions.clear();
            self.suggestions_for.clear();
            self.phase = SearchPhase::Idle;
            SearchEdit::Cleared
        } else {
            self.phase = SearchPhase::Typing;
            SearchEdit::Lookup(self.text.to_string())
        }
    }

    pub fn insert_char(&mut self, ch: char) -> SearchEdit {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        self.edited()
    }

    pub fn backspace(&mut self) -> SearchEdit {
        if self.cursor == 0 {
            return SearchEdit::Unchanged;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        self.edited()
    }

    pub fn delete(&mut self) -> SearchEdit {
        if self.cursor >= self.char_len() {
            return SearchEdit::Unchanged;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        self.edited()
    }

    pub fn clear_line(&mut self) -> SearchEdit {
        if self.text.is_empty() {
            return SearchEdit::Unchanged;
        }
        self.text.clear();
        self.cursor = 0;
        self.edited()
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /* --------------------------- suggestions ------------------------- */

    /// Store lookup results. Returns false when they were for older text.
    pub fn apply_suggestions(&mut self, for_text: &str, results: Vec<String>) -> bool {
        if self.text.as_str() != for_text {
            trace!(
                "Dropping suggestions for {:?}, input is now {:?}",
                for_text, self.text
            );
            return false;
        }

        self.suggestions = results.into_iter().map(CompactString::from).collect();
        self.suggestions_for = CompactString::from(for_text);
        self.highlighted = None;

        // Submitted or dismissed while the lookup ran: keep quiet
        if self.phase == SearchPhase::Typing {
            self.phase = if self.suggestions.is_empty() {
                SearchPhase::Idle
            } else {
                SearchPhase::SuggestionsShown
            };
        }
        debug!(
            "{} suggestion(s) for {:?}",
            self.suggestions.len(),
            self.text
        );
        true
    }

    /// Gaining focus re-opens the panel when its suggestions still fit the text
    pub fn focus(&mut self) {
        if !self.suggestions.is_empty() && self.suggestions_for == self.text {
            self.phase = SearchPhase::SuggestionsShown;
        }
    }

    pub fn highlight_next(&mut self) {
        if !self.panel_visible() {
            return;
        }
        let last = self.suggestions.len() - 1;
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    pub fn highlight_prev(&mut self) {
        if !self.panel_visible() {
            return;
        }
        self.highlighted = match self.highlighted {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    /* ---------------------------- terminals -------------------------- */

    /// Enter: commit the highlighted suggestion if any, else the text
    pub fn submit(&mut self) -> String {
        if let Some(index) = self.highlighted
            && let Some(picked) = self.pick(index)
        {
            return picked;
        }
        self.close_panel();
        self.text.to_string()
    }

    /// Replace the text with a suggestion and commit it
    pub fn pick(&mut self, index: usize) -> Option<String> {
        let suggestion = self.suggestions.get(index)?.clone();
        self.text = suggestion;
        self.cursor = self.char_len();
        self.suggestions_for = self.text.clone();
        self.close_panel();
        Some(self.text.to_string())
    }

    /// Hide the panel, keeping the text
    pub fn dismiss(&mut self) {
        self.close_panel();
    }

    fn close_panel(&mut self) {
        self.phase = SearchPhase::Idle;
        self.highlighted = None;
    }
}
