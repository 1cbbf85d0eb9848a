//! UI-only state: focus ring, toasts, help overlay, redraw bookkeeping, and
//! the screen regions recorded by the last render for mouse hit-testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use compact_str::CompactString;
use ratatui::layout::Rect;
use smallvec::SmallVec;

/// Focus ring: Search -> Categories -> Grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    Search,
    Categories,
    #[default]
    Grid,
}

impl Focus {
    pub const fn next(self) -> Self {
        match self {
            Self::Search => Self::Categories,
            Self::Categories => Self::Grid,
            Self::Grid => Self::Search,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Search => Self::Grid,
            Self::Categories => Self::Search,
            Self::Grid => Self::Categories,
        }
    }
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

/// Compact notification with timestamp
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss_ms: Option<u32>,
}

/// Where things landed on screen during the last draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenRegions {
    pub search: Rect,
    pub suggestions: Option<Rect>,
    pub categories: Rect,
    /// Chip index and its rectangle
    pub chips: SmallVec<[(usize, Rect); 12]>,
    pub grid: Rect,
    pub modal: Option<Rect>,
}

impl ScreenRegions {
    pub fn chip_at(&self, x: u16, y: u16) -> Option<usize> {
        self.chips
            .iter()
            .find(|(_, rect)| contains(*rect, x, y))
            .map(|(index, _)| *index)
    }

    /// Suggestion row under a point, if the panel is up
    pub fn suggestion_at(&self, x: u16, y: u16) -> Option<usize> {
        let panel = self.suggestions?;
        // Bordered panel: one line per suggestion inside the frame
        let inner = Rect::new(
            panel.x + 1,
            panel.y + 1,
            panel.width.saturating_sub(2),
            panel.height.saturating_sub(2),
        );
        contains(inner, x, y).then(|| usize::from(y - inner.y))
    }

    pub fn in_search_or_panel(&self, x: u16, y: u16) -> bool {
        contains(self.search, x, y) || self.suggestions.is_some_and(|r| contains(r, x, y))
    }
}

#[inline]
pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

#[derive(Debug)]
pub struct UIState {
    pub focus: Focus,
    pub show_help: bool,
    pub notification: Option<Notification>,
    pub regions: ScreenRegions,
    /// Animation counter advanced on each tick
    pub frame: u64,
    needs_redraw: AtomicBool,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}

impl UIState {
    pub fn new() -> Self {
        Self {
            focus: Focus::default(),
            show_help: false,
            notification: None,
            regions: ScreenRegions::default(),
            frame: 0,
            needs_redraw: AtomicBool::new(true),
        }
    }

    // Whole-screen dirty bit
    #[inline]
    pub fn request_redraw(&self) {
        self.needs_redraw.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn clear_redraw(&self) {
        self.needs_redraw.store(false, Ordering::Relaxed);
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.request_redraw();
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.request_redraw();
    }

    // Notification system with inline helpers
    pub fn show_notification(
        &mut self,
        message: impl Into<CompactString>,
        level: NotificationLevel,
        auto_dismiss_ms: Option<u32>,
    ) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
            auto_dismiss_ms,
        });
        self.request_redraw();
    }

    #[inline]
    pub fn show_info(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Info, Some(3000));
    }

    #[inline]
    pub fn show_success(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Success, Some(2000));
    }

    #[inline]
    pub fn show_warning(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Warning, Some(5000));
    }

    #[inline]
    pub fn show_error(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Error, Some(6000));
    }

    pub fn dismiss_notification(&mut self) -> bool {
        if self.notification.take().is_some() {
            self.request_redraw();
            return true;
        }
        false
    }

    // Auto-dismiss notifications
    pub fn update_notification(&mut self) -> bool {
        if let Some(notification) = &self.notification
            && let Some(auto_dismiss_ms) = notification.auto_dismiss_ms
            && notification.timestamp.elapsed().as_millis() > u128::from(auto_dismiss_ms)
        {
            self.notification = None;
            self.request_redraw();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_ring_cycles_both_ways() {
        let mut focus = Focus::Search;
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Search);
        assert_eq!(Focus::Search.prev(), Focus::Grid);
        assert_eq!(Focus::Grid.next(), Focus::Search);
    }

    #[test]
    fn redraw_request_sets_and_clears() {
        let ui = UIState::new();
        assert!(ui.needs_redraw());
        ui.clear_redraw();
        assert!(!ui.needs_redraw());
        ui.request_redraw();
        assert!(ui.needs_redraw());
    }

    #[test]
    fn notifications_replace_and_dismiss() {
        let mut ui = UIState::new();
        ui.show_info("Image liked");
        ui.show_success("Link copied");

        let toast = ui.notification.as_ref().unwrap();
        assert_eq!(toast.message, "Link copied");
        assert_eq!(toast.level, NotificationLevel::Success);
        assert!(!ui.update_notification());

        assert!(ui.dismiss_notification());
        assert!(!ui.dismiss_notification());
    }

    #[test]
    fn expired_notifications_are_cleared() {
        let mut ui = UIState::new();
        ui.show_notification("gone", NotificationLevel::Info, Some(0));
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(ui.update_notification());
        assert!(ui.notification.is_none());
    }

    #[test]
    fn regions_hit_test() {
        let mut regions = ScreenRegions {
            search: Rect::new(0, 3, 80, 3),
            suggestions: Some(Rect::new(0, 6, 80, 4)),
            ..ScreenRegions::default()
        };
        regions.chips.push((0, Rect::new(0, 10, 5, 1)));
        regions.chips.push((1, Rect::new(6, 10, 8, 1)));

        assert!(regions.in_search_or_panel(10, 4));
        assert!(regions.in_search_or_panel(10, 8));
        assert!(!regions.in_search_or_panel(10, 12));

        assert_eq!(regions.suggestion_at(5, 7), Some(0));
        assert_eq!(regions.suggestion_at(5, 8), Some(1));
        assert_eq!(regions.suggestion_at(5, 9), None);

        assert_eq!(regions.chip_at(7, 10), Some(1));
        assert_eq!(regions.chip_at(5, 10), None);
    }
}
