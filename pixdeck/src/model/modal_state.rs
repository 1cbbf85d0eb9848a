//! src/model/modal_state.rs
//! ============================================================================
//! # ModalState: the image detail overlay
//!
//! The modal is open exactly when it holds a record. Opening it takes the
//! grid's scroll lock; the guard lives inside the modal, so closing it (or
//! dropping the state) releases the lock.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use stockr::ImageRecord;
use tracing::debug;

const UNTITLED: &str = "Untitled image";
const SHARE_FALLBACK_TITLE: &str = "Shared image from PixelOcean";

/// Shared flag that freezes grid scrolling
#[derive(Debug, Clone, Default)]
pub struct ScrollLock(Arc<AtomicBool>);

impl ScrollLock {
    pub fn is_locked(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[must_use = "the lock is released as soon as the guard is dropped"]
    pub fn acquire(&self) -> ScrollLockGuard {
        self.0.store(true, Ordering::Release);
        ScrollLockGuard(Arc::clone(&self.0))
    }
}

#[derive(Debug)]
pub struct ScrollLockGuard(Arc<AtomicBool>);

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// What the share action hands to the share target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_image(image: &ImageRecord) -> Self {
        let title = if image.alt_description.trim().is_empty() {
            SHARE_FALLBACK_TITLE.to_string()
        } else {
            image.alt_description.clone()
        };

        Self {
            title,
            text: format!("Check out this image by {} on PixelOcean", image.user.name),
            url: image.share_link().to_string(),
        }
    }

    /// Single block of text for clipboard-style targets
    pub fn to_clipboard_text(&self) -> String {
        format!("{}\n{}\n{}", self.title, self.text, self.url)
    }
}

#[derive(Debug)]
pub struct ModalState {
    image: Option<ImageRecord>,
    lock: ScrollLock,
    guard: Option<ScrollLockGuard>,
}

impl ModalState {
    pub fn new(lock: ScrollLock) -> Self {
        Self {
            image: None,
            lock,
            guard: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&ImageRecord> {
        self.image.as_ref()
    }

    pub fn open(&mut self, image: ImageRecord) {
        debug!("Opening modal for image {}", image.id);
        self.image = Some(image);
        if self.guard.is_none() {
            self.guard = Some(self.lock.acquire());
        }
    }

    /// Returns whether anything was open
    pub fn close(&mut self) -> bool {
        self.guard = None;
        self.image.take().is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.image.as_ref().map(|image| {
            if image.alt_description.trim().is_empty() {
                UNTITLED
            } else {
                image.alt_description.as_str()
            }
        })
    }

    pub fn share_payload(&self) -> Option<SharePayload> {
        self.image.as_ref().map(SharePayload::for_image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::record;

    #[test]
    fn lock_follows_the_modal() {
        let lock = ScrollLock::default();
        let mut modal = ModalState::new(lock.clone());
        assert!(!lock.is_locked());

        modal.open(record("a", 800, 600));
        assert!(modal.is_open());
        assert!(lock.is_locked());

        assert!(modal.close());
        assert!(!modal.is_open());
        assert!(!lock.is_locked());
        assert!(!modal.close());
    }

    #[test]
    fn dropping_the_modal_releases_the_lock() {
        let lock = ScrollLock::default();
        {
            let mut modal = ModalState::new(lock.clone());
            modal.open(record("a", 800, 600));
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn reopening_swaps_the_image() {
        let lock = ScrollLock::default();
        let mut modal = ModalState::new(lock.clone());
        modal.open(record("a", 800, 600));
        modal.open(record("b", 800, 600));

        assert_eq!(modal.image().map(|i| i.id.as_str()), Some("b"));
        modal.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn share_payload_uses_author_and_page_link() {
        let image = record("xyz", 800, 600);
        let payload = SharePayload::for_image(&image);

        assert_eq!(payload.title, "image xyz");
        assert_eq!(
            payload.text,
            "Check out this image by Dorothea Lange on PixelOcean"
        );
        assert_eq!(payload.url, "https://unsplash.com/photos/xyz");
    }

    #[test]
    fn blank_alt_text_falls_back() {
        let mut image = record("xyz", 800, 600);
        image.alt_description = "  ".into();

        assert_eq!(SharePayload::for_image(&image).title, SHARE_FALLBACK_TITLE);

        let mut modal = ModalState::new(ScrollLock::default());
        modal.open(image);
        assert_eq!(modal.title(), Some(UNTITLED));
    }
}
