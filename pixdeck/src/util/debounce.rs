//!  src/util/debounce.rs
//!  ===================================================================
//!  Keyed cancel-and-restart debounce timer
//!
//!  • Every `submit` for a key aborts that key's pending sleeper and
//!    starts a fresh one, so only the last event of a burst fires.
//!  • Fired events come out of an mpsc receiver; the consumer decides
//!    what action they map to.
//!  • Uses `tokio::time` throughout, so tests can run on a paused clock.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
    time::{Instant, sleep_until},
};
use tracing::{debug, trace};

/* ======================== DebounceConfig ============================ */

#[derive(Debug, Clone)]
pub struct DebounceConfig {
    /// Quiet period that must pass after the last event
    pub delay: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::search_input()
    }
}

impl DebounceConfig {
    /// Suggestion lookups: plain trailing debounce, restarted on every keystroke
    #[must_use]
    pub const fn search_input() -> Self {
        Self {
            delay: Duration::from_millis(300),
        }
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/* ============================ Debouncer ============================ */

struct Slot<T> {
    pending: Option<T>,
    sleeper: Option<JoinHandle<()>>,
}

/// Debouncer holds shared, clonable handles to its state.
pub struct Debouncer<T> {
    cfg: DebounceConfig,
    slots: Arc<Mutex<HashMap<String, Slot<T>>>>,
    tx: mpsc::UnboundedSender<(String, T)>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a new debouncer and its Rx endpoint
    #[must_use]
    pub fn new(cfg: DebounceConfig) -> (Self, mpsc::UnboundedReceiver<(String, T)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let deb = Self {
            cfg,
            slots: Arc::new(Mutex::new(HashMap::new())),
            tx,
        };
        (deb, rx)
    }

    /// Submit an event, restarting the key's quiet period
    pub async fn submit(&self, key: impl Into<String>, ev: T) {
        let key = key.into();
        trace!("Debouncer received event for key: {}", key);

        let mut slots = self.slots.lock().await;
        let slot = slots.entry(key.clone()).or_insert_with(|| Slot {
            pending: None,
            sleeper: None,
        });
        slot.pending = Some(ev);

        if let Some(handle) = slot.sleeper.take() {
            handle.abort();
        }

        let deadline = Instant::now() + self.cfg.delay;
        let slots_ptr = Arc::clone(&self.slots);
        let tx = self.tx.clone();

        slot.sleeper = Some(tokio::spawn(async move {
            sleep_until(deadline).await;

            let mut slots = slots_ptr.lock().await;
            if let Some(slot) = slots.get_mut(&key) {
                slot.sleeper = None;
                if let Some(event) = slot.pending.take() {
                    debug!("Triggering trailing edge for key: {}", key);
                    let _ = tx.send((key, event));
                }
            }
        }));
    }

    /// Drop the pending event for a key without firing it
    pub async fn cancel(&self, key: &str) {
        let mut slots = self.slots.lock().await;
        if let Some(mut slot) = slots.remove(key) {
            if let Some(handle) = slot.sleeper.take() {
                handle.abort();
            }
            if slot.pending.is_some() {
                debug!("Cancelled pending debounced event for key: {}", key);
            }
        }
    }
}
