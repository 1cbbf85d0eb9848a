//! src/controller/event_loop.rs
//! ============================================================================
//! # Event Loop: one stream of actions from every source
//!
//! Merges terminal input, background task results, queued actions (the
//! debounced suggestion lookups arrive here), and a periodic tick into the
//! single sequence of [`Action`]s the dispatcher consumes. State is never
//! touched here.

use std::{io, pin::Pin, time::Duration};

use crossterm::event::{Event as TermEvent, EventStream};
use futures::{Stream, StreamExt};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Interval, MissedTickBehavior},
};
use tracing::{debug, info, trace, warn};

use crate::controller::actions::Action;
use crate::model::grid_state::PageOutcome;

/// Toast expiry and loading animation cadence
pub const TICK_RATE: Duration = Duration::from_millis(250);

type TermEvents = Pin<Box<dyn Stream<Item = io::Result<TermEvent>>>>;

/// Completion messages from background tasks
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// One grid page, tagged with the generation it was requested under
    Page {
        generation: u64,
        page: u32,
        outcome: PageOutcome,
    },

    /// Category list load at startup
    Categories(Result<Vec<String>, String>),

    /// Suggestions for exactly `query`
    Suggestions {
        query: String,
        suggestions: Vec<String>,
    },
}

pub struct EventLoop {
    events: TermEvents,
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    tick: Interval,
}

impl EventLoop {
    /// Event loop reading the real terminal
    pub fn new(
        task_rx: mpsc::UnboundedReceiver<TaskResult>,
        action_rx: mpsc::UnboundedReceiver<Action>,
    ) -> Self {
        Self::with_events(Box::pin(EventStream::new()), task_rx, action_rx)
    }

    pub fn with_events(
        events: TermEvents,
        task_rx: mpsc::UnboundedReceiver<TaskResult>,
        action_rx: mpsc::UnboundedReceiver<Action>,
    ) -> Self {
        info!("Initializing event loop (tick every {:?})", TICK_RATE);
        let mut tick = tokio::time::interval(TICK_RATE);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            events,
            task_rx,
            action_rx,
            tick,
        }
    }

    /// Next action from any source; `None` once terminal input has ended.
    pub async fn next_action(&mut self) -> Option<Action> {
        loop {
            let action = tokio::select! {
                maybe_event = self.events.next() => match maybe_event {
                    Some(Ok(event)) => {
                        trace!("Terminal event received: {:?}", event);
                        Self::map_terminal_event(event)
                    }
                    Some(Err(e)) => {
                        warn!("Terminal event error: {}", e);
                        None
                    }
                    None => {
                        info!("Terminal event stream ended");
                        return None;
                    }
                },

                Some(task_result) = self.task_rx.recv() => {
                    debug!("Task result received: {:?}", task_result);
                    Some(Action::TaskResult(task_result))
                }

                Some(action) = self.action_rx.recv() => {
                    debug!("Queued action received: {:?}", action);
                    Some(action)
                }

                _ = self.tick.tick() => Some(Action::Tick),
            };

            if let Some(action) = action {
                return Some(action);
            }
        }
    }

    fn map_terminal_event(event: TermEvent) -> Option<Action> {
        match event {
            TermEvent::Key(key) => Some(Action::Key(key)),
            TermEvent::Mouse(mouse) => Some(Action::Mouse(mouse)),
            TermEvent::Resize(w, h) => Some(Action::Resize(w, h)),
            _ => None,
        }
    }
}

/// Feed debounced search text into the action queue
pub fn spawn_debounce_forwarder(
    mut debounced: mpsc::UnboundedReceiver<(String, String)>,
    action_tx: mpsc::UnboundedSender<Action>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some((key, text)) = debounced.recv().await {
            trace!("Debounce window closed for {}: {:?}", key, text);
            if action_tx.send(Action::LookupSuggestions(text)).is_err() {
                break;
            }
        }
    })
}
