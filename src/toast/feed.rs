// SPDX-License-Identifier: MPL-2.0
//! Deferred delivery of store events to a surface.
//!
//! Store listeners run synchronously inside `create`/`update`/`dismiss`.
//! A surface must not apply them there: a create quickly followed by an
//! update would be folded into a single render. The feed queues every
//! event instead, and the surface drains it one event per message, so each
//! store mutation gets its own update and its own render pass.

use super::record::ToastEvent;
use super::store::{ToastStore, Unsubscribe};
use tokio::sync::mpsc;

/// Queue of store events waiting to be applied by one surface.
#[derive(Debug)]
pub struct ToastFeed {
    receiver: mpsc::UnboundedReceiver<ToastEvent>,
    subscription: Unsubscribe,
}

impl ToastFeed {
    /// Subscribes to `store` and starts queueing its events.
    #[must_use]
    pub fn connect(store: &ToastStore) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let subscription = store.subscribe(move |event| {
            // The receiver only goes away with the feed, which unsubscribes first.
            let _ = sender.send(event.clone());
        });
        Self {
            receiver,
            subscription,
        }
    }

    /// Takes the next queued event without waiting.
    pub fn try_next(&mut self) -> Option<ToastEvent> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next event. Returns `None` once the feed is closed.
    pub async fn next(&mut self) -> Option<ToastEvent> {
        self.receiver.recv().await
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl Drop for ToastFeed {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}
