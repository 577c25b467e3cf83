//! Status sink shared by the voice adapters.

use std::sync::Arc;

use calmline_core::events::{StatusEvent, VoiceStatus};
use tokio::sync::watch;

/// Applies adapter transitions to the current [`VoiceStatus`] and publishes it.
///
/// Cloning yields another handle on the same channel.
#[derive(Debug, Clone)]
pub struct StatusSink {
    tx: Arc<watch::Sender<VoiceStatus>>,
}

impl Default for StatusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(VoiceStatus::default());
        Self { tx: Arc::new(tx) }
    }

    /// Record a transition. Subscribers are notified only when a flag changes.
    pub fn emit(&self, event: StatusEvent) {
        tracing::debug!(event = event.event_type(), "Voice status transition");
        self.tx.send_if_modified(|status| {
            let before = *status;
            status.apply(&event);
            before != *status
        });
    }

    pub fn current(&self) -> VoiceStatus {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<VoiceStatus> {
        self.tx.subscribe()
    }
}
