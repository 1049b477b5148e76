//! Engine notifications and their broadcast channel.
//!
//! Every event is a bare "state changed, re-read the engine" signal. Observers
//! receive events on their own `Receiver` and may live on any thread.

use std::fmt;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

/// Notifications published by the radio engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RadioEvent {
    /// Track title, artist or the station changed.
    MetadataUpdated,
    /// Playback started after a successful `play()`.
    PlayPressed,
    /// Playback stopped and the player resource was released.
    StopPressed,
    /// The stream reported a failure; playback was stopped.
    StationOffline,
}

impl fmt::Display for RadioEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MetadataUpdated => "metadata updated",
            Self::PlayPressed => "play pressed",
            Self::StopPressed => "stop pressed",
            Self::StationOffline => "station offline",
        };
        f.write_str(name)
    }
}

/// Fan-out of [`RadioEvent`]s to every live subscriber.
///
/// Late subscribers only see events emitted after they subscribed.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<RadioEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer.
    pub fn subscribe(&self) -> Receiver<RadioEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// Deliver `event` to all subscribers, dropping the ones whose receiver is gone.
    pub fn emit(&self, event: RadioEvent) {
        let Ok(mut subs) = self.subscribers.lock() else {
            return;
        };
        subs.retain(|tx| tx.send(event).is_ok());
        log::trace!("emitted {event} to {} observer(s)", subs.len());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests;
