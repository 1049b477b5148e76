use std::sync::mpsc::Sender;

use crate::engine::EngineMsg;

use super::types::{PlayerEvent, PlayerStatus};

/// A player event tagged with the play cycle that produced it.
#[derive(Debug)]
pub(crate) struct FeedMessage {
    pub generation: u64,
    pub event: PlayerEvent,
}

/// Sending half of a player's status/metadata feed.
///
/// Cloneable so a player can report from its own worker threads. Sends after
/// the engine went away are silently dropped.
#[derive(Clone, Debug)]
pub struct PlayerFeed {
    tx: Sender<EngineMsg>,
    generation: u64,
}

impl PlayerFeed {
    pub(crate) fn new(tx: Sender<EngineMsg>, generation: u64) -> Self {
        Self { tx, generation }
    }

    pub fn status(&self, status: PlayerStatus) {
        self.send(PlayerEvent::Status(status));
    }

    pub fn timed_metadata(&self, items: Vec<String>) {
        self.send(PlayerEvent::TimedMetadata(items));
    }

    pub fn send(&self, event: PlayerEvent) {
        let _ = self.tx.send(EngineMsg::Feed(FeedMessage {
            generation: self.generation,
            event,
        }));
    }
}
