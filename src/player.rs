//! The opaque network player resource and its event feed.
//!
//! The engine never streams audio itself. A [`PlayerFactory`] hands out one
//! [`StreamPlayer`] per play cycle; the player reports status transitions and
//! timed metadata back through the [`PlayerFeed`] it was created with.

mod feed;
mod mpv;
mod types;

pub use feed::PlayerFeed;
pub(crate) use feed::FeedMessage;
pub use mpv::{MpvFactory, MpvPlayer};
pub use types::*;

/// A single network stream playback resource.
///
/// Implementations must not block in `start`; connecting and buffering
/// happen in the background and surface through the feed.
pub trait StreamPlayer: Send {
    /// Begin playback.
    fn start(&mut self);
    /// Halt playback and release the underlying resources.
    fn stop(&mut self);
}

/// Creates a fresh player for every play cycle.
pub trait PlayerFactory: Send + Sync {
    fn create(&self, url: &str, feed: PlayerFeed) -> Box<dyn StreamPlayer>;
}

#[cfg(test)]
mod tests;
