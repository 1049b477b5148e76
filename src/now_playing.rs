//! The OS-level "now playing" surface the engine writes to.
//!
//! Sinks are write-only and fire-and-forget: the engine calls [`NowPlayingSink::update`]
//! while holding its state lock, so implementations must return quickly and
//! must never call back into the engine.

use crate::engine::Artwork;

/// What a now-playing surface should display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NowPlaying {
    pub station: String,
    pub title: String,
    pub artist: String,
    /// Track artwork if present, else station artwork.
    pub artwork: Option<Artwork>,
    pub is_live_stream: bool,
    pub playing: bool,
}

pub trait NowPlayingSink: Send + Sync {
    fn update(&self, now_playing: &NowPlaying);
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NowPlayingSink for NullSink {
    fn update(&self, _now_playing: &NowPlaying) {}
}

/// Writes every update to the debug log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NowPlayingSink for LogSink {
    fn update(&self, np: &NowPlaying) {
        log::debug!(
            "now playing [{}] {} - {} (playing: {}, artwork: {})",
            np.station,
            np.artist,
            np.title,
            np.playing,
            np.artwork.as_ref().map_or("none", |a| a.url()),
        );
    }
}

/// Forwards every update to several sinks in order.
#[derive(Default)]
pub struct FanOutSink {
    sinks: Vec<Box<dyn NowPlayingSink>>,
}

impl FanOutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl NowPlayingSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn push(&mut self, sink: Box<dyn NowPlayingSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl NowPlayingSink for FanOutSink {
    fn update(&self, now_playing: &NowPlaying) {
        for sink in &self.sinks {
            sink.update(now_playing);
        }
    }
}
