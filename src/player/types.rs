//! Signals a player resource can report.

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    /// Not yet connected.
    #[default]
    Unknown,
    /// Audio output has started.
    ReadyToPlay,
    /// The stream could not be played or was lost.
    Failed,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::ReadyToPlay => "ready to play",
            Self::Failed => "failed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The player status changed.
    Status(PlayerStatus),
    /// A batch of in-band metadata items; only the first one is used.
    TimedMetadata(Vec<String>),
}
