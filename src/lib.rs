//! Internet radio engine.
//!
//! Tune into a network audio stream, play/stop it and surface now-playing
//! metadata to observers. The network player itself is a black box behind
//! [`player::StreamPlayer`]; this crate owns the playback state machine, the
//! in-band metadata normalizer and the notifications around them.

pub mod config;
pub mod engine;
pub mod events;
pub mod metadata;
pub mod mpris;
pub mod now_playing;
pub mod player;

pub use engine::{Artwork, PlaybackState, RadioEngine, RemoteCommand, RemoteControl, Station, Track};
pub use events::RadioEvent;
