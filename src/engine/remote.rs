//! Remote-control targets and audio-session observers.
//!
//! Platform glue (media keys, MPRIS, audio route watchers) holds a
//! [`RemoteControl`] and pushes commands into the engine's dispatcher; the
//! engine applies them on its own thread.

use std::sync::mpsc::Sender;

use super::EngineMsg;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    Play,
    /// Live streams cannot pause; treated as stop.
    Pause,
    Stop,
    TogglePlayStop,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteChangeReason {
    NewDeviceAvailable,
    /// The output device in use went away (e.g. headphones unplugged).
    OldDeviceUnavailable,
    Other,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterruptionPhase {
    Began,
    Ended,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    RouteChanged(RouteChangeReason),
    Interruption(InterruptionPhase),
}

/// Handle handed out by `RadioEngine::setup`.
#[derive(Clone, Debug)]
pub struct RemoteControl {
    tx: Sender<EngineMsg>,
}

impl RemoteControl {
    pub(crate) fn new(tx: Sender<EngineMsg>) -> Self {
        Self { tx }
    }

    /// Queue a remote command. Returns `false` once the engine is gone.
    pub fn send(&self, cmd: RemoteCommand) -> bool {
        self.tx.send(EngineMsg::Remote(cmd)).is_ok()
    }

    pub fn route_changed(&self, reason: RouteChangeReason) -> bool {
        self.tx
            .send(EngineMsg::Session(SessionEvent::RouteChanged(reason)))
            .is_ok()
    }

    pub fn interruption(&self, phase: InterruptionPhase) -> bool {
        self.tx
            .send(EngineMsg::Session(SessionEvent::Interruption(phase)))
            .is_ok()
    }
}
