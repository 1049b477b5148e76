//! Engine state and every transition applied to it.
//!
//! All mutations go through [`Shared::lock`]: public commands run on the
//! caller's thread, player feeds and remote commands on the dispatcher
//! thread, and the mutex serializes both. Events are emitted and the
//! now-playing sink refreshed while the lock is still held, so observers that
//! re-read the model always see the state that triggered the event.

use std::sync::mpsc::Sender;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::config::SessionSettings;
use crate::events::{EventBus, RadioEvent};
use crate::metadata;
use crate::now_playing::{NowPlaying, NowPlayingSink};
use crate::player::{FeedMessage, PlayerEvent, PlayerFactory, PlayerFeed, PlayerStatus, StreamPlayer};

use super::EngineMsg;
use super::model::{Station, Track, resolve_artwork};
use super::remote::{InterruptionPhase, RemoteCommand, RouteChangeReason, SessionEvent};

const OFFLINE_ARTIST: &str = "Please try again later";

#[derive(Default)]
pub(super) struct EngineState {
    pub station: Station,
    pub track: Track,
    player: Option<Box<dyn StreamPlayer>>,
    /// Incremented on every successful `play()`; tags the player's feed.
    generation: u64,
    pub setup_done: bool,
}

pub(super) struct Shared {
    state: Mutex<EngineState>,
    pub bus: EventBus,
    sink: Box<dyn NowPlayingSink>,
    players: Box<dyn PlayerFactory>,
    session: SessionSettings,
    pub tx: Sender<EngineMsg>,
}

impl Shared {
    pub fn new(
        players: Box<dyn PlayerFactory>,
        sink: Box<dyn NowPlayingSink>,
        session: SessionSettings,
        tx: Sender<EngineMsg>,
    ) -> Self {
        Self {
            state: Mutex::new(EngineState::default()),
            bus: EventBus::new(),
            sink,
            players,
            session,
            tx,
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn refresh_now_playing(&self, st: &EngineState) {
        self.sink.update(&NowPlaying {
            station: st.station.name.clone(),
            title: st.track.title.clone(),
            artist: st.track.artist.clone(),
            artwork: resolve_artwork(&st.track, &st.station).cloned(),
            is_live_stream: true,
            playing: st.track.is_playing,
        });
    }

    pub fn set_station(&self, station: Station) {
        let mut st = self.lock();
        info!("station set to {} ({})", station.name, station.url);
        st.track.title = station.description.clone();
        st.track.artist = station.name.clone();
        st.station = station;
        self.refresh_now_playing(&st);
        self.bus.emit(RadioEvent::MetadataUpdated);
    }

    pub fn play(&self) {
        let mut st = self.lock();
        self.play_locked(&mut st);
    }

    pub fn stop(&self) {
        let mut st = self.lock();
        self.stop_locked(&mut st);
    }

    pub fn toggle_play_stop(&self) {
        let mut st = self.lock();
        if st.track.is_playing {
            self.stop_locked(&mut st);
        } else {
            self.play_locked(&mut st);
        }
    }

    fn play_locked(&self, st: &mut EngineState) {
        if !st.station.is_configured() {
            warn!("station has not been set up");
            return;
        }
        if st.track.is_playing {
            warn!("station is already playing");
            return;
        }

        st.generation += 1;
        let feed = PlayerFeed::new(self.tx.clone(), st.generation);
        let mut player = self.players.create(&st.station.url, feed);
        player.start();
        st.player = Some(player);
        st.track.is_playing = true;
        info!("playing {} ({})", st.station.name, st.station.url);

        self.refresh_now_playing(st);
        self.bus.emit(RadioEvent::PlayPressed);
    }

    fn stop_locked(&self, st: &mut EngineState) {
        if !st.track.is_playing {
            warn!("station is already stopped");
            return;
        }

        if let Some(mut player) = st.player.take() {
            player.stop();
        }
        st.track.is_playing = false;
        st.track.clear();
        info!("stopped {}", st.station.name);

        self.refresh_now_playing(st);
        self.bus.emit(RadioEvent::StopPressed);
    }

    pub fn custom_metadata(&self, title: &str, artist: Option<&str>) {
        let mut st = self.lock();
        self.custom_metadata_locked(&mut st, title, artist);
    }

    fn custom_metadata_locked(&self, st: &mut EngineState, title: &str, artist: Option<&str>) {
        st.track.title = title.to_string();
        st.track.artist = match artist {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => st.station.name.clone(),
        };
        debug!("custom metadata - artist: {} | title: {}", st.track.artist, st.track.title);

        self.refresh_now_playing(st);
        self.bus.emit(RadioEvent::MetadataUpdated);
    }

    pub fn update_track_artwork(&self, artwork: super::Artwork) {
        let mut st = self.lock();
        st.track.artwork = Some(artwork);
        self.refresh_now_playing(&st);
    }

    pub fn update_station_artwork(&self, artwork: super::Artwork) {
        let mut st = self.lock();
        st.station.artwork = Some(artwork);
        self.refresh_now_playing(&st);
    }

    /// Apply one message from the dispatcher channel.
    pub fn handle(&self, msg: EngineMsg) {
        match msg {
            EngineMsg::Feed(m) => self.handle_feed(m),
            EngineMsg::Remote(cmd) => self.handle_remote(cmd),
            EngineMsg::Session(ev) => self.handle_session(ev),
            EngineMsg::Shutdown => {}
        }
    }

    fn handle_feed(&self, msg: FeedMessage) {
        let mut st = self.lock();
        if msg.generation != st.generation || !st.track.is_playing {
            debug!("dropping event from released player: {:?}", msg.event);
            return;
        }

        match msg.event {
            PlayerEvent::Status(PlayerStatus::Failed) => {
                warn!("stream failed, {} is offline", st.station.name);
                self.stop_locked(&mut st);
                let title = format!("{} is offline", st.station.name);
                self.custom_metadata_locked(&mut st, &title, Some(OFFLINE_ARTIST));
                self.bus.emit(RadioEvent::StationOffline);
            }
            PlayerEvent::Status(status) => {
                debug!("player status: {status}");
            }
            PlayerEvent::TimedMetadata(items) => {
                let Some(raw) = items.into_iter().next().filter(|s| !s.is_empty()) else {
                    debug!("ignoring empty metadata payload");
                    return;
                };

                let text = metadata::normalize(&raw, &st.station);
                st.track.artist = text.artist;
                st.track.title = text.title;
                info!("metadata - artist: {} | title: {}", st.track.artist, st.track.title);

                self.refresh_now_playing(&st);
                self.bus.emit(RadioEvent::MetadataUpdated);
            }
        }
    }

    fn handle_remote(&self, cmd: RemoteCommand) {
        debug!("remote command: {cmd:?}");
        match cmd {
            RemoteCommand::Play => self.play(),
            RemoteCommand::Pause | RemoteCommand::Stop => self.stop(),
            RemoteCommand::TogglePlayStop => self.toggle_play_stop(),
        }
    }

    fn handle_session(&self, event: SessionEvent) {
        match event {
            SessionEvent::RouteChanged(RouteChangeReason::OldDeviceUnavailable) => {
                info!("audio device was removed");
                if self.session.stop_on_route_loss {
                    self.stop_if_playing();
                }
            }
            SessionEvent::RouteChanged(reason) => {
                debug!("audio route changed: {reason:?}");
            }
            SessionEvent::Interruption(InterruptionPhase::Began) => {
                info!("interruption began");
                if self.session.stop_on_interruption {
                    self.stop_if_playing();
                }
            }
            SessionEvent::Interruption(InterruptionPhase::Ended) => {
                info!("interruption ended");
            }
        }
    }

    fn stop_if_playing(&self) {
        let mut st = self.lock();
        if st.track.is_playing {
            self.stop_locked(&mut st);
        }
    }

    /// Release the player without emitting events. Used on engine drop.
    pub fn release(&self) {
        let mut st = self.lock();
        if let Some(mut player) = st.player.take() {
            player.stop();
        }
        st.track.is_playing = false;
    }
}
