//! The radio engine: station/track model plus the playback controller.
//!
//! A [`RadioEngine`] is constructed explicitly and owned by the application.
//! Commands are synchronous and never wait on the network: the player
//! resource connects in the background and reports back through its feed,
//! which a dedicated dispatcher thread applies to the model.

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::config::SessionSettings;
use crate::events::RadioEvent;
use crate::now_playing::NowPlayingSink;
use crate::player::{FeedMessage, PlayerFactory};

mod model;
mod remote;
mod state;

pub use model::*;
pub use remote::*;

use state::Shared;

/// Everything the dispatcher thread processes, in arrival order.
#[derive(Debug)]
pub(crate) enum EngineMsg {
    Feed(FeedMessage),
    Remote(RemoteCommand),
    Session(SessionEvent),
    Shutdown,
}

pub struct RadioEngine {
    shared: Arc<Shared>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RadioEngine {
    pub fn new(
        players: Box<dyn PlayerFactory>,
        sink: Box<dyn NowPlayingSink>,
        session: SessionSettings,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<EngineMsg>();
        let shared = Arc::new(Shared::new(players, sink, session, tx));
        let handle = spawn_dispatcher(shared.clone(), rx);

        Self {
            shared,
            join: Mutex::new(Some(handle)),
        }
    }

    /// Register remote-control targets and audio-session observers.
    ///
    /// Meant to be called once; later calls log a warning and return another
    /// handle to the same dispatcher.
    pub fn setup(&self) -> RemoteControl {
        let mut st = self.shared.lock();
        if st.setup_done {
            log::warn!("setup called more than once");
        } else {
            log::info!("remote control targets registered");
        }
        st.setup_done = true;
        RemoteControl::new(self.shared.tx.clone())
    }

    /// Observe engine notifications from now on.
    pub fn subscribe(&self) -> Receiver<RadioEvent> {
        self.shared.bus.subscribe()
    }

    /// Replace the station and reseed the track from it.
    pub fn set_station(&self, station: Station) {
        self.shared.set_station(station);
    }

    pub fn play(&self) {
        self.shared.play();
    }

    pub fn stop(&self) {
        self.shared.stop();
    }

    pub fn toggle_play_stop(&self) {
        self.shared.toggle_play_stop();
    }

    /// Overwrite the displayed title/artist. A missing or empty artist shows
    /// the station name.
    pub fn custom_metadata(&self, title: &str, artist: Option<&str>) {
        self.shared.custom_metadata(title, artist);
    }

    pub fn update_track_artwork(&self, artwork: Artwork) {
        self.shared.update_track_artwork(artwork);
    }

    pub fn update_station_artwork(&self, artwork: Artwork) {
        self.shared.update_station_artwork(artwork);
    }

    pub fn track_title(&self) -> String {
        self.shared.lock().track.title.clone()
    }

    pub fn track_artist(&self) -> String {
        self.shared.lock().track.artist.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.shared.lock().track.is_playing
    }

    pub fn state(&self) -> PlaybackState {
        self.snapshot().state()
    }

    pub fn station_artwork(&self) -> Option<Artwork> {
        self.shared.lock().station.artwork.clone()
    }

    pub fn track_artwork(&self) -> Option<Artwork> {
        self.shared.lock().track.artwork.clone()
    }

    /// Track artwork if present, else station artwork.
    pub fn artwork(&self) -> Option<Artwork> {
        self.snapshot().artwork().cloned()
    }

    pub fn station(&self) -> Station {
        self.shared.lock().station.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        let st = self.shared.lock();
        Snapshot {
            station: st.station.clone(),
            track: st.track.clone(),
        }
    }
}

impl Drop for RadioEngine {
    fn drop(&mut self) {
        self.shared.release();
        let _ = self.shared.tx.send(EngineMsg::Shutdown);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

fn spawn_dispatcher(shared: Arc<Shared>, rx: Receiver<EngineMsg>) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            match rx.recv() {
                Ok(EngineMsg::Shutdown) | Err(_) => break,
                Ok(msg) => shared.handle(msg),
            }
        }
        log::debug!("engine dispatcher stopped");
    })
}
