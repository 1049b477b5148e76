//! MPRIS2 D-Bus service: the desktop now-playing surface and media-key target.
//!
//! [`MprisHandle`] is a [`NowPlayingSink`]; each update is stored in shared
//! state and a property-change signal is queued for the D-Bus thread. Method
//! calls from MPRIS clients are forwarded to the engine's [`RemoteControl`]
//! once one is attached; until then they are dropped.
//! Without a session bus the service logs once and every update becomes a
//! no-op.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::engine::{RemoteCommand, RemoteControl};
use crate::now_playing::{NowPlaying, NowPlayingSink};

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const TRACK_ID: &str = "/org/mpris/MediaPlayer2/track/live";
const NOTIFY_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
struct SharedState {
    playing: bool,
    station: String,
    title: Option<String>,
    artist: Vec<String>,
    art_url: Option<String>,
}

type RemoteSlot = Arc<Mutex<Option<RemoteControl>>>;

#[derive(Clone)]
pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    remote: RemoteSlot,
    notify: Sender<()>,
}

impl MprisHandle {
    /// Route MPRIS method calls to the engine.
    pub fn attach_remote(&self, remote: RemoteControl) {
        if let Ok(mut slot) = self.remote.lock() {
            *slot = Some(remote);
        }
    }

    pub fn set_now_playing(&self, np: &NowPlaying) {
        if let Ok(mut s) = self.state.lock() {
            s.playing = np.playing;
            s.station = np.station.clone();
            s.title = Some(np.title.clone()).filter(|t| !t.is_empty());
            s.artist = if np.artist.is_empty() {
                Vec::new()
            } else {
                vec![np.artist.clone()]
            };
            s.art_url = np.artwork.as_ref().map(|a| a.url().to_string());
        }
        let _ = self.notify.send(());
    }
}

impl NowPlayingSink for MprisHandle {
    fn update(&self, now_playing: &NowPlaying) {
        self.set_now_playing(now_playing);
    }
}

struct RootIface {
    identity: String,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No window to raise.
    }

    fn quit(&self) {
        // Quitting is left to the front-end.
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        &self.identity
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["http".to_string(), "https".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    remote: RemoteSlot,
    state: Arc<Mutex<SharedState>>,
}

impl PlayerIface {
    fn forward(&self, cmd: RemoteCommand) {
        let sent = self
            .remote
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(|r| r.send(cmd)))
            .unwrap_or(false);
        if !sent {
            log::debug!("MPRIS: dropping {cmd:?}, no engine attached");
        }
    }
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {}

    fn previous(&self) {}

    fn play(&self) {
        self.forward(RemoteCommand::Play);
    }

    fn pause(&self) {
        self.forward(RemoteCommand::Pause);
    }

    fn play_pause(&self) {
        self.forward(RemoteCommand::TogglePlayStop);
    }

    fn stop(&self) {
        self.forward(RemoteCommand::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        if s.playing { "Playing" } else { "Stopped" }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(v) = owned(Value::from(ObjectPath::from_static_str_unchecked(TRACK_ID))) {
            map.insert("mpris:trackid".to_string(), v);
        }
        if let Some(v) = s.title.clone().and_then(|t| owned(Value::from(t))) {
            map.insert("xesam:title".to_string(), v);
        }
        if !s.artist.is_empty() {
            if let Some(v) = owned(Value::from(s.artist.clone())) {
                map.insert("xesam:artist".to_string(), v);
            }
        }
        if !s.station.is_empty() {
            if let Some(v) = owned(Value::from(s.station.clone())) {
                map.insert("xesam:album".to_string(), v);
            }
        }
        if let Some(v) = s.art_url.clone().and_then(|u| owned(Value::from(u))) {
            map.insert("mpris:artUrl".to_string(), v);
        }
        map
    }
}

async fn emit_changes(connection: &Connection) -> zbus::Result<()> {
    let iface_ref = connection
        .object_server()
        .interface::<_, PlayerIface>(OBJECT_PATH)
        .await?;
    let iface = iface_ref.get().await;
    let emitter = iface_ref.signal_emitter();
    iface.metadata_changed(emitter).await?;
    iface.playback_status_changed(emitter).await
}

async fn serve(
    identity: String,
    remote: RemoteSlot,
    state: Arc<Mutex<SharedState>>,
    notify_rx: Receiver<()>,
) {
    let connection = match Connection::session().await {
        Ok(c) => c,
        Err(e) => {
            log::warn!("MPRIS: failed to connect to session bus: {e}");
            return;
        }
    };

    let bus_name = format!("org.mpris.MediaPlayer2.{identity}");
    if let Err(e) = connection.request_name(bus_name.as_str()).await {
        log::warn!("MPRIS: failed to acquire name {bus_name}: {e}");
        return;
    }

    let object_server = connection.object_server();

    if let Err(e) = object_server.at(OBJECT_PATH, RootIface { identity }).await {
        log::warn!("MPRIS: failed to register root iface: {e}");
        return;
    }

    if let Err(e) = object_server
        .at(OBJECT_PATH, PlayerIface { remote, state })
        .await
    {
        log::warn!("MPRIS: failed to register player iface: {e}");
        return;
    }
    log::info!("MPRIS: serving as {bus_name}");

    loop {
        Timer::after(NOTIFY_POLL).await;

        let mut changed = false;
        loop {
            match notify_rx.try_recv() {
                Ok(()) => changed = true,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        if changed {
            if let Err(e) = emit_changes(&connection).await {
                log::debug!("MPRIS: failed to emit property change: {e}");
            }
        }
    }
}

/// Start the MPRIS service on its own thread.
pub fn spawn_mpris(identity: &str) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let remote: RemoteSlot = Arc::new(Mutex::new(None));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();

    let identity = identity.to_string();
    let state_for_thread = state.clone();
    let remote_for_thread = remote.clone();
    std::thread::spawn(move || {
        block_on(serve(identity, remote_for_thread, state_for_thread, notify_rx));
    });

    MprisHandle {
        state,
        remote,
        notify: notify_tx,
    }
}

#[cfg(test)]
mod tests;
