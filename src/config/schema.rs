use std::path::PathBuf;

use serde::Deserialize;

use crate::engine::{Artwork, Station};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/airwave/config.toml` or `~/.config/airwave/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `AIRWAVE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub station: StationSettings,
    pub player: PlayerSettings,
    pub session: SessionSettings,
    pub ui: UiSettings,
    pub mpris: MprisSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StationSettings {
    pub name: String,
    /// Stream endpoint. Can also be given as the first command-line argument.
    pub url: String,
    pub description: String,
    /// Image path or URL shown when the track has no artwork of its own.
    pub artwork: Option<String>,
}

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            name: "airwave".to_string(),
            url: String::new(),
            description: "Internet radio".to_string(),
            artwork: None,
        }
    }
}

impl StationSettings {
    pub fn to_station(&self) -> Station {
        let mut station =
            Station::new(self.name.clone(), self.url.clone()).with_description(self.description.clone());
        if let Some(art) = self.artwork.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            station = station.with_artwork(artwork_from_setting(art));
        }
        station
    }
}

fn artwork_from_setting(value: &str) -> Artwork {
    let is_url = ["http://", "https://", "file://"]
        .iter()
        .any(|scheme| value.starts_with(scheme));
    if is_url {
        Artwork::from_url(value)
    } else {
        Artwork::from_path(value)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Program used as the stream player. Must accept mpv's command line.
    pub program: String,
    /// Extra arguments passed before the stream URL.
    pub extra_args: Vec<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            program: "mpv".to_string(),
            extra_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Stop when the audio output device in use disappears.
    pub stop_on_route_loss: bool,
    /// Stop when another application interrupts audio.
    pub stop_on_interruption: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            stop_on_route_loss: true,
            stop_on_interruption: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Status shown before the first play.
    pub idle_text: String,
    /// Status shown while the stream connects.
    pub loading_text: String,
    /// Status shown after the user stopped playback.
    pub stopped_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ airwave ~ ".to_string(),
            idle_text: "Press Play to begin...".to_string(),
            loading_text: "Loading...".to_string(),
            stopped_text: "Stopped...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MprisSettings {
    /// Publish now-playing info and accept media keys over D-Bus.
    pub enabled: bool,
    /// Name shown by MPRIS clients; also the bus name suffix.
    pub identity: String,
}

impl Default for MprisSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            identity: "airwave".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file; the terminal belongs to the UI. Defaults to `airwave.log` in the temp dir.
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    pub fn file_path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("airwave.log"))
    }
}
