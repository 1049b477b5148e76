//! Station and track records held by the engine.

use std::path::Path;

/// An image reference, expressed as the URL now-playing surfaces load it from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Artwork {
    url: String,
}

impl Artwork {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Reference a local image file. Relative paths are made absolute.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        Self {
            url: format!("file://{}", abs.display()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_local(&self) -> bool {
        self.url.starts_with("file://")
    }
}

/// The configured stream endpoint and its default display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Station {
    /// Display name; also the fallback artist.
    pub name: String,
    /// Stream endpoint. Empty means "not configured".
    pub url: String,
    /// Fallback title.
    pub description: String,
    pub artwork: Option<Artwork>,
}

impl Station {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_artwork(mut self, artwork: Artwork) -> Self {
        self.artwork = Some(artwork);
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Live metadata of whatever is currently on air.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Overrides the station artwork when present.
    pub artwork: Option<Artwork>,
    pub is_playing: bool,
}

impl Track {
    /// Reset the transient fields after playback stopped.
    pub(crate) fn clear(&mut self) {
        self.title.clear();
        self.artist.clear();
        self.artwork = None;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No station configured, or configured but stopped.
    #[default]
    Idle,
    Playing,
}

/// A consistent copy of the engine's model, for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub station: Station,
    pub track: Track,
}

impl Snapshot {
    pub fn state(&self) -> PlaybackState {
        if self.track.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    /// Track artwork if present, else station artwork.
    pub fn artwork(&self) -> Option<&Artwork> {
        resolve_artwork(&self.track, &self.station)
    }
}

pub(crate) fn resolve_artwork<'a>(track: &'a Track, station: &'a Station) -> Option<&'a Artwork> {
    track.artwork.as_ref().or(station.artwork.as_ref())
}
