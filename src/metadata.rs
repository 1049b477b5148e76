//! Turns raw in-band stream titles into an (artist, title) pair.
//!
//! Broadcasters embed free-form text such as `"Artist - Title [4T3]"` in the
//! stream. Some encoders also inject control bytes and punctuation noise, so
//! the text is sanitized before being split.

use unicode_segmentation::UnicodeSegmentation;

use crate::engine::Station;

/// Separator between artist and title (and inside titles such as remixes).
const FIELD_SEPARATOR: &str = " - ";
/// Marks the start of a trailing song code like `[4T3]`.
const SONG_CODE_MARKER: &str = " [";

/// Artist and title derived from one metadata payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlayingText {
    pub artist: String,
    pub title: String,
}

fn is_allowed(grapheme: &str) -> bool {
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_alphanumeric() || matches!(c, '\'' | '-' | ' ' | '[' | ']'),
        _ => false,
    }
}

/// Drop every character outside letters, digits, `'`, `-`, space and square brackets.
///
/// Works on user-perceived characters: a base letter followed by combining
/// marks (`"e\u{301}"`) is dropped as a whole.
pub fn sanitize(raw: &str) -> String {
    raw.graphemes(true).filter(|g| is_allowed(g)).collect()
}

/// Normalize a raw metadata payload against the current `station`.
///
/// A blank or `Unknown`/`unknown` artist falls back to the station name, an
/// empty title falls back to the station description. A payload without a
/// separator is taken as the artist alone.
pub fn normalize(raw: &str, station: &Station) -> NowPlayingText {
    let cleaned = sanitize(raw);

    let without_code = cleaned.split(SONG_CODE_MARKER).next().unwrap_or_default();

    let mut parts = without_code.split(FIELD_SEPARATOR);
    let artist = match parts.next().unwrap_or_default() {
        "" | "Unknown" | "unknown" => station.name.clone(),
        other => other.to_string(),
    };

    // Titles may legitimately contain the separator ("Song - Remix").
    let title = parts.collect::<Vec<_>>().join(FIELD_SEPARATOR);
    let title = if title.is_empty() {
        station.description.clone()
    } else {
        title
    };

    NowPlayingText { artist, title }
}

#[cfg(test)]
mod tests;
