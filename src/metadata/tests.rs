use super::*;

fn station() -> Station {
    Station::new("Classic Rock 109", "http://listen.example.com:10042")
        .with_description("The best classic rock")
}

fn pair(artist: &str, title: &str) -> NowPlayingText {
    NowPlayingText {
        artist: artist.to_string(),
        title: title.to_string(),
    }
}

#[test]
fn splits_artist_and_title_and_drops_song_code() {
    assert_eq!(
        normalize("Artist - Title [4T3]", &station()),
        pair("Artist", "Title")
    );
}

#[test]
fn unknown_artist_falls_back_to_station_name() {
    assert_eq!(
        normalize("Unknown - Song", &station()),
        pair("Classic Rock 109", "Song")
    );
    assert_eq!(
        normalize("unknown - Song", &station()),
        pair("Classic Rock 109", "Song")
    );
    assert_eq!(
        normalize(" - Song", &station()),
        pair("Classic Rock 109", "Song")
    );
}

#[test]
fn unknown_match_is_case_sensitive() {
    assert_eq!(normalize("UNKNOWN - Song", &station()), pair("UNKNOWN", "Song"));
}

#[test]
fn single_segment_becomes_artist_and_title_uses_description() {
    assert_eq!(
        normalize("Station Jingle", &station()),
        pair("Station Jingle", "The best classic rock")
    );
}

#[test]
fn title_keeps_inner_separators() {
    assert_eq!(
        normalize("DJ - Remix - Extended", &station()),
        pair("DJ", "Remix - Extended")
    );
}

#[test]
fn empty_payload_uses_both_fallbacks() {
    assert_eq!(
        normalize("", &station()),
        pair("Classic Rock 109", "The best classic rock")
    );
}

#[test]
fn trailing_separator_leaves_empty_title_fallback() {
    assert_eq!(
        normalize("Artist - ", &station()),
        pair("Artist", "The best classic rock")
    );
}

#[test]
fn sanitize_strips_control_bytes_emoji_and_punctuation() {
    assert_eq!(sanitize("AC/DC\u{0}\u{7} - Back in Black 🎸!"), "ACDC - Back in Black ");
    assert_eq!(sanitize("Guns N' Roses - Don't Cry [X1]"), "Guns N' Roses - Don't Cry [X1]");
    assert_eq!(sanitize("Café"), "Caf");
}

#[test]
fn sanitize_drops_letters_carrying_combining_marks() {
    assert_eq!(sanitize("Beyonce\u{301} - Halo"), "Beyonc - Halo");
    assert_eq!(
        normalize("Sigur Ro\u{301}s - Hoppi\u{301}polla", &station()),
        pair("Sigur Rs", "Hopppolla")
    );
}

#[test]
fn sanitize_runs_before_splitting() {
    assert_eq!(
        normalize("Queen\u{1b} - Bohemian Rhapsody (Live)", &station()),
        pair("Queen", "Bohemian Rhapsody Live")
    );
}

#[test]
fn song_code_only_removed_after_space_bracket() {
    assert_eq!(normalize("Artist - Title[4T3]", &station()), pair("Artist", "Title[4T3]"));
    assert_eq!(
        normalize("Artist - Title [4T3] - Extra", &station()),
        pair("Artist", "Title")
    );
}
