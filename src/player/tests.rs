use std::sync::mpsc;
use std::time::Duration;

use super::mpv::parse_line;
use super::*;
use crate::config::PlayerSettings;
use crate::engine::EngineMsg;

#[test]
fn parse_line_reads_icy_title() {
    assert_eq!(
        parse_line(" icy-title: Artist - Title [4T3]"),
        Some(PlayerEvent::TimedMetadata(vec![
            "Artist - Title [4T3]".to_string()
        ]))
    );
    assert_eq!(
        parse_line("icy-title:"),
        Some(PlayerEvent::TimedMetadata(vec![String::new()]))
    );
}

#[test]
fn parse_line_marks_audio_output_as_ready() {
    assert_eq!(
        parse_line("AO: [pulse] 44100Hz stereo 2ch float"),
        Some(PlayerEvent::Status(PlayerStatus::ReadyToPlay))
    );
}

#[test]
fn parse_line_ignores_other_output() {
    assert_eq!(parse_line("Playing: http://example.com/stream"), None);
    assert_eq!(parse_line(" (+) Audio --aid=1 (mp3 2ch 44100Hz)"), None);
    assert_eq!(parse_line(""), None);
}

fn next_feed_event(rx: &mpsc::Receiver<EngineMsg>) -> (u64, PlayerEvent) {
    match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
        EngineMsg::Feed(m) => (m.generation, m.event),
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn missing_program_reports_failed_status() {
    let settings = PlayerSettings {
        program: "/nonexistent/airwave-test-player".to_string(),
        extra_args: vec![],
    };
    let (tx, rx) = mpsc::channel();
    let mut player = MpvFactory::new(&settings).create("http://example.com", PlayerFeed::new(tx, 3));

    player.start();

    assert_eq!(
        next_feed_event(&rx),
        (3, PlayerEvent::Status(PlayerStatus::Failed))
    );
}

#[cfg(unix)]
#[test]
fn process_exiting_on_its_own_reports_failed_status() {
    let settings = PlayerSettings {
        program: "false".to_string(),
        extra_args: vec![],
    };
    let (tx, rx) = mpsc::channel();
    let mut player = MpvFactory::new(&settings).create("http://example.com", PlayerFeed::new(tx, 1));

    player.start();

    assert_eq!(
        next_feed_event(&rx),
        (1, PlayerEvent::Status(PlayerStatus::Failed))
    );
}
