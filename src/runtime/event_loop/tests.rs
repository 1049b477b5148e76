use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use airwave::config::{SessionSettings, UiSettings};
use airwave::now_playing::NullSink;
use airwave::player::{PlayerFactory, PlayerFeed, PlayerStatus, StreamPlayer};
use airwave::{RadioEngine, RadioEvent, Station};

use super::apply_radio_events;

const WAIT: Duration = Duration::from_secs(2);

#[derive(Clone, Default)]
struct Feeds(Arc<Mutex<Vec<PlayerFeed>>>);

struct SilentPlayer;

impl StreamPlayer for SilentPlayer {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

impl PlayerFactory for Feeds {
    fn create(&self, _url: &str, feed: PlayerFeed) -> Box<dyn StreamPlayer> {
        self.0.lock().unwrap().push(feed);
        Box::new(SilentPlayer)
    }
}

impl Feeds {
    fn last(&self) -> PlayerFeed {
        self.0.lock().unwrap().last().cloned().unwrap()
    }
}

fn engine() -> (RadioEngine, Feeds, Receiver<RadioEvent>) {
    let feeds = Feeds::default();
    let engine = RadioEngine::new(
        Box::new(feeds.clone()),
        Box::new(NullSink),
        SessionSettings::default(),
    );
    engine.set_station(
        Station::new("Classic Rock 109", "http://listen.example.com:10042")
            .with_description("The best classic rock"),
    );
    let rx = engine.subscribe();
    (engine, feeds, rx)
}

/// Collect events until `last` arrives (inclusive).
fn events_until(rx: &Receiver<RadioEvent>, last: RadioEvent) -> Vec<RadioEvent> {
    let mut got = Vec::new();
    loop {
        let ev = rx.recv_timeout(WAIT).expect("timed out waiting for event");
        got.push(ev);
        if ev == last {
            return got;
        }
    }
}

#[test]
fn play_shows_loading_text_until_metadata_arrives() {
    let (engine, _feeds, rx) = engine();
    let ui = UiSettings::default();

    engine.play();
    let batch: Vec<RadioEvent> = rx.try_iter().collect();
    assert_eq!(batch, vec![RadioEvent::PlayPressed]);

    apply_radio_events(&batch, &ui, &engine);
    assert_eq!(engine.track_title(), "Loading...");
    assert_eq!(engine.track_artist(), "Classic Rock 109");
}

#[test]
fn late_play_notification_keeps_stream_metadata() {
    let (engine, feeds, rx) = engine();
    let ui = UiSettings::default();

    engine.play();
    feeds
        .last()
        .timed_metadata(vec!["AC-DC - Back in Black".to_string()]);
    let batch = events_until(&rx, RadioEvent::MetadataUpdated);
    assert_eq!(batch, vec![RadioEvent::PlayPressed, RadioEvent::MetadataUpdated]);

    apply_radio_events(&batch, &ui, &engine);
    assert_eq!(engine.track_artist(), "AC-DC");
    assert_eq!(engine.track_title(), "Back in Black");
}

#[test]
fn stop_shows_stopped_text() {
    let (engine, _feeds, rx) = engine();
    let ui = UiSettings::default();

    engine.play();
    engine.stop();
    let batch: Vec<RadioEvent> = rx.try_iter().collect();
    assert_eq!(batch, vec![RadioEvent::PlayPressed, RadioEvent::StopPressed]);

    apply_radio_events(&batch, &ui, &engine);
    assert_eq!(engine.track_title(), "Stopped...");
    assert!(!engine.is_playing());
}

#[test]
fn offline_notice_survives_the_stop_notification() {
    let (engine, feeds, rx) = engine();
    let ui = UiSettings::default();

    engine.play();
    feeds.last().status(PlayerStatus::Failed);
    let batch = events_until(&rx, RadioEvent::StationOffline);

    apply_radio_events(&batch, &ui, &engine);
    assert_eq!(engine.track_title(), "Classic Rock 109 is offline");
    assert_eq!(engine.track_artist(), "Please try again later");
}
