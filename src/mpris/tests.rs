use super::*;
use crate::engine::{Artwork, EngineMsg};

fn handle() -> (MprisHandle, Receiver<()>) {
    let (notify_tx, notify_rx) = mpsc::channel::<()>();
    let handle = MprisHandle {
        state: Arc::new(Mutex::new(SharedState::default())),
        remote: Arc::new(Mutex::new(None)),
        notify: notify_tx,
    };
    (handle, notify_rx)
}

fn now_playing() -> NowPlaying {
    NowPlaying {
        station: "Classic Rock 109".to_string(),
        title: "Back in Black".to_string(),
        artist: "ACDC".to_string(),
        artwork: Some(Artwork::from_url("https://example.com/cover.png")),
        is_live_stream: true,
        playing: true,
    }
}

#[test]
fn update_sets_and_clears_shared_state() {
    let (handle, notify_rx) = handle();

    handle.update(&now_playing());
    {
        let s = handle.state.lock().unwrap();
        assert!(s.playing);
        assert_eq!(s.station, "Classic Rock 109");
        assert_eq!(s.title.as_deref(), Some("Back in Black"));
        assert_eq!(s.artist, vec!["ACDC".to_string()]);
        assert_eq!(s.art_url.as_deref(), Some("https://example.com/cover.png"));
    }
    assert!(notify_rx.try_recv().is_ok());

    handle.update(&NowPlaying {
        station: "Classic Rock 109".to_string(),
        ..NowPlaying::default()
    });
    {
        let s = handle.state.lock().unwrap();
        assert!(!s.playing);
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.art_url, None);
    }
}

#[test]
fn update_without_running_service_does_not_panic() {
    let (handle, notify_rx) = handle();
    drop(notify_rx);
    handle.update(&now_playing());
    assert!(handle.state.lock().unwrap().playing);
}

#[test]
fn playback_status_maps_playing_flag() {
    let (handle, _rx) = handle();
    let iface = PlayerIface {
        remote: handle.remote.clone(),
        state: handle.state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");
    handle.update(&now_playing());
    assert_eq!(iface.playback_status(), "Playing");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (handle, _rx) = handle();
    let iface = PlayerIface {
        remote: handle.remote.clone(),
        state: handle.state.clone(),
    };

    handle.update(&now_playing());
    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "mpris:artUrl",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_omits_empty_fields() {
    let (handle, _rx) = handle();
    let iface = PlayerIface {
        remote: handle.remote.clone(),
        state: handle.state.clone(),
    };

    let map = iface.metadata();
    assert!(map.contains_key("mpris:trackid"));
    assert!(!map.contains_key("xesam:title"));
    assert!(!map.contains_key("xesam:artist"));
    assert!(!map.contains_key("mpris:artUrl"));
}

#[test]
fn method_calls_are_forwarded_once_remote_is_attached() {
    let (handle, _rx) = handle();
    let iface = PlayerIface {
        remote: handle.remote.clone(),
        state: handle.state.clone(),
    };

    // Nothing attached yet: dropped silently.
    iface.play();

    let (tx, rx) = mpsc::channel::<EngineMsg>();
    handle.attach_remote(RemoteControl::new(tx));

    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();

    let got: Vec<RemoteCommand> = rx
        .try_iter()
        .map(|m| match m {
            EngineMsg::Remote(cmd) => cmd,
            other => panic!("unexpected message: {other:?}"),
        })
        .collect();
    assert_eq!(
        got,
        vec![
            RemoteCommand::Play,
            RemoteCommand::Pause,
            RemoteCommand::TogglePlayStop,
            RemoteCommand::Stop,
        ]
    );
}
