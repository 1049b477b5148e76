use super::*;

#[test]
fn emit_reaches_every_subscriber() {
    let bus = EventBus::new();
    let a = bus.subscribe();
    let b = bus.subscribe();

    bus.emit(RadioEvent::PlayPressed);

    assert_eq!(a.try_recv().unwrap(), RadioEvent::PlayPressed);
    assert_eq!(b.try_recv().unwrap(), RadioEvent::PlayPressed);
}

#[test]
fn late_subscriber_gets_no_replay() {
    let bus = EventBus::new();
    bus.emit(RadioEvent::MetadataUpdated);

    let late = bus.subscribe();
    assert!(late.try_recv().is_err());

    bus.emit(RadioEvent::StopPressed);
    assert_eq!(late.try_recv().unwrap(), RadioEvent::StopPressed);
    assert!(late.try_recv().is_err());
}

#[test]
fn dropped_subscribers_are_pruned_on_emit() {
    let bus = EventBus::new();
    let keep = bus.subscribe();
    let gone = bus.subscribe();
    assert_eq!(bus.subscriber_count(), 2);

    drop(gone);
    bus.emit(RadioEvent::StationOffline);

    assert_eq!(bus.subscriber_count(), 1);
    assert_eq!(keep.try_recv().unwrap(), RadioEvent::StationOffline);
}

#[test]
fn events_are_delivered_across_threads() {
    let bus = EventBus::new();
    let rx = bus.subscribe();

    std::thread::scope(|s| {
        s.spawn(|| bus.emit(RadioEvent::MetadataUpdated));
    });

    assert_eq!(
        rx.recv_timeout(std::time::Duration::from_secs(1)).unwrap(),
        RadioEvent::MetadataUpdated
    );
}
