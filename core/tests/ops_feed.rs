//! Timed operations feed, driven through the engine.

use shepherd_core::{event::MissionEvent, MissionEngine};

fn feed_ticks(events: &[MissionEvent]) -> Vec<u64> {
    events
        .iter()
        .filter_map(|e| match e {
            MissionEvent::LogAppended { tick, .. } => Some(*tick),
            _ => None,
        })
        .collect()
}

#[test]
fn one_message_every_four_ticks() {
    let mut engine = MissionEngine::build_test("feed-interval", 21);
    let events = engine.run_ticks(20).unwrap();
    assert_eq!(feed_ticks(&events), vec![4, 8, 12, 16, 20]);
    assert_eq!(engine.operation_logs().len(), 5);
}

#[test]
fn messages_come_from_the_catalog() {
    let mut engine = MissionEngine::build_test("feed-catalog", 22);
    engine.run_ticks(400).unwrap();
    let catalog: Vec<_> = engine.config().feed_catalog.iter().map(|m| m.text.clone()).collect();
    for entry in engine.operation_logs() {
        assert!(catalog.contains(&entry.message), "unexpected message: {}", entry.message);
        assert_eq!(entry.time, "12:00:00");
    }
}

#[test]
fn applied_entries_match_emitted_events() {
    let mut engine = MissionEngine::build_test("feed-apply", 23);
    let events = engine.run_ticks(4).unwrap();
    let Some(MissionEvent::LogAppended { message, severity, .. }) =
        events.iter().find(|e| matches!(e, MissionEvent::LogAppended { .. }))
    else {
        panic!("no feed event at tick 4");
    };
    let latest = &engine.operation_logs()[0];
    assert_eq!(&latest.message, message);
    assert_eq!(&latest.severity, severity);
}

#[test]
fn draws_cover_the_catalog() {
    let mut engine = MissionEngine::build_test("feed-coverage", 24);
    let events = engine.run_ticks(4 * 500).unwrap();
    let mut seen: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            MissionEvent::LogAppended { message, .. } => Some(message.clone()),
            _ => None,
        })
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), engine.config().feed_catalog.len());
}
