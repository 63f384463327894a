//! Mock assistant scenarios, driven through the engine.

use shepherd_core::{
    assistant::{ChatRole, Intent, GREETING, HIGH_RISK_DEBRIS_RESPONSE},
    event::MissionEvent,
    MissionEngine, MissionError,
};

#[test]
fn high_risk_leo_query_gets_canned_reply_after_delay() {
    let mut engine = MissionEngine::build_test("chat-leo", 1);
    engine.run_ticks(5).unwrap();

    let receipt = engine.submit_query("Show high-risk debris in LEO").unwrap();
    assert_eq!(receipt.due, 6);
    assert!(engine.assistant().is_typing());
    assert_eq!(engine.assistant().transcript().len(), 2);

    let events = engine.tick().unwrap();
    assert!(events.contains(&MissionEvent::AssistantReplied { tick: 6, intent: Intent::HighRiskDebris }));
    assert!(!engine.assistant().is_typing());

    let transcript = engine.assistant().transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].content, GREETING);
    assert_eq!(transcript[1].role, ChatRole::User);
    assert_eq!(transcript[1].content, "Show high-risk debris in LEO");
    assert_eq!(transcript[2].role, ChatRole::Assistant);
    assert_eq!(transcript[2].content, HIGH_RISK_DEBRIS_RESPONSE);
}

#[test]
fn second_submission_while_typing_is_queued() {
    let mut engine = MissionEngine::build_test("chat-queue", 1);
    engine.submit_query("fleet status").unwrap();
    let second = engine.submit_query("anything else?").unwrap();
    assert_eq!(second.queue_position, 1);

    engine.tick().unwrap();
    assert!(engine.assistant().is_typing());
    assert_eq!(engine.assistant().transcript().len(), 4);

    engine.tick().unwrap();
    assert!(!engine.assistant().is_typing());

    let roles: Vec<_> = engine.assistant().transcript().iter().map(|m| m.role).collect();
    let users = roles.iter().filter(|r| **r == ChatRole::User).count();
    let replies = roles.iter().filter(|r| **r == ChatRole::Assistant).count();
    assert_eq!(users, 2);
    assert_eq!(replies, 3, "greeting plus one reply per query");
}

#[test]
fn blank_query_is_rejected_without_side_effects() {
    let mut engine = MissionEngine::build_test("chat-blank", 1);
    assert!(matches!(engine.submit_query("  \n"), Err(MissionError::EmptyQuery)));
    assert_eq!(engine.assistant().transcript().len(), 1);
    assert!(!engine.assistant().is_typing());
}
