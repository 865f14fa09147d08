// Unit tests for the HackConnect session engine

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use hackconnect::core::{
    response_pool, Catalog, FixedClock, HackSession, SeedData, SessionOptions, SwipeResult,
    TracingNotifier,
};
use hackconnect::models::{Candidate, ChatPhase, Sender, SwipeDirection};

fn fresh_session() -> HackSession {
    let catalog = SeedData::hackathon_demo(Utc::now()).catalog;
    session_over(catalog)
}

fn session_over(catalog: Catalog) -> HackSession {
    let options = SessionOptions {
        transition: Duration::ZERO,
        rng_seed: Some(2024),
        ..Default::default()
    };
    HackSession::new(
        SeedData::from_catalog(catalog),
        options,
        Arc::new(FixedClock(Utc::now())),
        Arc::new(TracingNotifier),
    )
}

fn candidate(id: usize) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: format!("Attendee {}", id),
        skills: vec!["Rust".to_string()],
        looking_for: "Mentor".to_string(),
        avatar: String::new(),
    }
}

#[tokio::test]
async fn test_cursor_monotonic_and_bounded() {
    let session = fresh_session();
    let mut last = session.cursor().await;

    for i in 0..20 {
        let direction = if i % 3 == 0 { SwipeDirection::Right } else { SwipeDirection::Left };
        let outcome = session.swipe(direction).await.unwrap();

        assert!(outcome.cursor >= last, "cursor went backwards");
        assert!(outcome.cursor <= 8, "cursor past end of catalog");
        last = outcome.cursor;
    }
    assert_eq!(last, 8);
}

#[tokio::test]
async fn test_right_swipe_adds_exactly_one_match() {
    let session = fresh_session();

    session.swipe(SwipeDirection::Left).await.unwrap();
    assert!(session.list_matches().await.unwrap().is_empty());

    let outcome = session.swipe(SwipeDirection::Right).await.unwrap();
    let matches = session.list_matches().await.unwrap();

    assert!(matches!(outcome.result, SwipeResult::Matched { ref candidate, .. } if candidate.id == "2"));
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].candidate.id, "2");
}

#[tokio::test]
async fn test_exhausted_deck_never_mutates_registry() {
    let session = fresh_session();
    for _ in 0..8 {
        session.swipe(SwipeDirection::Right).await.unwrap();
    }
    assert_eq!(session.list_matches().await.unwrap().len(), 8);

    for direction in [SwipeDirection::Right, SwipeDirection::Left, SwipeDirection::Right] {
        let outcome = session.swipe(direction).await.unwrap();

        assert_eq!(outcome.result, SwipeResult::NoMoreProfiles);
        assert!(outcome.exhausted);
        assert_eq!(outcome.notices.len(), 1);
        assert_eq!(outcome.notices[0].title, "No more profiles");
    }
    assert_eq!(session.list_matches().await.unwrap().len(), 8);
    assert!(session.current_candidate().await.is_none());
}

#[tokio::test]
async fn test_last_candidate_can_be_swiped() {
    let session = session_over(Catalog::new(vec![candidate(1), candidate(2)]));

    session.swipe(SwipeDirection::Left).await.unwrap();
    let outcome = session.swipe(SwipeDirection::Right).await.unwrap();

    assert!(matches!(outcome.result, SwipeResult::Matched { .. }));
    assert!(outcome.exhausted);
    assert_eq!(outcome.remaining, 0);
}

#[tokio::test]
async fn test_matches_listed_in_insertion_order() {
    let session = session_over(Catalog::new((1..=6).map(candidate).collect()));
    let pattern = [
        SwipeDirection::Right,
        SwipeDirection::Left,
        SwipeDirection::Right,
        SwipeDirection::Right,
        SwipeDirection::Left,
        SwipeDirection::Right,
    ];

    for direction in pattern {
        session.swipe(direction).await.unwrap();
    }

    let ids: Vec<String> = session
        .list_matches()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.candidate.id)
        .collect();
    assert_eq!(ids, vec!["1", "3", "4", "6"]);
}

#[tokio::test]
async fn test_empty_catalog_is_terminal_from_start() {
    let session = session_over(Catalog::default());
    let outcome = session.swipe(SwipeDirection::Right).await.unwrap();

    assert_eq!(outcome.result, SwipeResult::NoMoreProfiles);
    assert_eq!(outcome.cursor, 0);
}

#[tokio::test]
async fn test_blank_messages_never_append() {
    let session = fresh_session();

    for text in ["", " ", "\t\n", "   \r\n "] {
        assert!(session.send_message("6", text).await.unwrap().is_none());
    }
    assert!(session.open_chat("6").await.unwrap().is_empty());
    assert_eq!(session.chat_phase("6").await.unwrap(), ChatPhase::Idle);
}

#[tokio::test]
async fn test_hello_appends_one_local_message() {
    let session = fresh_session();
    let sent = session.send_message("6", "Hello").await.unwrap().unwrap();

    let log = session.open_chat("6").await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0], sent);
    assert_eq!(log[0].text, "Hello");
    assert_eq!(log[0].sender, Sender::LocalUser);
}

#[tokio::test(start_paused = true)]
async fn test_reply_arrives_within_window() {
    let session = fresh_session();
    let start = tokio::time::Instant::now();
    session.send_message("7", "Hello").await.unwrap();

    let mut saw_typing = false;
    loop {
        tokio::time::sleep(Duration::from_millis(1)).await;
        if session.chat_phase("7").await.unwrap() == ChatPhase::Typing {
            saw_typing = true;
        }
        if session.open_chat("7").await.unwrap().len() == 2 {
            break;
        }
        // Timers fire on 1ms ticks, so a reply due just under 3500ms lands on that tick
        assert!(start.elapsed() <= Duration::from_millis(3501), "no reply in time");
    }

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(500));
    assert!(saw_typing);

    let reply = session.open_chat("7").await.unwrap().pop().unwrap();
    assert_eq!(reply.sender, Sender::Candidate("7".to_string()));
    assert!(response_pool("Blockchain").contains(&reply.text));
}

#[test]
fn test_deck_head_outside_async_context() {
    let session = fresh_session();

    let head = tokio_test::block_on(session.current_candidate());
    assert_eq!(head.map(|c| c.name), Some("Alex Johnson".to_string()));
    assert_eq!(tokio_test::block_on(session.remaining()), 8);
}
