/// Integration tests for the line-driven session against a mock API
mod common;

use common::{MockApi, SubmitBehavior};
use shared::{Amount, PlayType};
use std::time::Duration;
use terminal::{Reply, Session};

async fn session(behavior: SubmitBehavior) -> (Session<MockApi>, MockApi) {
    let api = MockApi::new(behavior);
    let mut session = Session::new(api.clone(), None, Duration::from_millis(1));
    session.load_catalogs().await.expect("catalogs load");
    (session, api)
}

async fn run(session: &mut Session<MockApi>, lines: &[&str]) -> Vec<Reply> {
    let mut replies = Vec::new();
    for line in lines {
        replies.push(session.handle_line(line).await);
    }
    replies
}

#[tokio::test]
async fn test_compose_and_send() {
    let (mut session, api) = session(SubmitBehavior::Accept).await;

    let replies = run(
        &mut session,
        &[
            "5,12,123",
            "toggle fijo",
            "toggle centena",
            "tab fijo",
            "10,5",
            "tab centena",
            "2",
            "separate",
            "send",
        ],
    )
    .await;
    assert!(
        replies.iter().all(|r| matches!(r, Reply::Text(_))),
        "{replies:?}"
    );

    let submissions = api.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].throw_id, "throw-1");
    assert_eq!(submissions[0].bet_plays.len(), 1);
    assert_eq!(submissions[0].bet_plays[0].moves.len(), 2);
    assert_eq!(submissions[0].total().unwrap(), Amount::from_units(17));

    assert!(session.composer().plays().is_empty());
    assert!(session.composer().draft().is_empty());
}

#[tokio::test]
async fn test_auto_advance_closes_centena() {
    let (mut session, _api) = session(SubmitBehavior::Accept).await;
    run(&mut session, &["123", "4"]).await;
    assert_eq!(session.composer().draft().tokens(), &["123", "4"]);
}

#[tokio::test]
async fn test_throw_closed_keeps_session() {
    let (mut session, api) = session(SubmitBehavior::ThrowClosed).await;
    run(
        &mut session,
        &["7,8", "toggle parlet", "tab parlet", "3", "separate", "9", "enter"],
    )
    .await;

    let reply = session.handle_line("send").await;
    match reply {
        Reply::Error(text) => assert!(text.contains("BUSINESS_THROW_CLOSED")),
        other => panic!("unexpected {other:?}"),
    }
    assert!(api.submissions().is_empty());
    assert_eq!(session.composer().plays().len(), 1);
    assert_eq!(session.composer().draft().tokens(), &["9"]);
}

#[tokio::test]
async fn test_session_expired_ends_session_and_keeps_bet() {
    let (mut session, api) = session(SubmitBehavior::SessionExpired).await;
    run(&mut session, &["7", "toggle fijo", "tab fijo", "1"]).await;

    match session.handle_line("send").await {
        Reply::SessionExpired(text) => assert!(text.contains("SESSION_EXPIRED")),
        other => panic!("unexpected {other:?}"),
    }
    assert!(api.submissions().is_empty());
    assert_eq!(session.composer().draft().tokens(), &["7"]);
    assert_eq!(
        session.composer().current_amount().unwrap(),
        Amount::from_units(1)
    );
}

#[tokio::test]
async fn test_failed_keypad_line_leaves_draft_unchanged() {
    let (mut session, _api) = session(SubmitBehavior::Accept).await;
    run(&mut session, &["5", "al"]).await;
    let before = session.composer().draft().clone();

    match session.handle_line("15,7").await {
        Reply::Error(text) => assert!(text.contains("VALIDATION_AL_RANGE")),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(session.composer().draft(), &before);
    assert_eq!(session.composer().draft().tokens(), &["5"]);
    assert!(session.composer().draft().al_mode().active);

    run(&mut session, &["9", "enter"]).await;
    assert_eq!(
        session.composer().draft().tokens(),
        &["5", "6", "7", "8", "9"]
    );
}

#[tokio::test]
async fn test_validation_errors_surface() {
    let (mut session, _api) = session(SubmitBehavior::Accept).await;

    match session.handle_line("toggle parlet").await {
        Reply::Error(text) => assert!(text.contains("VALIDATION_PLAY_TYPE_UNAVAILABLE")),
        other => panic!("unexpected {other:?}"),
    }
    match session.handle_line("al").await {
        Reply::Error(text) => assert!(text.contains("VALIDATION_AL_TOKEN_COUNT")),
        other => panic!("unexpected {other:?}"),
    }
    match session.handle_line("send").await {
        Reply::Error(text) => assert!(text.contains("VALIDATION_NOTHING_TO_SUBMIT")),
        other => panic!("unexpected {other:?}"),
    }
    match session.handle_line("bogus").await {
        Reply::Error(text) => assert!(text.contains("VALIDATION_UNKNOWN_COMMAND")),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(session.handle_line("quit").await, Reply::Quit);
}

#[tokio::test]
async fn test_edit_and_remove_by_position() {
    let (mut session, _api) = session(SubmitBehavior::Accept).await;
    run(
        &mut session,
        &["7", "toggle corrido", "tab corrido", "2", "separate"],
    )
    .await;
    run(
        &mut session,
        &["8", "toggle fijo", "tab fijo", "3", "separate"],
    )
    .await;
    assert_eq!(session.composer().plays().len(), 2);

    session.handle_line("edit 1").await;
    assert_eq!(session.composer().plays().len(), 1);
    assert_eq!(session.composer().draft().selected_types(), &[PlayType::Corrido]);

    session.handle_line("remove 1").await;
    assert!(session.composer().plays().is_empty());
    assert!(matches!(session.handle_line("remove 3").await, Reply::Error(_)));
}
