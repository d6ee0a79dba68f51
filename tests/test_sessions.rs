use chrono::Duration;
use subtrack_be::models::WeekStart;
use subtrack_be::state::{NewSubscriptionDraft, SessionKind, SurveySessions};
use subtrack_be::survey::parse_scale_value;
use uuid::Uuid;

#[test]
fn test_scale_parser_accepts_the_full_range() {
    for value in 1..=10 {
        assert_eq!(parse_scale_value(&value.to_string()).unwrap(), value);
    }

    // Whitespace around the number is fine.
    assert_eq!(parse_scale_value(" 5 ").unwrap(), 5);
}

#[test]
fn test_scale_parser_rejects_out_of_range_and_junk() {
    assert!(parse_scale_value("0").is_err());
    assert!(parse_scale_value("11").is_err());
    assert!(parse_scale_value("-3").is_err());
    assert!(parse_scale_value("7.5").is_err());
    assert!(parse_scale_value("ten").is_err());
    assert!(parse_scale_value("").is_err());
}

#[tokio::test]
async fn test_begin_and_get_session() {
    let sessions = SurveySessions::default();
    let subscription_id = Uuid::new_v4();

    sessions
        .begin(7, SessionKind::AwaitingImportance { subscription_id })
        .await;

    let session = sessions.get(7).await.expect("session should exist");
    assert!(matches!(
        session.kind,
        SessionKind::AwaitingImportance { subscription_id: id } if id == subscription_id
    ));

    assert!(sessions.get(8).await.is_none());
}

#[tokio::test]
async fn test_new_session_replaces_pending_one() {
    let sessions = SurveySessions::default();
    let first = Uuid::new_v4();

    sessions
        .begin(7, SessionKind::AwaitingImportance { subscription_id: first })
        .await;
    sessions
        .begin(
            7,
            SessionKind::AwaitingRating {
                subscription_id: Uuid::new_v4(),
                week: WeekStart::current(),
                survey_message: None,
            },
        )
        .await;

    let session = sessions.get(7).await.expect("session should exist");
    assert!(matches!(session.kind, SessionKind::AwaitingRating { .. }));
}

#[tokio::test]
async fn test_clear_removes_session() {
    let sessions = SurveySessions::default();

    sessions
        .begin(
            7,
            SessionKind::AddingSubscription(NewSubscriptionDraft::default()),
        )
        .await;

    assert!(sessions.clear(7).await.is_some());
    assert!(sessions.get(7).await.is_none());
    assert!(sessions.clear(7).await.is_none());
}

#[tokio::test]
async fn test_update_advances_dialog_in_place() {
    let sessions = SurveySessions::default();

    sessions
        .begin(
            7,
            SessionKind::AddingSubscription(NewSubscriptionDraft::default()),
        )
        .await;

    let draft = NewSubscriptionDraft {
        service_name: Some("Netflix".to_string()),
        price: Some(15.0),
        category: None,
    };
    sessions
        .update(7, SessionKind::AddingSubscription(draft))
        .await;

    let session = sessions.get(7).await.expect("session should exist");
    match session.kind {
        SessionKind::AddingSubscription(draft) => {
            assert_eq!(draft.service_name.as_deref(), Some("Netflix"));
            assert_eq!(draft.price, Some(15.0));
            assert_eq!(draft.category, None);
        }
        other => panic!("Unexpected session kind: {:?}", other),
    }
}

#[tokio::test]
async fn test_sweep_evicts_only_expired_sessions() {
    let sessions = SurveySessions::default();

    sessions
        .begin(
            7,
            SessionKind::AddingSubscription(NewSubscriptionDraft::default()),
        )
        .await;

    // A generous TTL keeps the fresh session alive.
    sessions.sweep_expired(Duration::hours(1)).await;
    assert!(sessions.get(7).await.is_some());

    // A zero TTL expires everything started before the sweep.
    sessions.sweep_expired(Duration::zero()).await;
    assert!(sessions.get(7).await.is_none());
}
