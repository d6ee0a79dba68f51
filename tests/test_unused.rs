use chrono::{Duration, NaiveDate, TimeZone, Utc};
use subtrack_be::analysis::{UNUSED_WEEKS_THRESHOLD, unused::flag_unused};
use subtrack_be::models::LastUsage;
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn row(created: NaiveDate, last_rated_week: Option<NaiveDate>) -> LastUsage {
    LastUsage {
        id: Uuid::new_v4(),
        service_name: "Service".to_string(),
        price: 9.99,
        created_at: Utc.from_utc_datetime(&created.and_hms_opt(12, 0, 0).unwrap()),
        last_rated_week,
    }
}

#[test]
fn test_fresh_subscription_is_not_flagged() {
    let created = today() - Duration::days(2);
    let flagged = flag_unused(&[row(created, None)], today(), UNUSED_WEEKS_THRESHOLD);
    assert!(flagged.is_empty());
}

#[test]
fn test_never_rated_subscription_ages_from_creation() {
    let created = today() - Duration::weeks(4);
    let flagged = flag_unused(&[row(created, None)], today(), UNUSED_WEEKS_THRESHOLD);

    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].weeks_unused, 4);
    assert_eq!(flagged[0].last_rated_week, None);
}

#[test]
fn test_threshold_is_inclusive() {
    let at_threshold = today() - Duration::weeks(3);
    let just_under = today() - Duration::days(20);

    assert_eq!(
        flag_unused(&[row(at_threshold, None)], today(), UNUSED_WEEKS_THRESHOLD).len(),
        1
    );
    assert!(flag_unused(&[row(just_under, None)], today(), UNUSED_WEEKS_THRESHOLD).is_empty());
}

#[test]
fn test_recent_rating_keeps_subscription_off_the_list() {
    let created = today() - Duration::weeks(20);
    let last_rated = today() - Duration::weeks(1);

    let flagged = flag_unused(
        &[row(created, Some(last_rated))],
        today(),
        UNUSED_WEEKS_THRESHOLD,
    );
    assert!(flagged.is_empty());
}

#[test]
fn test_stale_rating_is_flagged_with_its_week() {
    let created = today() - Duration::weeks(20);
    let last_rated = today() - Duration::weeks(5);

    let flagged = flag_unused(
        &[row(created, Some(last_rated))],
        today(),
        UNUSED_WEEKS_THRESHOLD,
    );

    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].weeks_unused, 5);
    assert_eq!(flagged[0].last_rated_week, Some(last_rated));
}

#[test]
fn test_baseline_is_the_later_of_rating_and_creation() {
    // A rating older than the creation date must not make the
    // subscription look older than it is.
    let created = today() - Duration::weeks(1);
    let last_rated = today() - Duration::weeks(10);

    let flagged = flag_unused(
        &[row(created, Some(last_rated))],
        today(),
        UNUSED_WEEKS_THRESHOLD,
    );
    assert!(flagged.is_empty());
}

#[test]
fn test_mixed_rows_only_flag_offenders() {
    let rows = vec![
        row(today() - Duration::days(2), None),
        row(today() - Duration::weeks(6), None),
        row(today() - Duration::weeks(6), Some(today() - Duration::weeks(1))),
    ];

    let flagged = flag_unused(&rows, today(), UNUSED_WEEKS_THRESHOLD);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].id, rows[1].id);
    assert_eq!(flagged[0].weeks_unused, 6);
}
