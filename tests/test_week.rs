use chrono::{Duration, NaiveDate};
use subtrack_be::models::WeekStart;
use subtrack_be::models::week::weeks_between;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_monday_maps_to_itself() {
    // 2025-06-02 is a Monday
    let monday = date(2025, 6, 2);
    assert_eq!(WeekStart::of(monday).date(), monday);
}

#[test]
fn test_every_weekday_maps_to_its_monday() {
    let monday = date(2025, 6, 2);
    for offset in 0..7 {
        let day = monday + Duration::days(offset);
        assert_eq!(WeekStart::of(day).date(), monday);
    }

    // The following Monday starts a new week.
    let next_monday = monday + Duration::days(7);
    assert_eq!(WeekStart::of(next_monday).date(), next_monday);
}

#[test]
fn test_canonicalization_is_idempotent() {
    let week = WeekStart::of(date(2025, 6, 5));
    assert_eq!(WeekStart::of(week.date()), week);
}

#[test]
fn test_display_and_parse_round_trip() {
    let week = WeekStart::of(date(2025, 6, 4));
    assert_eq!(week.to_string(), "2025-06-02");
    assert_eq!(WeekStart::parse("2025-06-02").unwrap(), week);

    // A non-Monday payload still canonicalizes to the same week.
    assert_eq!(WeekStart::parse("2025-06-04").unwrap(), week);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(WeekStart::parse("not-a-date").is_err());
    assert!(WeekStart::parse("2025-13-40").is_err());
    assert!(WeekStart::parse("").is_err());
}

#[test]
fn test_weeks_between() {
    let base = date(2025, 6, 2);

    assert_eq!(weeks_between(base, base), 0);
    assert_eq!(weeks_between(base, base + Duration::days(6)), 0);
    assert_eq!(weeks_between(base, base + Duration::days(7)), 1);
    assert_eq!(weeks_between(base, base + Duration::days(28)), 4);

    // Clamped, never negative.
    assert_eq!(weeks_between(base + Duration::days(14), base), 0);
}
