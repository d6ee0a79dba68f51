use chrono::NaiveDate;

use crate::models::{LastUsage, UnusedSubscription, week::weeks_between};

// A subscription is unused once `weeks_threshold` whole weeks have passed
// since the later of its last rated week and its creation date. Never-rated
// subscriptions age from creation, so a fresh subscription is not flagged
// before the user had a chance to rate it.
pub fn flag_unused(
    rows: &[LastUsage],
    today: NaiveDate,
    weeks_threshold: i64,
) -> Vec<UnusedSubscription> {
    rows.iter()
        .filter_map(|row| {
            let created = row.created_at.date_naive();
            let baseline = match row.last_rated_week {
                Some(week) => week.max(created),
                None => created,
            };

            let weeks_unused = weeks_between(baseline, today);
            if weeks_unused < weeks_threshold {
                return None;
            }

            Some(UnusedSubscription {
                id: row.id,
                service_name: row.service_name.clone(),
                price: row.price,
                last_rated_week: row.last_rated_week,
                weeks_unused,
            })
        })
        .collect()
}
