use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Monday of an ISO week. Ratings are keyed on this value, not on raw
/// dates, so one rating per subscription per week holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekStart(NaiveDate);

impl WeekStart {
    pub fn of(date: NaiveDate) -> Self {
        let days_since_monday = date.weekday().num_days_from_monday() as i64;
        WeekStart(date - Duration::days(days_since_monday))
    }

    pub fn current() -> Self {
        Self::of(Utc::now().date_naive())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    // Callback payloads carry the week as %Y-%m-%d.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| AppError::Validation(format!("Invalid week start '{}': {}", raw, e)))?;
        Ok(Self::of(date))
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

pub fn weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_weeks().max(0)
}
