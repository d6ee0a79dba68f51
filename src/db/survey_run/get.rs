use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{errors::AppError, models::WeekStart};

// The fired-week marker keeps a restart inside the trigger window from
// fanning out the same survey twice.
pub async fn survey_already_sent(week: WeekStart, postgres: PgPool) -> Result<bool, AppError> {
    let row = sqlx::query_scalar::<_, NaiveDate>(
        "SELECT week_start FROM survey_runs WHERE week_start = $1",
    )
    .bind(week.date())
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to check survey run: {}", e)))?;

    Ok(row.is_some())
}
