use sqlx::PgPool;

use crate::{errors::AppError, models::WeekStart};

pub async fn mark_survey_sent(week: WeekStart, postgres: PgPool) -> Result<(), AppError> {
    sqlx::query("INSERT INTO survey_runs (week_start) VALUES ($1) ON CONFLICT (week_start) DO NOTHING")
        .bind(week.date())
        .execute(&postgres)
        .await
        .map_err(|e| AppError::Database(format!("Failed to mark survey run: {}", e)))?;

    tracing::info!("Marked weekly survey as sent for week {}", week);

    Ok(())
}
