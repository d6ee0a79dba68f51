use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::subscription::get::get_subscription,
    errors::AppError,
    models::{UsageRecord, WeekStart},
};

// Idempotent by (subscription_id, week_start): re-rating the same week
// overwrites the previous score, last write wins.
pub async fn upsert_usage(
    subscription_id: Uuid,
    week: WeekStart,
    usage_score: i32,
    postgres: PgPool,
) -> Result<UsageRecord, AppError> {
    if !(1..=10).contains(&usage_score) {
        return Err(AppError::Validation(
            "Usage score must be a number from 1 to 10.".into(),
        ));
    }

    // Surfaces NotFound instead of a raw foreign key violation.
    get_subscription(subscription_id, postgres.clone()).await?;

    let record = sqlx::query_as::<_, UsageRecord>(
        "INSERT INTO usage_history (id, subscription_id, week_start, usage_score)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (subscription_id, week_start)
        DO UPDATE SET usage_score = EXCLUDED.usage_score, recorded_at = NOW()
        RETURNING id, subscription_id, week_start, usage_score, recorded_at",
    )
    .bind(Uuid::new_v4())
    .bind(subscription_id)
    .bind(week.date())
    .bind(usage_score)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to save usage score: {}", e)))?;

    tracing::debug!(
        "Usage score {} recorded for subscription {} week {}",
        usage_score,
        subscription_id,
        week
    );

    Ok(record)
}
