use chrono::Local;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    analysis::unused::flag_unused,
    errors::AppError,
    models::{LastUsage, UnusedSubscription, WeekStart, subscription},
};

// Mean of the most recent `window_weeks` distinct rated weeks; None when
// the subscription has never been rated.
pub async fn average_usage(
    subscription_id: Uuid,
    window_weeks: i64,
    postgres: PgPool,
) -> Result<Option<f64>, AppError> {
    sqlx::query_scalar::<_, Option<f64>>(
        "SELECT AVG(usage_score)::DOUBLE PRECISION
        FROM (
            SELECT usage_score
            FROM usage_history
            WHERE subscription_id = $1
            ORDER BY week_start DESC
            LIMIT $2
        ) recent",
    )
    .bind(subscription_id)
    .bind(window_weeks)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to compute average usage: {}", e)))
}

pub async fn is_rated(
    subscription_id: Uuid,
    week: WeekStart,
    postgres: PgPool,
) -> Result<Option<i32>, AppError> {
    sqlx::query_scalar::<_, i32>(
        "SELECT usage_score FROM usage_history WHERE subscription_id = $1 AND week_start = $2",
    )
    .bind(subscription_id)
    .bind(week.date())
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to check rating: {}", e)))
}

pub async fn rated_subscription_ids(
    user_id: i64,
    week: WeekStart,
    postgres: PgPool,
) -> Result<Vec<Uuid>, AppError> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT h.subscription_id
        FROM usage_history h
        JOIN subscriptions s ON s.id = h.subscription_id
        WHERE s.user_id = $1 AND h.week_start = $2",
    )
    .bind(user_id)
    .bind(week.date())
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to fetch rated subscriptions: {}", e)))
}

// Recency rows for unused detection; utilities never count as unused.
pub async fn last_rated_weeks(user_id: i64, postgres: PgPool) -> Result<Vec<LastUsage>, AppError> {
    sqlx::query_as::<_, LastUsage>(
        "SELECT s.id, s.service_name, s.price, s.created_at, MAX(h.week_start) AS last_rated_week
        FROM subscriptions s
        LEFT JOIN usage_history h ON h.subscription_id = s.id
        WHERE s.user_id = $1 AND s.category <> $2
        GROUP BY s.id, s.service_name, s.price, s.created_at",
    )
    .bind(user_id)
    .bind(subscription::EXCLUDED_CATEGORY)
    .fetch_all(&postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to fetch usage recency: {}", e)))
}

pub async fn unused_subscriptions(
    user_id: i64,
    weeks_threshold: i64,
    postgres: PgPool,
) -> Result<Vec<UnusedSubscription>, AppError> {
    let rows = last_rated_weeks(user_id, postgres).await?;
    Ok(flag_unused(&rows, Local::now().date_naive(), weeks_threshold))
}
