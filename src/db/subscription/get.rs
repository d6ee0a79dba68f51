use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    analysis::ROLLING_WINDOW_WEEKS,
    errors::AppError,
    models::{Subscription, SubscriptionFilter, SubscriptionWithUsage, subscription},
};

pub async fn get_subscription(
    subscription_id: Uuid,
    postgres: PgPool,
) -> Result<Subscription, AppError> {
    sqlx::query_as::<_, Subscription>(
        "SELECT id, user_id, service_name, price, category, importance, created_at
        FROM subscriptions
        WHERE id = $1",
    )
    .bind(subscription_id)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to fetch subscription: {}", e)))?
    .ok_or_else(|| AppError::NotFound(format!("Subscription {} not found", subscription_id)))
}

// Rows come back with the rolling average over the most recent rated weeks
// joined in; avg_usage is NULL until the first rating lands.
pub async fn list_subscriptions(
    user_id: i64,
    filter: SubscriptionFilter,
    postgres: PgPool,
) -> Result<Vec<SubscriptionWithUsage>, AppError> {
    let mut query = String::from(
        "SELECT s.id, s.user_id, s.service_name, s.price, s.category, s.importance,
            s.created_at, recent.avg_usage
        FROM subscriptions s
        LEFT JOIN LATERAL (
            SELECT AVG(h.usage_score)::DOUBLE PRECISION AS avg_usage
            FROM (
                SELECT usage_score
                FROM usage_history
                WHERE subscription_id = s.id
                ORDER BY week_start DESC
                LIMIT $2
            ) h
        ) recent ON TRUE
        WHERE s.user_id = $1",
    );

    if filter.exclude_utilities {
        query.push_str(" AND s.category <> $3");
    }

    query.push_str(" ORDER BY s.created_at ASC");

    let mut rows = sqlx::query_as::<_, SubscriptionWithUsage>(&query)
        .bind(user_id)
        .bind(ROLLING_WINDOW_WEEKS);

    if filter.exclude_utilities {
        rows = rows.bind(subscription::EXCLUDED_CATEGORY);
    }

    rows.fetch_all(&postgres)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list subscriptions: {}", e)))
}

// Every user owning at least one subscription; the scheduler's fan-out set.
pub async fn distinct_user_ids(postgres: PgPool) -> Result<Vec<i64>, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT DISTINCT user_id FROM subscriptions")
        .fetch_all(&postgres)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch user ids: {}", e)))
}
