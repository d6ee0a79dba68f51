use sqlx::PgPool;
use uuid::Uuid;

use crate::{errors::AppError, models::Subscription};

pub async fn update_importance(
    subscription_id: Uuid,
    importance: i32,
    postgres: PgPool,
) -> Result<Subscription, AppError> {
    if !(1..=10).contains(&importance) {
        return Err(AppError::Validation(
            "Importance must be a number from 1 to 10.".into(),
        ));
    }

    let subscription = sqlx::query_as::<_, Subscription>(
        "UPDATE subscriptions
        SET importance = $2
        WHERE id = $1
        RETURNING id, user_id, service_name, price, category, importance, created_at",
    )
    .bind(subscription_id)
    .bind(importance)
    .fetch_optional(&postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to update importance: {}", e)))?
    .ok_or_else(|| AppError::NotFound(format!("Subscription {} not found", subscription_id)))?;

    tracing::info!(
        "Importance of '{}' ({}) set to {}",
        subscription.service_name,
        subscription.id,
        importance
    );

    Ok(subscription)
}
