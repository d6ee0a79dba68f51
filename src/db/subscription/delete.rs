use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;

// Usage history goes with it via ON DELETE CASCADE.
pub async fn delete_subscription(subscription_id: Uuid, postgres: PgPool) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
        .bind(subscription_id)
        .execute(&postgres)
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete subscription: {}", e)))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Subscription {} not found",
            subscription_id
        )));
    }

    tracing::info!("Deleted subscription {}", subscription_id);

    Ok(())
}
