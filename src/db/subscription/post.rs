use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{Subscription, subscription::is_known_category},
};

pub async fn add_subscription(
    user_id: i64,
    service_name: String,
    price: f64,
    category: String,
    importance: i32,
    postgres: PgPool,
) -> Result<Subscription, AppError> {
    // !(price >= 0.0) also rejects NaN
    if !(price >= 0.0) {
        return Err(AppError::Validation(
            "Price must be a non-negative number.".into(),
        ));
    }

    if !is_known_category(&category) {
        return Err(AppError::Validation(format!(
            "Unknown category '{}'. Pick one of the listed categories.",
            category
        )));
    }

    if !(1..=10).contains(&importance) {
        return Err(AppError::Validation(
            "Importance must be a number from 1 to 10.".into(),
        ));
    }

    let subscription = sqlx::query_as::<_, Subscription>(
        "INSERT INTO subscriptions (id, user_id, service_name, price, category, importance)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, service_name, price, category, importance, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&service_name)
    .bind(price)
    .bind(&category)
    .bind(importance)
    .fetch_one(&postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to add subscription: {}", e)))?;

    tracing::info!(
        "Added subscription '{}' ({}) for user {}",
        subscription.service_name,
        subscription.id,
        user_id
    );

    Ok(subscription)
}
