use sqlx::PgPool;

use crate::errors::AppError;

// Schema bootstrap, run once at startup. Range checks mirror the input
// validation so bad writes cannot land even through a future code path.
pub async fn init_db(postgres: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS subscriptions (
            id UUID PRIMARY KEY,
            user_id BIGINT NOT NULL,
            service_name TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
            category TEXT NOT NULL,
            importance INTEGER NOT NULL DEFAULT 5 CHECK (importance BETWEEN 1 AND 10),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to create subscriptions table: {}", e)))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_subscriptions_user ON subscriptions (user_id)")
        .execute(postgres)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create user index: {}", e)))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS usage_history (
            id UUID PRIMARY KEY,
            subscription_id UUID NOT NULL REFERENCES subscriptions (id) ON DELETE CASCADE,
            week_start DATE NOT NULL,
            usage_score INTEGER NOT NULL CHECK (usage_score BETWEEN 1 AND 10),
            recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (subscription_id, week_start)
        )",
    )
    .execute(postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to create usage_history table: {}", e)))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS survey_runs (
            week_start DATE PRIMARY KEY,
            completed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(postgres)
    .await
    .map_err(|e| AppError::Database(format!("Failed to create survey_runs table: {}", e)))?;

    tracing::info!("Database schema ready");

    Ok(())
}
