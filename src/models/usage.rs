use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub id: Uuid,
    pub subscription_id: Uuid,
    pub week_start: NaiveDate,
    pub usage_score: i32,
    pub recorded_at: DateTime<Utc>,
}

// Per-subscription usage recency, the input to unused detection.
#[derive(Debug, Clone, FromRow)]
pub struct LastUsage {
    pub id: Uuid,
    pub service_name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub last_rated_week: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedSubscription {
    pub id: Uuid,
    pub service_name: String,
    pub price: f64,
    pub last_rated_week: Option<NaiveDate>,
    pub weeks_unused: i64,
}
