use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const CATEGORIES: [&str; 7] = [
    "Streaming",
    "Music",
    "Cloud",
    "Education",
    "Fitness",
    "Utilities",
    "Other",
];

// Utility bills are due whether or not the service was "used", so surveys
// and unused detection skip this category.
pub const EXCLUDED_CATEGORY: &str = "Utilities";

pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: i64,
    pub service_name: String,
    pub price: f64,
    pub category: String,
    pub importance: i32,
    pub created_at: DateTime<Utc>,
}

// Subscription row joined with its rolling usage average; `avg_usage` is
// None when no week has been rated yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionWithUsage {
    pub id: Uuid,
    pub user_id: i64,
    pub service_name: String,
    pub price: f64,
    pub category: String,
    pub importance: i32,
    pub created_at: DateTime<Utc>,
    pub avg_usage: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriptionFilter {
    pub exclude_utilities: bool,
}
