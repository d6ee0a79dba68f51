use serde::Serialize;
use uuid::Uuid;

// Severity buckets for the cost-per-unit metric, ordered so that sorting
// descending puts the worst offenders first and NoData last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Tier {
    NoData,
    Optimal,
    Moderate,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub subscription_id: Uuid,
    pub service_name: String,
    pub price: f64,
    pub importance: i32,
    pub avg_usage: Option<f64>,
    pub cost_per_unit: Option<f64>,
    pub tier: Tier,
    pub waste: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyReport {
    pub recommendations: Vec<Recommendation>,
    pub total_waste: f64,
}
