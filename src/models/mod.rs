pub mod report;
pub mod subscription;
pub mod usage;
pub mod week;

pub use report::{EfficiencyReport, Recommendation, Tier};
pub use subscription::{Subscription, SubscriptionFilter, SubscriptionWithUsage};
pub use usage::{LastUsage, UnusedSubscription, UsageRecord};
pub use week::WeekStart;
