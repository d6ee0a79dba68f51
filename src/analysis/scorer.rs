use crate::models::{EfficiencyReport, Recommendation, SubscriptionWithUsage, Tier};

// Cost per satisfaction unit: what one point of (importance × usage) costs
// per month. Every recommendation downstream derives from this number, so
// it stays a standalone function and never gets folded into rendering.
pub fn cost_per_unit(price: f64, importance: i32, avg_usage: f64) -> Option<f64> {
    if importance <= 0 || avg_usage <= 0.0 {
        return None;
    }
    Some(price / (importance as f64 * avg_usage))
}

pub fn classify(cost_per_unit: f64) -> Tier {
    if cost_per_unit <= 30.0 {
        Tier::Optimal
    } else if cost_per_unit <= 50.0 {
        Tier::Moderate
    } else if cost_per_unit <= 100.0 {
        Tier::High
    } else {
        Tier::Critical
    }
}

// Estimated monthly waste attributed to a subscription at a given tier.
pub fn waste_share(tier: Tier, price: f64) -> f64 {
    match tier {
        Tier::NoData | Tier::Optimal => 0.0,
        Tier::Moderate => price * 0.2,
        Tier::High => price * 0.5,
        Tier::Critical => price,
    }
}

pub fn score_subscription(subscription: &SubscriptionWithUsage) -> Recommendation {
    let (tier, cpu) = match subscription
        .avg_usage
        .and_then(|avg| cost_per_unit(subscription.price, subscription.importance, avg))
    {
        Some(cpu) => (classify(cpu), Some(cpu)),
        None => (Tier::NoData, None),
    };

    Recommendation {
        subscription_id: subscription.id,
        service_name: subscription.service_name.clone(),
        price: subscription.price,
        importance: subscription.importance,
        avg_usage: subscription.avg_usage,
        cost_per_unit: cpu,
        tier,
        waste: waste_share(tier, subscription.price),
    }
}

// Worst offenders first; the stable sort keeps input order within a tier.
pub fn analyze(subscriptions: &[SubscriptionWithUsage]) -> EfficiencyReport {
    let mut recommendations: Vec<Recommendation> =
        subscriptions.iter().map(score_subscription).collect();

    recommendations.sort_by(|a, b| b.tier.cmp(&a.tier));

    let total_waste = recommendations.iter().map(|r| r.waste).sum();

    EfficiencyReport {
        recommendations,
        total_waste,
    }
}

pub fn monthly_forecast(subscriptions: &[SubscriptionWithUsage]) -> (f64, f64) {
    let monthly: f64 = subscriptions.iter().map(|s| s.price).sum();
    (monthly, monthly * 12.0)
}
