use chrono::Utc;
use subtrack_be::analysis::scorer::{
    analyze, classify, cost_per_unit, monthly_forecast, score_subscription, waste_share,
};
use subtrack_be::models::{SubscriptionWithUsage, Tier};
use uuid::Uuid;

fn sub(price: f64, importance: i32, avg_usage: Option<f64>) -> SubscriptionWithUsage {
    SubscriptionWithUsage {
        id: Uuid::new_v4(),
        user_id: 1,
        service_name: "Service".to_string(),
        price,
        category: "Streaming".to_string(),
        importance,
        created_at: Utc::now(),
        avg_usage,
    }
}

#[test]
fn test_expensive_barely_used_lands_in_high() {
    // 1000 / (8 * 2) = 62.5
    let cpu = cost_per_unit(1000.0, 8, 2.0).unwrap();
    assert_eq!(cpu, 62.5);
    assert_eq!(classify(cpu), Tier::High);
    assert_eq!(waste_share(Tier::High, 1000.0), 500.0);

    let rec = score_subscription(&sub(1000.0, 8, Some(2.0)));
    assert_eq!(rec.tier, Tier::High);
    assert_eq!(rec.cost_per_unit, Some(62.5));
    assert_eq!(rec.waste, 500.0);
}

#[test]
fn test_cheap_heavily_used_is_optimal() {
    // 500 / (9 * 9) ≈ 6.17
    let cpu = cost_per_unit(500.0, 9, 9.0).unwrap();
    assert!((cpu - 6.1728).abs() < 0.001);
    assert_eq!(classify(cpu), Tier::Optimal);

    let rec = score_subscription(&sub(500.0, 9, Some(9.0)));
    assert_eq!(rec.tier, Tier::Optimal);
    assert_eq!(rec.waste, 0.0);
}

#[test]
fn test_no_usage_data_means_no_data_tier() {
    // Price and importance are irrelevant without ratings.
    for (price, importance) in [(0.0, 1), (5000.0, 1), (5000.0, 10), (10.0, 5)] {
        let rec = score_subscription(&sub(price, importance, None));
        assert_eq!(rec.tier, Tier::NoData);
        assert_eq!(rec.cost_per_unit, None);
        assert_eq!(rec.waste, 0.0);
    }
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(classify(0.0), Tier::Optimal);
    assert_eq!(classify(30.0), Tier::Optimal);
    assert_eq!(classify(30.01), Tier::Moderate);
    assert_eq!(classify(50.0), Tier::Moderate);
    assert_eq!(classify(50.01), Tier::High);
    assert_eq!(classify(100.0), Tier::High);
    assert_eq!(classify(100.01), Tier::Critical);
}

#[test]
fn test_waste_shares_per_tier() {
    assert_eq!(waste_share(Tier::NoData, 100.0), 0.0);
    assert_eq!(waste_share(Tier::Optimal, 100.0), 0.0);
    assert_eq!(waste_share(Tier::Moderate, 100.0), 20.0);
    assert_eq!(waste_share(Tier::High, 100.0), 50.0);
    assert_eq!(waste_share(Tier::Critical, 100.0), 100.0);
}

#[test]
fn test_cost_per_unit_monotonicity() {
    // Non-increasing in usage.
    let mut previous = f64::MAX;
    for usage in 1..=10 {
        let cpu = cost_per_unit(800.0, 5, usage as f64).unwrap();
        assert!(cpu <= previous);
        previous = cpu;
    }

    // Non-increasing in importance.
    let mut previous = f64::MAX;
    for importance in 1..=10 {
        let cpu = cost_per_unit(800.0, importance, 5.0).unwrap();
        assert!(cpu <= previous);
        previous = cpu;
    }

    // Non-decreasing in price.
    let mut previous = 0.0;
    for price in [0.0, 10.0, 99.9, 500.0, 2500.0] {
        let cpu = cost_per_unit(price, 5, 5.0).unwrap();
        assert!(cpu >= previous);
        previous = cpu;
    }
}

#[test]
fn test_cost_per_unit_guards_zero_factors() {
    assert!(cost_per_unit(100.0, 0, 5.0).is_none());
    assert!(cost_per_unit(100.0, 5, 0.0).is_none());
}

#[test]
fn test_report_total_is_sum_of_entries() {
    let subs = vec![
        sub(1000.0, 8, Some(2.0)),  // High -> 500
        sub(100.0, 1, Some(10.0)),  // 10.0 -> Optimal -> 0
        sub(200.0, 1, Some(5.0)),   // 40.0 -> Moderate -> 40
        sub(2000.0, 2, Some(2.0)),  // 500.0 -> Critical -> 2000
        sub(50.0, 5, None),         // NoData -> 0
    ];

    let report = analyze(&subs);
    assert_eq!(report.recommendations.len(), 5);

    let sum: f64 = report.recommendations.iter().map(|r| r.waste).sum();
    assert_eq!(report.total_waste, sum);
    assert_eq!(report.total_waste, 2540.0);
}

#[test]
fn test_report_is_sorted_worst_first() {
    let subs = vec![
        sub(100.0, 1, Some(10.0)), // Optimal
        sub(2000.0, 2, Some(2.0)), // Critical
        sub(50.0, 5, None),        // NoData
        sub(1000.0, 8, Some(2.0)), // High
        sub(200.0, 1, Some(5.0)),  // Moderate
    ];

    let report = analyze(&subs);
    let tiers: Vec<Tier> = report.recommendations.iter().map(|r| r.tier).collect();
    assert_eq!(
        tiers,
        vec![
            Tier::Critical,
            Tier::High,
            Tier::Moderate,
            Tier::Optimal,
            Tier::NoData
        ]
    );
}

#[test]
fn test_report_keeps_input_order_within_a_tier() {
    let first = sub(2000.0, 2, Some(2.0));
    let second = sub(3000.0, 2, Some(2.0));
    let report = analyze(&[first.clone(), second.clone()]);

    assert_eq!(report.recommendations[0].subscription_id, first.id);
    assert_eq!(report.recommendations[1].subscription_id, second.id);
}

#[test]
fn test_monthly_forecast() {
    let subs = vec![
        sub(10.0, 5, None),
        sub(15.5, 5, None),
        sub(4.5, 5, None),
    ];

    let (monthly, yearly) = monthly_forecast(&subs);
    assert_eq!(monthly, 30.0);
    assert_eq!(yearly, 360.0);

    let (monthly, yearly) = monthly_forecast(&[]);
    assert_eq!(monthly, 0.0);
    assert_eq!(yearly, 0.0);
}
