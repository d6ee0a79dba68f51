pub mod scorer;
pub mod unused;

// Smoothing window for the usage average: one good or bad week must not
// dominate the recommendation.
pub const ROLLING_WINDOW_WEEKS: i64 = 4;

// Weeks without a rating before a subscription counts as unused.
pub const UNUSED_WEEKS_THRESHOLD: i64 = 3;
