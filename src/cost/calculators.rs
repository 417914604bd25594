//! Derived cost figures: non-productive time and contingency.

/// Slider bounds for the contingency percentage.
pub const CONTINGENCY_MIN_PCT: f64 = 0.0;
pub const CONTINGENCY_MAX_PCT: f64 = 50.0;
pub const DEFAULT_CONTINGENCY_PCT: f64 = 10.0;
pub const DEFAULT_BASE_COST: f64 = 1_000_000.0;

/// Cost of rig downtime.
pub fn npt_cost(npt_hours: f64, rig_hourly_rate: f64) -> f64 {
    npt_hours * rig_hourly_rate
}

/// Contingency reserve for a base cost. The percentage is clamped to the slider range.
pub fn contingency_cost(base_cost: f64, percentage: f64) -> f64 {
    let pct = percentage.clamp(CONTINGENCY_MIN_PCT, CONTINGENCY_MAX_PCT);
    base_cost * pct / 100.0
}

pub fn total_with_contingency(base_cost: f64, percentage: f64) -> f64 {
    base_cost + contingency_cost(base_cost, percentage)
}
