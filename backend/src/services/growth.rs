//! Period-over-period growth against a fixed baseline.

use crate::config::Baseline;

use super::metrics::AggregateMetrics;

/// Growth of the headline totals, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrowthRates {
    pub views_pct: f64,
    pub revenue_pct: f64,
}

/// Signed percentage change of `current` against `baseline`.
///
/// A zero (or negative, or non-finite) baseline has no meaningful ratio and
/// yields 0.
pub fn growth_pct(current: f64, baseline: f64) -> f64 {
    if baseline > 0.0 && baseline.is_finite() && current.is_finite() {
        (current - baseline) / baseline * 100.0
    } else {
        0.0
    }
}

pub fn compute_growth(metrics: &AggregateMetrics, baseline: Baseline) -> GrowthRates {
    GrowthRates {
        views_pct: growth_pct(metrics.total_views as f64, baseline.views),
        revenue_pct: growth_pct(metrics.total_revenue, baseline.revenue),
    }
}
