use serde::{Deserialize, Serialize};

use crate::api::{CreatorId, RangeId};

// =========================================================
// Snapshot types
// =========================================================

/// Where the records behind a result came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    /// The source failed or timed out and the synthetic dataset was used.
    Fallback,
}

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    /// Bar height relative to the largest bucket, floored at the visible minimum.
    pub height_pct: f64,
}

/// Y-axis reference values, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub top: f64,
    pub middle: f64,
    pub bottom: f64,
}

/// An ordered (oldest first) chart with its axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub axis: AxisLabels,
}

impl ChartSeries {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn heights(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.height_pct).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Engagement summary with the growth delta of each metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub engagement_rate_pct: f64,
    pub watch_time_pct: f64,
    pub comments: u64,
    pub shares: u64,
    pub engagement_change_pct: f64,
    pub watch_time_change_pct: f64,
    pub comments_change_pct: f64,
    pub shares_change_pct: f64,
}

/// Earnings split into ad / premium-currency / standard-currency shares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    pub ad_amount: f64,
    pub premium_amount: f64,
    pub standard_amount: f64,
    pub ad_pct: f64,
    pub premium_pct: f64,
    pub standard_pct: f64,
}

impl RevenueBreakdown {
    pub fn amount_total(&self) -> f64 {
        self.ad_amount + self.premium_amount + self.standard_amount
    }

    pub fn pct_total(&self) -> f64 {
        self.ad_pct + self.premium_pct + self.standard_pct
    }
}

/// Complete aggregated analytics for one creator and window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub creator_id: CreatorId,
    pub range: RangeId,
    pub source: DataSource,
    /// Records that fell inside the window.
    pub record_count: usize,
    pub total_views: u64,
    pub total_revenue: f64,
    pub total_likes: u64,
    pub views_growth_pct: f64,
    pub revenue_growth_pct: f64,
    pub views_series: ChartSeries,
    pub revenue_series: ChartSeries,
    pub engagement_metrics: EngagementMetrics,
    pub revenue_breakdown: RevenueBreakdown,
}
