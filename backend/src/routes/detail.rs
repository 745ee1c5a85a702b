use serde::{Deserialize, Serialize};

use super::snapshot::{ChartSeries, DataSource, RevenueBreakdown};
use crate::api::ContentRecord;

// =========================================================
// Content detail types
// =========================================================

/// A labelled percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentShare {
    pub label: String,
    pub pct: f64,
}

/// Age and gender distributions; each group sums to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicBreakdown {
    pub age: Vec<PercentShare>,
    pub gender: Vec<PercentShare>,
}

/// Derived per-content indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentKpis {
    pub earnings_per_view: f64,
    /// Signed difference from the industry earnings per view, in percent
    /// (positive means above average).
    pub earnings_vs_industry_pct: f64,
    pub like_rate_pct: f64,
    pub comment_rate_pct: f64,
    /// Shares per view in percent (viral coefficient).
    pub share_rate_pct: f64,
    /// Views per day since publication.
    pub view_velocity: f64,
    pub composite_quality_score: f64,
}

/// Reconstruction check of a revenue split.
///
/// Reports whether the split adds back up to the expected total; never
/// corrects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitValidation {
    pub calculated_total: f64,
    pub expected_total: f64,
    pub percentage_total: f64,
    pub is_valid: bool,
}

/// Everything shown for a single piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetail {
    pub record: ContentRecord,
    pub source: DataSource,
    pub kpis: ContentKpis,
    pub demographics: DemographicBreakdown,
    /// Top countries followed by an "Others" remainder.
    pub locations: Vec<PercentShare>,
    pub earnings_timeline: ChartSeries,
    pub revenue_split: RevenueBreakdown,
    pub split_validation: SplitValidation,
}
