//! Time-series bucketing and bar-height normalization.
//!
//! Records are mapped onto the window's `bucket_count` ordered slots (oldest
//! first), summed per slot, and each slot's magnitude is converted into a bar
//! height relative to the largest slot.
//!
//! Two assignment strategies exist:
//!
//! - [`BucketingMode::Timestamp`] places a record by its age inside the window.
//! - [`BucketingMode::Positional`] deals records round-robin over the buckets
//!   in creation order and then scales each bucket by a seeded random factor in
//!   `1 ± jitter`. The chart looks like a trend but bucket `i` does not
//!   correspond to a real date; only the labels do.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::api::{AxisLabels, ChartPoint, ChartSeries, ContentRecord, TimeWindow};
use crate::config::EngineSettings;

/// How records are assigned to buckets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketingMode {
    #[default]
    Timestamp,
    Positional,
}

/// Bucketing parameters, usually taken from [`EngineSettings`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketSettings {
    pub mode: BucketingMode,
    pub min_height_pct: f64,
    pub jitter: f64,
    pub seed: u64,
}

impl Default for BucketSettings {
    fn default() -> Self {
        (&EngineSettings::default()).into()
    }
}

impl From<&EngineSettings> for BucketSettings {
    fn from(engine: &EngineSettings) -> Self {
        Self {
            mode: engine.bucketing,
            min_height_pct: engine.min_visible_height_pct,
            jitter: engine.jitter,
            seed: engine.jitter_seed,
        }
    }
}

/// Axis convention of a series.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AxisKind {
    /// Counts: `{max, (max + min) / 2, min}`.
    Count,
    /// Money: `{max, max / 2, 0}`, always anchored at zero.
    Currency,
}

/// Per-bucket sums for the two snapshot series.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketTotals {
    pub views: Vec<f64>,
    pub revenue: Vec<f64>,
}

/// Bucket index of every record (input order) by age within the window.
pub fn assign_by_timestamp(records: &[ContentRecord], window: &TimeWindow) -> Vec<usize> {
    records
        .iter()
        .map(|r| window.bucket_index_for(r.created_at))
        .collect()
}

/// Bucket index of every record (input order) dealt round-robin in creation order.
///
/// Records with equal timestamps keep their input order.
pub fn assign_positional(records: &[ContentRecord], bucket_count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by_key(|&i| records[i].created_at);

    let mut assignment = vec![0; records.len()];
    if bucket_count == 0 {
        return assignment;
    }
    for (position, &record_index) in order.iter().enumerate() {
        assignment[record_index] = position % bucket_count;
    }
    assignment
}

/// Sum a per-record value into `bucket_count` buckets.
pub fn sum_into_buckets(
    records: &[ContentRecord],
    assignment: &[usize],
    bucket_count: usize,
    value: impl Fn(&ContentRecord) -> f64,
) -> Vec<f64> {
    let mut buckets = vec![0.0; bucket_count];
    for (record, &index) in records.iter().zip(assignment) {
        if let Some(slot) = buckets.get_mut(index) {
            *slot += value(record);
        }
    }
    buckets
}

/// Scale every bucket by `1 + jitter * u`, `u` uniform in `[-1, 1]`.
fn apply_jitter(values: &mut [f64], rng: &mut StdRng, jitter: f64, decimals: i32) {
    let scale = 10f64.powi(decimals);
    for v in values.iter_mut() {
        let factor = 1.0 + jitter * rng.gen_range(-1.0..=1.0);
        *v = (*v * factor * scale).round() / scale;
    }
}

/// Views and revenue per bucket for a window.
pub fn bucket_totals(
    records: &[ContentRecord],
    window: &TimeWindow,
    settings: &BucketSettings,
) -> BucketTotals {
    let n = window.bucket_count;
    let assignment = match settings.mode {
        BucketingMode::Timestamp => assign_by_timestamp(records, window),
        BucketingMode::Positional => assign_positional(records, n),
    };

    let mut views = sum_into_buckets(records, &assignment, n, |r| r.views as f64);
    let mut revenue = sum_into_buckets(records, &assignment, n, |r| r.projected_earnings);

    if settings.mode == BucketingMode::Positional && settings.jitter > 0.0 {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        apply_jitter(&mut views, &mut rng, settings.jitter, 0);
        apply_jitter(&mut revenue, &mut rng, settings.jitter, 2);
    }

    BucketTotals { views, revenue }
}

/// Bar heights in percent of the largest value, floored at `floor_pct`.
///
/// With no positive value every bar sits at the floor.
pub fn normalize_heights(values: &[f64], floor_pct: f64) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    values
        .iter()
        .map(|&v| {
            let raw = if max > 0.0 { v / max * 100.0 } else { 0.0 };
            raw.clamp(0.0, 100.0).max(floor_pct)
        })
        .collect()
}

/// Y-axis reference values for a series.
pub fn axis_labels(values: &[f64], kind: AxisKind) -> AxisLabels {
    if values.is_empty() {
        return AxisLabels {
            top: 0.0,
            middle: 0.0,
            bottom: 0.0,
        };
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    match kind {
        AxisKind::Count => AxisLabels {
            top: max,
            middle: (max + min) / 2.0,
            bottom: min,
        },
        AxisKind::Currency => AxisLabels {
            top: max,
            middle: max / 2.0,
            bottom: 0.0,
        },
    }
}

/// Assemble a chart from labels and bucket values.
///
/// `labels` and `values` are zipped; the shorter one decides the length.
pub fn build_series(
    labels: Vec<String>,
    values: Vec<f64>,
    floor_pct: f64,
    kind: AxisKind,
) -> ChartSeries {
    let heights = normalize_heights(&values, floor_pct);
    let axis = axis_labels(&values, kind);
    let points = labels
        .into_iter()
        .zip(values)
        .zip(heights)
        .map(|((label, value), height_pct)| ChartPoint {
            label,
            value,
            height_pct,
        })
        .collect();
    ChartSeries { points, axis }
}

#[cfg(test)]
#[path = "buckets_tests.rs"]
mod buckets_tests;
