//! Totals and means over a filtered record set.

use crate::api::ContentRecord;

/// Folded totals of a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateMetrics {
    pub record_count: usize,
    pub total_views: u64,
    pub total_revenue: f64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    /// Unweighted mean engagement rate, as a fraction.
    pub mean_engagement_rate: f64,
    /// Unweighted mean watch completion, as a fraction.
    pub mean_watch_completion: f64,
}

impl AggregateMetrics {
    pub fn engagement_rate_pct(&self) -> f64 {
        self.mean_engagement_rate * 100.0
    }

    pub fn watch_time_pct(&self) -> f64 {
        self.mean_watch_completion * 100.0
    }
}

/// Arithmetic mean, defined as 0 for an empty slice.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

/// Compute totals and means. Counters saturate instead of overflowing.
pub fn aggregate(records: &[ContentRecord]) -> AggregateMetrics {
    let sum = |f: fn(&ContentRecord) -> u64| records.iter().fold(0u64, |acc, r| acc.saturating_add(f(r)));

    AggregateMetrics {
        record_count: records.len(),
        total_views: sum(|r| r.views),
        total_revenue: records.iter().map(|r| r.projected_earnings).sum(),
        total_likes: sum(|r| r.likes),
        total_comments: sum(|r| r.comments),
        total_shares: sum(|r| r.shares),
        mean_engagement_rate: mean(records.iter().map(|r| r.engagement_rate)),
        mean_watch_completion: mean(records.iter().map(|r| r.watch_completion)),
    }
}
