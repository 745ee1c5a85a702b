//! Snapshot assembly.
//!
//! `get_snapshot*` is the engine's entry point. It resolves the window,
//! fetches the creator's records within the configured timeout (substituting
//! the synthetic dataset on failure), and runs the pure pipeline:
//!
//! ```text
//! records -> filter_window -> aggregate -> compute_growth
//!                          -> bucket_totals -> build_series (views, revenue)
//!                          -> allocate
//! ```
//!
//! Every call succeeds. An empty record set yields a zeroed snapshot with
//! every bar at the floor height.

use chrono::{DateTime, Utc};

use crate::api::{
    AnalyticsConfig, AnalyticsSnapshot, ContentRecord, CreatorId, DataSource, EngagementDeltas,
    EngagementMetrics, RangeId, TimeWindow,
};
use crate::db::repository::ContentRepository;

use super::buckets::{bucket_totals, build_series, AxisKind, BucketSettings};
use super::fallback::fallback_records;
use super::filter::filter_window;
use super::growth::compute_growth;
use super::metrics::aggregate;
use super::revenue::allocate;
use super::source::records_or_fallback;

/// Build a snapshot from records that were already fetched.
///
/// Records outside `window` are ignored. `deltas` supplies the growth of the
/// secondary engagement metrics, which records alone cannot provide.
pub fn assemble_snapshot(
    creator_id: CreatorId,
    window: &TimeWindow,
    records: Vec<ContentRecord>,
    source: DataSource,
    config: &AnalyticsConfig,
    deltas: &EngagementDeltas,
) -> AnalyticsSnapshot {
    let records = filter_window(records, window);
    let metrics = aggregate(&records);
    let growth = compute_growth(&metrics, config.baselines.for_range(window.range));

    let settings = BucketSettings::from(&config.engine);
    let totals = bucket_totals(&records, window, &settings);
    let labels = window.labels();
    let floor = settings.min_height_pct;

    AnalyticsSnapshot {
        creator_id,
        range: window.range,
        source,
        record_count: metrics.record_count,
        total_views: metrics.total_views,
        total_revenue: metrics.total_revenue,
        total_likes: metrics.total_likes,
        views_growth_pct: growth.views_pct,
        revenue_growth_pct: growth.revenue_pct,
        views_series: build_series(labels.clone(), totals.views, floor, AxisKind::Count),
        revenue_series: build_series(labels, totals.revenue, floor, AxisKind::Currency),
        engagement_metrics: EngagementMetrics {
            engagement_rate_pct: metrics.engagement_rate_pct(),
            watch_time_pct: metrics.watch_time_pct(),
            comments: metrics.total_comments,
            shares: metrics.total_shares,
            engagement_change_pct: deltas.engagement,
            watch_time_change_pct: deltas.watch_time,
            comments_change_pct: deltas.comments,
            shares_change_pct: deltas.shares,
        },
        revenue_breakdown: allocate(metrics.total_revenue, &config.revenue),
    }
}

/// Snapshot built from the synthetic dataset, without touching any source.
pub fn fallback_snapshot(
    creator_id: CreatorId,
    range: RangeId,
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> AnalyticsSnapshot {
    let window = TimeWindow::resolve(range, now);
    assemble_snapshot(
        creator_id,
        &window,
        fallback_records(range, now),
        DataSource::Fallback,
        config,
        &config.engagement_deltas,
    )
}

/// Snapshot for `range_id` anchored at the current time.
///
/// Unknown range ids are treated as `7d`.
pub async fn get_snapshot<R: ContentRepository + ?Sized>(
    repo: &R,
    config: &AnalyticsConfig,
    creator_id: CreatorId,
    range_id: &str,
) -> AnalyticsSnapshot {
    get_snapshot_at(repo, config, creator_id, range_id, Utc::now()).await
}

pub async fn get_snapshot_at<R: ContentRepository + ?Sized>(
    repo: &R,
    config: &AnalyticsConfig,
    creator_id: CreatorId,
    range_id: &str,
    now: DateTime<Utc>,
) -> AnalyticsSnapshot {
    let range = RangeId::parse_lenient(range_id);
    get_snapshot_with(repo, config, creator_id, range, &config.engagement_deltas, now).await
}

/// Fully explicit variant: typed range, caller supplied deltas and anchor.
pub async fn get_snapshot_with<R: ContentRepository + ?Sized>(
    repo: &R,
    config: &AnalyticsConfig,
    creator_id: CreatorId,
    range: RangeId,
    deltas: &EngagementDeltas,
    now: DateTime<Utc>,
) -> AnalyticsSnapshot {
    let window = TimeWindow::resolve(range, now);
    let (records, source) = records_or_fallback(
        repo,
        creator_id,
        config.engine.fetch_timeout(),
        || fallback_records(range, now),
    )
    .await;

    let snapshot = assemble_snapshot(creator_id, &window, records, source, config, deltas);
    log::info!(
        "Snapshot for creator {} ({}): {} records, {} views, source {:?}",
        creator_id,
        range,
        snapshot.record_count,
        snapshot.total_views,
        snapshot.source
    );
    snapshot
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
