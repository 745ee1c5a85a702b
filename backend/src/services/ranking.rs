//! Top-performing content by views.

use chrono::{DateTime, Utc};

use crate::api::{AnalyticsConfig, ContentRecord, CreatorId, TopContentList};
use crate::db::repository::ContentRepository;

use super::fallback::fallback_catalog;
use super::source::records_or_fallback;

/// Sort by views, descending. Equal view counts keep their input order.
pub fn rank_by_views(mut records: Vec<ContentRecord>) -> Vec<ContentRecord> {
    records.sort_by(|a, b| b.views.cmp(&a.views));
    records
}

/// At most `k` records, best first.
pub fn top_performing(records: Vec<ContentRecord>, k: usize) -> Vec<ContentRecord> {
    let mut ranked = rank_by_views(records);
    ranked.truncate(k);
    ranked
}

pub async fn get_top_performing<R: ContentRepository + ?Sized>(
    repo: &R,
    config: &AnalyticsConfig,
    creator_id: CreatorId,
    k: usize,
) -> TopContentList {
    get_top_performing_at(repo, config, creator_id, k, Utc::now()).await
}

pub async fn get_top_performing_at<R: ContentRepository + ?Sized>(
    repo: &R,
    config: &AnalyticsConfig,
    creator_id: CreatorId,
    k: usize,
    now: DateTime<Utc>,
) -> TopContentList {
    let (records, source) = records_or_fallback(
        repo,
        creator_id,
        config.engine.fetch_timeout(),
        || fallback_catalog(now),
    )
    .await;
    let total_available = records.len();

    TopContentList {
        creator_id,
        source,
        items: top_performing(records, k),
        total_available,
    }
}
