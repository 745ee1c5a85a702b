//! Service layer for aggregation and orchestration.
//!
//! Pure pipeline stages (`filter`, `metrics`, `growth`, `buckets`, `revenue`)
//! operate on in-memory record collections. The orchestrators (`snapshot`,
//! `detail`, `ranking`) add the one async boundary: the bounded record fetch
//! in `source`, with `fallback` supplying synthetic data when it fails.
//! `payout` derives the quality-weighted inputs of the payout models.

pub mod buckets;
pub mod detail;
pub mod fallback;
pub mod feed;
pub mod filter;
pub mod growth;
pub mod metrics;
pub mod payout;
pub mod ranking;
pub mod revenue;
pub mod snapshot;
pub mod source;

pub use detail::{get_content_detail, get_content_detail_at};
pub use feed::SnapshotFeed;
pub use payout::{ad_pool_weights, ad_pool_weights_for_records, coin_quality_multiplier};
pub use ranking::{get_top_performing, get_top_performing_at, rank_by_views, top_performing};
pub use snapshot::{
    assemble_snapshot, fallback_snapshot, get_snapshot, get_snapshot_at, get_snapshot_with,
};
pub use source::health_check;
