//! Data Transfer Objects for the HTTP API.
//!
//! Response bodies are the engine's value types, re-exported here; this
//! module adds the query and envelope types specific to HTTP.

use serde::{Deserialize, Serialize};

pub use crate::api::{AnalyticsSnapshot, ContentDetail, EngagementDeltas, TopContentList};
use crate::api::RangeId;

/// Items returned by the top-performing endpoint when no limit is given.
pub const DEFAULT_TOP_LIMIT: usize = 10;
/// Largest accepted `limit`.
pub const MAX_TOP_LIMIT: usize = 100;

/// Query parameters for the snapshot endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnapshotQuery {
    /// Reporting window (`7d`, `30d`, `90d`, `1y`); anything else means `7d`
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub engagement_change: Option<f64>,
    #[serde(default)]
    pub watch_time_change: Option<f64>,
    #[serde(default)]
    pub comments_change: Option<f64>,
    #[serde(default)]
    pub shares_change: Option<f64>,
}

impl SnapshotQuery {
    pub fn range_id(&self) -> RangeId {
        self.range
            .as_deref()
            .map(RangeId::parse_lenient)
            .unwrap_or_default()
    }

    /// Engagement deltas with any supplied parameter overriding `defaults`.
    pub fn deltas(&self, defaults: &EngagementDeltas) -> EngagementDeltas {
        EngagementDeltas {
            engagement: self.engagement_change.unwrap_or(defaults.engagement),
            watch_time: self.watch_time_change.unwrap_or(defaults.watch_time),
            comments: self.comments_change.unwrap_or(defaults.comments),
            shares: self.shares_change.unwrap_or(defaults.shares),
        }
    }

    /// Name of the first supplied delta that is not a finite number.
    pub fn invalid_delta(&self) -> Option<&'static str> {
        [
            ("engagement_change", self.engagement_change),
            ("watch_time_change", self.watch_time_change),
            ("comments_change", self.comments_change),
            ("shares_change", self.shares_change),
        ]
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
        .map(|(name, _)| name)
    }
}

/// Query parameters for the top-performing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response of the refresh endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub snapshot: AnalyticsSnapshot,
    /// Stream subscribers the snapshot was delivered to
    pub delivered_to: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Record source status
    pub source: String,
}
