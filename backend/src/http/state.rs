//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AnalyticsConfig;
use crate::db::repository::ContentRepository;
use crate::services::SnapshotFeed;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record source every request reads from
    pub repository: Arc<dyn ContentRepository>,
    pub config: Arc<AnalyticsConfig>,
    /// Snapshots published by the refresh endpoint
    pub feed: SnapshotFeed,
}

impl AppState {
    pub fn new(repository: Arc<dyn ContentRepository>, config: AnalyticsConfig) -> Self {
        Self {
            repository,
            config: Arc::new(config),
            feed: SnapshotFeed::default(),
        }
    }

    /// Replace the snapshot feed, e.g. to share one with another component.
    pub fn with_feed(mut self, feed: SnapshotFeed) -> Self {
        self.feed = feed;
        self
    }
}
