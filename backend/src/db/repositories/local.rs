//! In-memory local repository implementation.
//!
//! Suitable for unit testing and local development. Records are kept per
//! creator in a `HashMap`; a health toggle and an artificial latency let tests
//! simulate an unavailable or slow source.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{AudienceProfile, ContentId, ContentRecord, CreatorId};
use crate::db::repository::*;

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same underlying data, so a test can
/// keep a handle to flip health while the engine holds another.
///
/// # Example
/// ```
/// use creator_analytics::db::repositories::LocalRepository;
/// use creator_analytics::api::CreatorId;
///
/// let repo = LocalRepository::new();
/// repo.insert_records(CreatorId::new(1), Vec::new());
/// repo.set_healthy(false);
/// assert_eq!(repo.record_count(CreatorId::new(1)), 0);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    records: HashMap<CreatorId, Vec<ContentRecord>>,
    audiences: HashMap<(CreatorId, ContentId), AudienceProfile>,
    latency: Option<Duration>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            audiences: HashMap::new(),
            latency: None,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record stored for `creator_id`.
    pub fn insert_records(&self, creator_id: CreatorId, records: Vec<ContentRecord>) {
        self.data.write().records.insert(creator_id, records);
    }

    /// Append a single record for `creator_id`.
    pub fn push_record(&self, creator_id: CreatorId, record: ContentRecord) {
        self.data
            .write()
            .records
            .entry(creator_id)
            .or_default()
            .push(record);
    }

    pub fn set_audience(
        &self,
        creator_id: CreatorId,
        content_id: ContentId,
        profile: AudienceProfile,
    ) {
        self.data
            .write()
            .audiences
            .insert((creator_id, content_id), profile);
    }

    /// Set the health status for testing source failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Delay every fetch by `latency`, for exercising the fetch timeout.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.data.write().latency = latency;
    }

    /// Clear all data, keeping the health and latency settings.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.records.clear();
        data.audiences.clear();
    }

    pub fn record_count(&self, creator_id: CreatorId) -> usize {
        self.data
            .read()
            .records
            .get(&creator_id)
            .map_or(0, Vec::len)
    }

    /// Sleep for the configured latency, then fail if the source is marked unhealthy.
    async fn simulate_source(&self, operation: &str, creator_id: CreatorId) -> RepositoryResult<()> {
        let latency = self.data.read().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Local repository is not healthy",
                ErrorContext::new(operation)
                    .with_entity("creator")
                    .with_entity_id(creator_id)
                    .retryable(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for LocalRepository {
    async fn fetch_records(&self, creator_id: CreatorId) -> RepositoryResult<Vec<ContentRecord>> {
        self.simulate_source("fetch_records", creator_id).await?;
        let records = self
            .data
            .read()
            .records
            .get(&creator_id)
            .cloned()
            .unwrap_or_default();
        log::debug!(
            "Local repository returned {} records for creator {}",
            records.len(),
            creator_id
        );
        Ok(records)
    }

    async fn fetch_audience(
        &self,
        creator_id: CreatorId,
        content_id: ContentId,
    ) -> RepositoryResult<Option<AudienceProfile>> {
        self.simulate_source("fetch_audience", creator_id).await?;
        Ok(self
            .data
            .read()
            .audiences
            .get(&(creator_id, content_id))
            .cloned())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}
