//! Record source trait.
//!
//! The snapshot engine only ever reads from a [`ContentRepository`]. Pagination,
//! ordering and storage are the implementation's concern; the engine filters,
//! sorts and sanitizes whatever comes back.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{AudienceProfile, ContentId, ContentRecord, CreatorId};

/// Read-only access to a creator's content performance records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so one instance can be shared across
/// request handlers.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetch every record known for a creator.
    ///
    /// # Returns
    /// * `Ok(Vec<ContentRecord>)` - Possibly empty; an empty list is not an error
    /// * `Err(RepositoryError)` - The source is unavailable
    async fn fetch_records(&self, creator_id: CreatorId) -> RepositoryResult<Vec<ContentRecord>>;

    /// Fetch the raw audience profile of one piece of content.
    ///
    /// # Returns
    /// * `Ok(Some(profile))` - The source has audience data for this content
    /// * `Ok(None)` - The source has no audience data for it
    /// * `Err(RepositoryError)` - The source is unavailable
    async fn fetch_audience(
        &self,
        creator_id: CreatorId,
        content_id: ContentId,
    ) -> RepositoryResult<Option<AudienceProfile>>;

    /// Check whether the source is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
