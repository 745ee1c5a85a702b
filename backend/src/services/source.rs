//! Bounded access to the record source.
//!
//! Every read goes through `tokio::time::timeout`; an elapsed timeout is
//! reported as [`RepositoryError::TimeoutError`] like any other source failure.

use std::time::Duration;

use crate::api::{AudienceProfile, ContentId, ContentRecord, CreatorId, DataSource};
use crate::db::repository::{ContentRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::models::sanitize_records;

fn timed_out(operation: &str, creator_id: CreatorId, limit: Duration) -> RepositoryError {
    RepositoryError::timeout_with_context(
        format!("Record source did not answer within {} ms", limit.as_millis()),
        ErrorContext::new(operation)
            .with_entity("creator")
            .with_entity_id(creator_id),
    )
}

pub async fn fetch_records<R: ContentRepository + ?Sized>(
    repo: &R,
    creator_id: CreatorId,
    limit: Duration,
) -> RepositoryResult<Vec<ContentRecord>> {
    tokio::time::timeout(limit, repo.fetch_records(creator_id))
        .await
        .map_err(|_| timed_out("fetch_records", creator_id, limit))?
}

pub async fn fetch_audience<R: ContentRepository + ?Sized>(
    repo: &R,
    creator_id: CreatorId,
    content_id: ContentId,
    limit: Duration,
) -> RepositoryResult<Option<AudienceProfile>> {
    tokio::time::timeout(limit, repo.fetch_audience(creator_id, content_id))
        .await
        .map_err(|_| timed_out("fetch_audience", creator_id, limit))?
}

/// Fetch a creator's records, substituting `fallback()` when the source
/// fails or times out.
///
/// Live records come back sanitized. A live but empty result is not a
/// failure and is returned as is.
pub async fn records_or_fallback<R, F>(
    repo: &R,
    creator_id: CreatorId,
    limit: Duration,
    fallback: F,
) -> (Vec<ContentRecord>, DataSource)
where
    R: ContentRepository + ?Sized,
    F: FnOnce() -> Vec<ContentRecord>,
{
    match fetch_records(repo, creator_id, limit).await {
        Ok(records) => {
            log::debug!("Fetched {} records for creator {}", records.len(), creator_id);
            (sanitize_records(records), DataSource::Live)
        }
        Err(e) => {
            log::warn!("Record source failed for creator {}, using fallback data: {}", creator_id, e);
            (fallback(), DataSource::Fallback)
        }
    }
}

/// Check whether the source is reachable.
pub async fn health_check<R: ContentRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}
