//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer. Snapshot, ranking and detail reads never fail because of
//! the record source; the fallback dataset stands in for it.

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

use super::dto::{
    AnalyticsSnapshot, ContentDetail, ContentQuery, HealthResponse, RefreshResponse,
    SnapshotQuery, TopContentList, DEFAULT_TOP_LIMIT, MAX_TOP_LIMIT,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{ContentId, CreatorId};
use crate::services;
use crate::services::feed::is_for_creator;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports whether the record source is reachable. A source that answers
/// "unhealthy" yields a degraded status; one that cannot be asked at all
/// yields 503.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let healthy = services::health_check(state.repository.as_ref()).await?;
    let (status, source) = if healthy {
        ("ok", "connected")
    } else {
        ("degraded", "disconnected")
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: "v1".to_string(),
        source: source.to_string(),
    }))
}

// =============================================================================
// Snapshots
// =============================================================================

async fn compute_snapshot(
    state: &AppState,
    creator_id: CreatorId,
    query: &SnapshotQuery,
) -> Result<AnalyticsSnapshot, AppError> {
    if let Some(name) = query.invalid_delta() {
        return Err(AppError::BadRequest(format!("{} must be a finite number", name)));
    }
    let deltas = query.deltas(&state.config.engagement_deltas);
    Ok(services::get_snapshot_with(
        state.repository.as_ref(),
        &state.config,
        creator_id,
        query.range_id(),
        &deltas,
        chrono::Utc::now(),
    )
    .await)
}

/// GET /v1/creators/{creator_id}/snapshot
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(creator_id): Path<i64>,
    Query(query): Query<SnapshotQuery>,
) -> HandlerResult<AnalyticsSnapshot> {
    let snapshot = compute_snapshot(&state, CreatorId::new(creator_id), &query).await?;
    Ok(Json(snapshot))
}

/// POST /v1/creators/{creator_id}/snapshot/refresh
///
/// Compute a snapshot and publish it to every stream subscriber.
pub async fn refresh_snapshot(
    State(state): State<AppState>,
    Path(creator_id): Path<i64>,
    Query(query): Query<SnapshotQuery>,
) -> HandlerResult<RefreshResponse> {
    let snapshot = compute_snapshot(&state, CreatorId::new(creator_id), &query).await?;
    let delivered_to = state.feed.publish(snapshot.clone());
    tracing::debug!(creator_id, delivered_to, "published refreshed snapshot");

    Ok(Json(RefreshResponse {
        snapshot,
        delivered_to,
    }))
}

/// GET /v1/creators/{creator_id}/snapshot/stream
///
/// Stream snapshots published for this creator via Server-Sent Events (SSE).
pub async fn stream_snapshots(
    State(state): State<AppState>,
    Path(creator_id): Path<i64>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let creator_id = CreatorId::new(creator_id);
    let mut receiver = state.feed.subscribe();

    let stream = async_stream::stream! {
        loop {
            match receiver.recv().await {
                Ok(snapshot) => {
                    if !is_for_creator(&snapshot, creator_id) {
                        continue;
                    }
                    match serde_json::to_string(&snapshot) {
                        Ok(data) => {
                            yield Ok(Event::default().event("snapshot").data(data));
                        }
                        Err(e) => tracing::warn!("failed to serialize snapshot: {}", e),
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "snapshot stream subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

// =============================================================================
// Content
// =============================================================================

/// GET /v1/creators/{creator_id}/content
///
/// Top-performing content by views.
pub async fn get_top_content(
    State(state): State<AppState>,
    Path(creator_id): Path<i64>,
    Query(query): Query<ContentQuery>,
) -> HandlerResult<TopContentList> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    if limit > MAX_TOP_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must not exceed {}",
            MAX_TOP_LIMIT
        )));
    }

    let list = services::get_top_performing(
        state.repository.as_ref(),
        &state.config,
        CreatorId::new(creator_id),
        limit,
    )
    .await;
    Ok(Json(list))
}

/// GET /v1/creators/{creator_id}/content/{content_id}
pub async fn get_content_detail(
    State(state): State<AppState>,
    Path((creator_id, content_id)): Path<(i64, i64)>,
) -> HandlerResult<ContentDetail> {
    services::get_content_detail(
        state.repository.as_ref(),
        &state.config,
        CreatorId::new(creator_id),
        ContentId::new(content_id),
    )
    .await
    .map(Json)
    .ok_or_else(|| {
        AppError::NotFound(format!(
            "Content {} not found for creator {}",
            content_id, creator_id
        ))
    })
}
