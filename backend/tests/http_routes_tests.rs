//! Router-level tests for the REST API.
#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use creator_analytics::api::{
    AnalyticsSnapshot, ContentDetail, CreatorId, DataSource, RangeId, TopContentList,
};
use creator_analytics::config::AnalyticsConfig;
use creator_analytics::db::{ContentRepository, LocalRepository};
use creator_analytics::http::dto::{HealthResponse, RefreshResponse};
use creator_analytics::http::error::ApiError;
use creator_analytics::http::{create_router, AppState};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use support::RecordBuilder;
use tower::ServiceExt;

fn app_with(repo: LocalRepository) -> Router {
    let repo = Arc::new(repo) as Arc<dyn ContentRepository>;
    create_router(AppState::new(repo, AnalyticsConfig::default()))
}

/// Handlers anchor windows at the current time.
fn recent() -> DateTime<Utc> {
    Utc::now() - Duration::hours(1)
}

fn seeded_repo() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.insert_records(
        CreatorId::new(1),
        vec![
            RecordBuilder::new(1).at(recent()).views(500).build(),
            RecordBuilder::new(2).at(recent()).views(1_500).build(),
            RecordBuilder::new(3).at(recent()).views(900).build(),
        ],
    );
    repo
}

async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Bytes) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn get_json<T: DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
    let (status, body) = send(app, "GET", uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_reports_source_status() {
    let repo = LocalRepository::new();
    let (status, health): (_, HealthResponse) = get_json(app_with(repo.clone()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health.status, "ok");
    assert_eq!(health.source, "connected");

    repo.set_healthy(false);
    let (_, health): (_, HealthResponse) = get_json(app_with(repo), "/health").await;
    assert_eq!(health.status, "degraded");
}

#[tokio::test]
async fn test_snapshot_endpoint() {
    let (status, snapshot): (_, AnalyticsSnapshot) =
        get_json(app_with(seeded_repo()), "/v1/creators/1/snapshot?range=30d").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot.range, RangeId::ThirtyDays);
    assert_eq!(snapshot.source, DataSource::Live);
    assert_eq!(snapshot.total_views, 2_900);
    assert_eq!(snapshot.views_series.len(), 30);
}

#[tokio::test]
async fn test_snapshot_defaults_and_deltas() {
    let (status, snapshot): (_, AnalyticsSnapshot) = get_json(
        app_with(seeded_repo()),
        "/v1/creators/1/snapshot?range=bogus&shares_change=2.5",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot.range, RangeId::SevenDays);
    assert_eq!(snapshot.engagement_metrics.shares_change_pct, 2.5);
    assert_eq!(snapshot.engagement_metrics.comments_change_pct, 25.0);
}

#[tokio::test]
async fn test_snapshot_rejects_non_finite_delta() {
    let (status, error): (_, ApiError) = get_json(
        app_with(seeded_repo()),
        "/v1/creators/1/snapshot?engagement_change=NaN",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_snapshot_survives_source_outage() {
    let repo = seeded_repo();
    repo.set_healthy(false);
    let (status, snapshot): (_, AnalyticsSnapshot) =
        get_json(app_with(repo), "/v1/creators/1/snapshot?range=7d").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot.source, DataSource::Fallback);
    assert_eq!(snapshot.total_views, 22_300);
}

#[tokio::test]
async fn test_refresh_publishes_to_feed() {
    let repo = Arc::new(seeded_repo()) as Arc<dyn ContentRepository>;
    let state = AppState::new(repo, AnalyticsConfig::default());
    let mut subscriber = state.feed.subscribe();
    let app = create_router(state);

    let (status, body) = send(app, "POST", "/v1/creators/1/snapshot/refresh?range=90d").await;
    assert_eq!(status, StatusCode::OK);
    let response: RefreshResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.delivered_to, 1);

    let published = subscriber.recv().await.unwrap();
    assert_eq!(published.range, RangeId::NinetyDays);
    assert_eq!(published.creator_id, response.snapshot.creator_id);
    assert_eq!(published.total_views, response.snapshot.total_views);
    assert_eq!(published.total_views, 2_900);
}

#[tokio::test]
async fn test_top_content_endpoint() {
    let (status, list): (_, TopContentList) =
        get_json(app_with(seeded_repo()), "/v1/creators/1/content?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = list.items.iter().map(|r| r.id.value()).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(list.total_available, 3);

    let (status, _): (_, ApiError) =
        get_json(app_with(seeded_repo()), "/v1/creators/1/content?limit=1000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_content_detail_endpoint() {
    let (status, detail): (_, ContentDetail) =
        get_json(app_with(seeded_repo()), "/v1/creators/1/content/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail.record.views, 1_500);
    assert_eq!(detail.earnings_timeline.len(), 7);

    let (status, error): (_, ApiError) =
        get_json(app_with(seeded_repo()), "/v1/creators/1/content/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error.code, "NOT_FOUND");
}
