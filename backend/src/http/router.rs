//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Snapshots
        .route("/creators/{creator_id}/snapshot", get(handlers::get_snapshot))
        .route(
            "/creators/{creator_id}/snapshot/refresh",
            post(handlers::refresh_snapshot),
        )
        .route(
            "/creators/{creator_id}/snapshot/stream",
            get(handlers::stream_snapshots),
        )
        // Content
        .route("/creators/{creator_id}/content", get(handlers::get_top_content))
        .route(
            "/creators/{creator_id}/content/{content_id}",
            get(handlers::get_content_detail),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
