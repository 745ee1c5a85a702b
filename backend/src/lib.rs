//! # Creator Analytics
//!
//! Aggregation engine behind a creator analytics dashboard.
//!
//! Given a creator's content performance records and a reporting window, the
//! engine produces an immutable [`api::AnalyticsSnapshot`]: headline totals,
//! growth against a baseline, time-bucketed chart series with normalized bar
//! heights, engagement metrics and a revenue breakdown. Per-content detail
//! views and top-performing rankings are built from the same records.
//!
//! ## Architecture
//!
//! - [`api`]: value types exchanged with callers
//! - [`config`]: TOML configuration with environment overrides
//! - [`db`]: the [`db::ContentRepository`] record source and its implementations
//! - [`models`]: records, identifiers and reporting windows
//! - [`services`]: the aggregation pipeline and its orchestrators
//! - [`routes`]: response types and route names
//! - [`http`]: Axum-based HTTP server (feature `http-server`)
//!
//! Reads never fail from the caller's point of view: when the record source
//! errors or exceeds its fetch timeout, a deterministic synthetic dataset is
//! run through the same pipeline and the result is tagged
//! [`api::DataSource::Fallback`].

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
