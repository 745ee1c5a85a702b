//! Public API surface for the analytics engine.
//!
//! This file consolidates the value types callers exchange with the engine.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::detail::ContentDetail;
pub use crate::routes::detail::ContentKpis;
pub use crate::routes::detail::DemographicBreakdown;
pub use crate::routes::detail::PercentShare;
pub use crate::routes::detail::SplitValidation;
pub use crate::routes::ranking::TopContentList;
pub use crate::routes::snapshot::AnalyticsSnapshot;
pub use crate::routes::snapshot::AxisLabels;
pub use crate::routes::snapshot::ChartPoint;
pub use crate::routes::snapshot::ChartSeries;
pub use crate::routes::snapshot::DataSource;
pub use crate::routes::snapshot::EngagementMetrics;
pub use crate::routes::snapshot::RevenueBreakdown;

pub use crate::models::AudienceProfile;
pub use crate::models::AudienceShare;
pub use crate::models::ContentId;
pub use crate::models::ContentRecord;
pub use crate::models::CreatorId;
pub use crate::models::LabelFormat;
pub use crate::models::RangeId;
pub use crate::models::RecordError;
pub use crate::models::TimeWindow;

pub use crate::config::AnalyticsConfig;
pub use crate::config::EngagementDeltas;
pub use crate::services::buckets::BucketingMode;

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
