//! Per-content detail: KPIs, audience breakdowns, earnings timeline and
//! revenue split for a single record.

use chrono::{DateTime, Utc};

use crate::api::{
    AudienceProfile, AudienceShare, ChartSeries, ContentDetail, ContentId, ContentKpis,
    ContentRecord, CreatorId, DataSource, DemographicBreakdown, PercentShare,
};
use crate::config::AnalyticsConfig;
use crate::db::repository::ContentRepository;
use crate::models::{AGE_BRACKETS, GENDER_GROUPS};

use super::buckets::{build_series, AxisKind};
use super::fallback::{fallback_audience, fallback_catalog};
use super::revenue::{split_record, validate_split};
use super::source::{fetch_audience, records_or_fallback};

/// Label of the location remainder.
pub const OTHERS_LABEL: &str = "Others";

/// Relative weekly earnings over the first seven weeks after publication,
/// peaking in week 3.
const WEEKLY_EARNINGS_PROFILE: [f64; 7] = [28.5, 45.2, 125.4, 98.3, 67.8, 42.1, 31.2];

const SECONDS_PER_DAY: f64 = 86_400.0;

/// 100% in tenths of a percent.
const TOTAL_TENTHS: i64 = 1_000;

fn rate_pct(count: u64, views: u64) -> f64 {
    if views == 0 {
        0.0
    } else {
        count as f64 / views as f64 * 100.0
    }
}

/// Weighted geometric blend of the quality signals, gated by compliance.
///
/// `C × min(1, W^0.35 · E^0.25 · D^0.15 · R^0.10 · S^0.15)`
pub fn composite_quality_score(record: &ContentRecord) -> f64 {
    if !record.compliance_flag {
        return 0.0;
    }
    let blended = record.watch_completion.max(0.0).powf(0.35)
        * record.engagement_rate.max(0.0).powf(0.25)
        * record.engagement_diversity.max(0.0).powf(0.15)
        * record.rewatch_rate.max(0.0).powf(0.10)
        * record.quality_score.max(0.0).powf(0.15);
    blended.min(1.0)
}

pub fn content_kpis(
    record: &ContentRecord,
    now: DateTime<Utc>,
    industry_earnings_per_view: f64,
) -> ContentKpis {
    let earnings_per_view = if record.views == 0 {
        0.0
    } else {
        record.projected_earnings / record.views as f64
    };
    let earnings_vs_industry_pct = if industry_earnings_per_view > 0.0 {
        (earnings_per_view - industry_earnings_per_view) / industry_earnings_per_view * 100.0
    } else {
        0.0
    };
    let days_old = ((now - record.created_at).num_seconds() as f64 / SECONDS_PER_DAY).max(1.0);

    ContentKpis {
        earnings_per_view,
        earnings_vs_industry_pct,
        like_rate_pct: rate_pct(record.likes, record.views),
        comment_rate_pct: rate_pct(record.comments, record.views),
        share_rate_pct: rate_pct(record.shares, record.views),
        view_velocity: record.views as f64 / days_old,
        composite_quality_score: composite_quality_score(record),
    }
}

fn clean_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

/// Convert raw weights into percentages with one decimal that sum to
/// exactly 100.
///
/// Uses largest-remainder rounding in tenths of a percent. Without any
/// positive weight the shares are spread evenly.
pub fn normalize_shares(shares: &[(String, f64)]) -> Vec<PercentShare> {
    if shares.is_empty() {
        return Vec::new();
    }
    let total: f64 = shares.iter().map(|(_, w)| clean_weight(*w)).sum();
    let tenths: Vec<f64> = shares
        .iter()
        .map(|(_, w)| {
            if total > 0.0 {
                clean_weight(*w) / total * TOTAL_TENTHS as f64
            } else {
                TOTAL_TENTHS as f64 / shares.len() as f64
            }
        })
        .collect();

    let mut units: Vec<i64> = tenths.iter().map(|t| t.floor() as i64).collect();
    let missing = (TOTAL_TENTHS - units.iter().sum::<i64>()).max(0) as usize;
    let mut by_remainder: Vec<usize> = (0..tenths.len()).collect();
    let remainder = |i: usize| tenths[i] - tenths[i].floor();
    by_remainder.sort_by(|&a, &b| remainder(b).total_cmp(&remainder(a)));
    for &i in by_remainder.iter().cycle().take(missing) {
        units[i] += 1;
    }

    shares
        .iter()
        .zip(units)
        .map(|((label, _), u)| PercentShare {
            label: label.clone(),
            pct: u as f64 / 10.0,
        })
        .collect()
}

/// Sum the weights of a raw group into a fixed set of labels.
///
/// Labels the group does not mention get weight zero; unknown labels are
/// ignored.
fn align_to(labels: &[&str], group: &[AudienceShare]) -> Vec<(String, f64)> {
    labels
        .iter()
        .map(|label| {
            let weight: f64 = group
                .iter()
                .filter(|s| s.label.eq_ignore_ascii_case(label))
                .map(|s| clean_weight(s.weight))
                .sum();
            (label.to_string(), weight)
        })
        .collect()
}

pub fn demographics(profile: &AudienceProfile) -> DemographicBreakdown {
    DemographicBreakdown {
        age: normalize_shares(&align_to(&AGE_BRACKETS, &profile.age)),
        gender: normalize_shares(&align_to(&GENDER_GROUPS, &profile.gender)),
    }
}

/// The `top_n` heaviest countries followed by an "Others" remainder.
///
/// Any "Others" entry in the raw profile is folded into the remainder along
/// with every country outside the top `top_n`.
pub fn location_breakdown(locations: &[AudienceShare], top_n: usize) -> Vec<PercentShare> {
    let total: f64 = locations.iter().map(|s| clean_weight(s.weight)).sum();
    if total <= 0.0 {
        return vec![PercentShare {
            label: OTHERS_LABEL.to_string(),
            pct: 100.0,
        }];
    }

    let (others, mut countries): (Vec<&AudienceShare>, Vec<&AudienceShare>) = locations
        .iter()
        .partition(|s| s.label.eq_ignore_ascii_case(OTHERS_LABEL));
    countries.sort_by(|a, b| clean_weight(b.weight).total_cmp(&clean_weight(a.weight)));
    let excluded = countries.split_off(top_n.min(countries.len()));

    let mut weighted: Vec<(String, f64)> = countries
        .iter()
        .map(|s| (s.label.clone(), clean_weight(s.weight)))
        .collect();
    // Summed from the excluded entries so a full top list leaves exactly zero
    let remainder: f64 = others
        .iter()
        .chain(excluded.iter())
        .map(|s| clean_weight(s.weight))
        .sum();
    if remainder > 0.0 {
        weighted.push((OTHERS_LABEL.to_string(), remainder));
    }
    normalize_shares(&weighted)
}

/// Seven weekly earnings points shaped by the typical decay curve and scaled
/// so the peak week equals the record's projected earnings.
pub fn earnings_timeline(record: &ContentRecord, floor_pct: f64) -> ChartSeries {
    let peak = WEEKLY_EARNINGS_PROFILE.iter().copied().fold(0.0_f64, f64::max);
    let values = WEEKLY_EARNINGS_PROFILE
        .iter()
        .map(|w| (record.projected_earnings * w / peak * 100.0).round() / 100.0)
        .collect();
    let labels = (1..=WEEKLY_EARNINGS_PROFILE.len())
        .map(|week| format!("Week {}", week))
        .collect();
    build_series(labels, values, floor_pct, AxisKind::Currency)
}

/// Assemble a detail view from an already fetched record and audience.
pub fn build_content_detail(
    record: ContentRecord,
    audience: &AudienceProfile,
    source: DataSource,
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
) -> ContentDetail {
    let engine = &config.engine;
    let revenue_split = split_record(&record, &config.revenue);
    let split_validation = validate_split(&revenue_split, record.projected_earnings);

    ContentDetail {
        kpis: content_kpis(&record, now, engine.industry_earnings_per_view),
        demographics: demographics(audience),
        locations: location_breakdown(&audience.locations, engine.top_locations),
        earnings_timeline: earnings_timeline(&record, engine.min_visible_height_pct),
        revenue_split,
        split_validation,
        source,
        record,
    }
}

/// Detail view for one content id, or `None` if the creator has no such content.
pub async fn get_content_detail<R: ContentRepository + ?Sized>(
    repo: &R,
    config: &AnalyticsConfig,
    creator_id: CreatorId,
    content_id: ContentId,
) -> Option<ContentDetail> {
    get_content_detail_at(repo, config, creator_id, content_id, Utc::now()).await
}

pub async fn get_content_detail_at<R: ContentRepository + ?Sized>(
    repo: &R,
    config: &AnalyticsConfig,
    creator_id: CreatorId,
    content_id: ContentId,
    now: DateTime<Utc>,
) -> Option<ContentDetail> {
    let limit = config.engine.fetch_timeout();
    let (records, source) =
        records_or_fallback(repo, creator_id, limit, || fallback_catalog(now)).await;

    let Some(record) = records.into_iter().find(|r| r.id == content_id) else {
        log::debug!("Content {} not found for creator {}", content_id, creator_id);
        return None;
    };

    let audience = match source {
        DataSource::Fallback => fallback_audience(content_id),
        DataSource::Live => match fetch_audience(repo, creator_id, content_id, limit).await {
            Ok(Some(profile)) => profile,
            Ok(None) => fallback_audience(content_id),
            Err(e) => {
                log::warn!("Audience lookup for content {} failed: {}", content_id, e);
                fallback_audience(content_id)
            }
        },
    };

    Some(build_content_detail(record, &audience, source, config, now))
}

#[cfg(test)]
#[path = "detail_tests.rs"]
mod detail_tests;
