//! Deterministic synthetic data used when the record source is unavailable.
//!
//! The synthetic sets are plain [`ContentRecord`]s so they flow through the
//! same filter/aggregate/bucket pipeline as live data. Nothing here reads the
//! clock: every function takes the anchor instant explicitly.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::api::{AudienceProfile, AudienceShare, ContentId, ContentRecord, RangeId, TimeWindow};
use crate::models::AGE_BRACKETS;

pub const FALLBACK_ENGAGEMENT_RATE: f64 = 0.084;
pub const FALLBACK_WATCH_COMPLETION: f64 = 0.45;
pub const FALLBACK_COMMENTS: u64 = 1_200;
pub const FALLBACK_SHARES: u64 = 340;

/// Synthetic window records get ids from here upwards.
const SYNTHETIC_ID_BASE: i64 = 1_000_000;

/// Headline totals and 7-point trend shape of one window.
struct MockProfile {
    views_total: u64,
    revenue_total: f64,
    views_curve: [f64; 7],
    revenue_curve: [f64; 7],
}

fn mock_profile(range: RangeId) -> MockProfile {
    match range {
        RangeId::SevenDays => MockProfile {
            views_total: 22_300,
            revenue_total: 142.50,
            views_curve: [2400.0, 2800.0, 2200.0, 3200.0, 2900.0, 5000.0, 4500.0],
            revenue_curve: [12.5, 15.3, 13.2, 18.4, 16.8, 28.4, 25.3],
        },
        RangeId::ThirtyDays => MockProfile {
            views_total: 86_500,
            revenue_total: 523.75,
            views_curve: [2800.0, 3200.0, 2900.0, 4100.0, 3800.0, 5200.0, 8000.0],
            revenue_curve: [18.5, 22.3, 19.8, 31.2, 28.9, 42.1, 65.7],
        },
        RangeId::NinetyDays => MockProfile {
            views_total: 245_000,
            revenue_total: 1_485.25,
            views_curve: [8500.0, 12200.0, 15800.0, 18900.0, 22300.0, 28600.0, 30500.0],
            revenue_curve: [52.3, 78.9, 95.4, 125.7, 156.8, 185.2, 203.6],
        },
        RangeId::OneYear => MockProfile {
            views_total: 985_000,
            revenue_total: 5_825.40,
            views_curve: [
                45000.0, 62000.0, 78000.0, 95000.0, 108000.0, 118000.0, 115000.0,
            ],
            revenue_curve: [285.3, 412.8, 548.9, 672.4, 745.6, 808.2, 798.5],
        },
    }
}

/// Resample `anchors` to `n` evenly spaced points by linear interpolation.
pub fn interpolate(anchors: &[f64], n: usize) -> Vec<f64> {
    match (anchors.len(), n) {
        (_, 0) | (0, _) => vec![0.0; n],
        (1, _) => vec![anchors[0]; n],
        (_, 1) => vec![anchors[anchors.len() - 1]],
        (k, _) => (0..n)
            .map(|i| {
                let pos = i as f64 * (k - 1) as f64 / (n - 1) as f64;
                let lo = (pos.floor() as usize).min(k - 2);
                let t = pos - lo as f64;
                anchors[lo] + (anchors[lo + 1] - anchors[lo]) * t
            })
            .collect(),
    }
}

/// Split an integer total proportionally to `weights`.
///
/// Each share is floored and the remainder goes to the last slot, so the
/// parts always add back to `total`. Zero weights split evenly.
pub fn distribute_integer(total: u64, weights: &[f64]) -> Vec<u64> {
    if weights.is_empty() {
        return Vec::new();
    }
    let weight_sum: f64 = weights.iter().sum();
    let mut parts: Vec<u64> = weights
        .iter()
        .map(|w| {
            let share = if weight_sum > 0.0 {
                w / weight_sum
            } else {
                1.0 / weights.len() as f64
            };
            (total as f64 * share).floor() as u64
        })
        .collect();
    let assigned: u64 = parts.iter().sum();
    if let Some(last) = parts.last_mut() {
        *last += total.saturating_sub(assigned);
    }
    parts
}

/// Split a currency total proportionally to `weights`; the last slot absorbs
/// the floating-point remainder.
pub fn distribute_amount(total: f64, weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }
    let weight_sum: f64 = weights.iter().sum();
    let n = weights.len();
    let mut parts: Vec<f64> = weights
        .iter()
        .take(n - 1)
        .map(|w| {
            if weight_sum > 0.0 {
                (total * w / weight_sum * 100.0).round() / 100.0
            } else {
                total / n as f64
            }
        })
        .collect();
    let assigned: f64 = parts.iter().sum();
    parts.push(total - assigned);
    parts
}

/// Synthetic record set for a window, one record per bucket.
///
/// Each record sits inside its own bucket so timestamp bucketing maps
/// record `i` to bucket `i`; positional bucketing does too since they are in
/// creation order.
pub fn fallback_records(range: RangeId, now: DateTime<Utc>) -> Vec<ContentRecord> {
    let window = TimeWindow::resolve(range, now);
    let profile = mock_profile(range);
    let n = window.bucket_count;

    let view_weights = interpolate(&profile.views_curve, n);
    let revenue_weights = interpolate(&profile.revenue_curve, n);
    let views = distribute_integer(profile.views_total, &view_weights);
    let revenue = distribute_amount(profile.revenue_total, &revenue_weights);
    let comments = distribute_integer(FALLBACK_COMMENTS, &view_weights);
    let shares = distribute_integer(FALLBACK_SHARES, &view_weights);

    (0..n)
        .map(|i| ContentRecord {
            id: ContentId::new(SYNTHETIC_ID_BASE + i as i64),
            title: format!("{} sample {}", range, i + 1),
            created_at: window.sample_instant(i),
            views: views[i],
            likes: (views[i] as f64 * FALLBACK_ENGAGEMENT_RATE).round() as u64,
            comments: comments[i],
            shares: shares[i],
            watch_completion: FALLBACK_WATCH_COMPLETION,
            engagement_rate: FALLBACK_ENGAGEMENT_RATE,
            engagement_diversity: 0.75,
            rewatch_rate: 0.4,
            quality_score: 0.85,
            compliance_flag: true,
            revenue_share_proportion: 0.68,
            projected_earnings: revenue[i],
        })
        .collect()
}

struct CatalogEntry {
    title: &'static str,
    /// Minutes before the catalog reference point at which it was published.
    age_minutes: i64,
    views: u64,
    likes: u64,
    comments: u64,
    shares: u64,
    watch_completion: f64,
    engagement_rate: f64,
    engagement_diversity: f64,
    rewatch_rate: f64,
    quality_score: f64,
    revenue_share_proportion: f64,
    projected_earnings: f64,
}

const CATALOG: [CatalogEntry; 10] = [
    CatalogEntry { title: "Dancing Challenge #FYP", age_minutes: 810, views: 450_000, likes: 35_000, comments: 2_300, shares: 1_500, watch_completion: 0.85, engagement_rate: 0.082, engagement_diversity: 0.75, rewatch_rate: 0.45, quality_score: 0.88, revenue_share_proportion: 0.68, projected_earnings: 125.4 },
    CatalogEntry { title: "Cooking Tutorial: Pasta", age_minutes: 2_025, views: 320_000, likes: 28_000, comments: 1_800, shares: 1_200, watch_completion: 0.78, engagement_rate: 0.089, engagement_diversity: 0.82, rewatch_rate: 0.35, quality_score: 0.91, revenue_share_proportion: 0.72, projected_earnings: 98.75 },
    CatalogEntry { title: "Pet Compilation Funny", age_minutes: 3_315, views: 480_000, likes: 42_000, comments: 2_800, shares: 2_200, watch_completion: 0.92, engagement_rate: 0.104, engagement_diversity: 0.68, rewatch_rate: 0.62, quality_score: 0.79, revenue_share_proportion: 0.85, projected_earnings: 189.3 },
    CatalogEntry { title: "Fashion Trends 2024", age_minutes: 5_080, views: 280_000, likes: 22_000, comments: 1_200, shares: 800, watch_completion: 0.72, engagement_rate: 0.087, engagement_diversity: 0.91, rewatch_rate: 0.28, quality_score: 0.94, revenue_share_proportion: 0.59, projected_earnings: 67.85 },
    CatalogEntry { title: "Life Hacks You Need", age_minutes: 6_650, views: 380_000, likes: 31_000, comments: 1_900, shares: 1_300, watch_completion: 0.81, engagement_rate: 0.093, engagement_diversity: 0.77, rewatch_rate: 0.41, quality_score: 0.86, revenue_share_proportion: 0.74, projected_earnings: 89.6 },
    CatalogEntry { title: "Travel Vlog: Japan", age_minutes: 7_835, views: 420_000, likes: 36_000, comments: 2_100, shares: 1_600, watch_completion: 0.88, engagement_rate: 0.089, engagement_diversity: 0.84, rewatch_rate: 0.52, quality_score: 0.92, revenue_share_proportion: 0.76, projected_earnings: 134.5 },
    CatalogEntry { title: "Gaming Highlights Epic", age_minutes: 8_900, views: 350_000, likes: 29_000, comments: 1_700, shares: 1_100, watch_completion: 0.75, engagement_rate: 0.091, engagement_diversity: 0.71, rewatch_rate: 0.48, quality_score: 0.83, revenue_share_proportion: 0.69, projected_earnings: 102.8 },
    CatalogEntry { title: "Workout Routine at Home", age_minutes: 11_085, views: 290_000, likes: 24_000, comments: 1_400, shares: 900, watch_completion: 0.79, engagement_rate: 0.088, engagement_diversity: 0.79, rewatch_rate: 0.36, quality_score: 0.89, revenue_share_proportion: 0.71, projected_earnings: 78.9 },
    CatalogEntry { title: "Art Tutorial: Watercolor", age_minutes: 12_030, views: 220_000, likes: 18_000, comments: 950, shares: 600, watch_completion: 0.83, engagement_rate: 0.091, engagement_diversity: 0.88, rewatch_rate: 0.31, quality_score: 0.95, revenue_share_proportion: 0.63, projected_earnings: 56.4 },
    CatalogEntry { title: "Music Cover Acoustic", age_minutes: 13_635, views: 360_000, likes: 30_000, comments: 1_600, shares: 1_000, watch_completion: 0.86, engagement_rate: 0.092, engagement_diversity: 0.73, rewatch_rate: 0.44, quality_score: 0.87, revenue_share_proportion: 0.77, projected_earnings: 91.2 },
];

/// The ten-video sample catalog, ids 1..=10, published relative to `now`.
pub fn fallback_catalog(now: DateTime<Utc>) -> Vec<ContentRecord> {
    CATALOG
        .iter()
        .zip(1..)
        .map(|(entry, id)| ContentRecord {
            id: ContentId::new(id),
            title: entry.title.to_string(),
            created_at: now - Duration::minutes(entry.age_minutes),
            views: entry.views,
            likes: entry.likes,
            comments: entry.comments,
            shares: entry.shares,
            watch_completion: entry.watch_completion,
            engagement_rate: entry.engagement_rate,
            engagement_diversity: entry.engagement_diversity,
            rewatch_rate: entry.rewatch_rate,
            quality_score: entry.quality_score,
            compliance_flag: true,
            revenue_share_proportion: entry.revenue_share_proportion,
            projected_earnings: entry.projected_earnings,
        })
        .collect()
}

fn to_shares(pairs: &[(&str, f64)]) -> Vec<AudienceShare> {
    pairs
        .iter()
        .map(|(label, weight)| AudienceShare::new(*label, *weight))
        .collect()
}

fn known_audience(content_id: ContentId) -> Option<AudienceProfile> {
    let (age, female, locations): ([f64; 5], f64, [(&str, f64); 5]) = match content_id.value() {
        1 => (
            [32.5, 28.1, 22.4, 12.8, 4.2],
            64.2,
            [("United States", 45.3), ("Brazil", 18.7), ("India", 12.4), ("Mexico", 8.9), ("Others", 14.7)],
        ),
        2 => (
            [18.2, 34.7, 28.9, 15.1, 3.1],
            58.4,
            [("United States", 38.9), ("United Kingdom", 22.1), ("Canada", 15.7), ("Australia", 11.2), ("Others", 12.1)],
        ),
        3 => (
            [28.4, 25.8, 24.1, 16.2, 5.5],
            52.7,
            [("United States", 42.1), ("Germany", 16.3), ("France", 13.8), ("Japan", 9.4), ("Others", 18.4)],
        ),
        4 => (
            [15.3, 42.1, 28.7, 11.2, 2.7],
            78.9,
            [("United States", 35.2), ("Italy", 19.8), ("France", 17.4), ("Spain", 12.7), ("Others", 14.9)],
        ),
        5 => (
            [22.8, 31.5, 26.9, 14.1, 4.7],
            61.3,
            [("United States", 41.8), ("India", 20.4), ("Philippines", 14.2), ("Indonesia", 10.1), ("Others", 13.5)],
        ),
        _ => return None,
    };

    let age: Vec<(&str, f64)> = AGE_BRACKETS.iter().copied().zip(age).collect();
    Some(AudienceProfile {
        age: to_shares(&age),
        gender: to_shares(&[("Female", female), ("Male", 100.0 - female)]),
        locations: to_shares(&locations),
    })
}

const COUNTRY_POOL: [&str; 12] = [
    "Brazil",
    "India",
    "Mexico",
    "United Kingdom",
    "Canada",
    "Germany",
    "France",
    "Japan",
    "Indonesia",
    "Philippines",
    "Spain",
    "Australia",
];

/// Audience profile for content the source could not describe.
///
/// Catalog videos 1-5 carry their recorded audiences; anything else gets a
/// profile synthesized from a generator seeded with the content id, so the
/// same id always produces the same profile.
pub fn fallback_audience(content_id: ContentId) -> AudienceProfile {
    if let Some(profile) = known_audience(content_id) {
        return profile;
    }

    let mut rng = StdRng::seed_from_u64(content_id.value() as u64);
    let base_age = [22.0, 30.0, 26.0, 15.0, 7.0];
    let age: Vec<(&str, f64)> = AGE_BRACKETS
        .iter()
        .zip(base_age)
        .map(|(label, base)| (*label, base * rng.gen_range(0.7..1.3)))
        .collect();
    let female = rng.gen_range(40.0..75.0);

    let mut pool = COUNTRY_POOL.to_vec();
    pool.shuffle(&mut rng);
    let mut locations = vec![("United States", rng.gen_range(30.0..46.0))];
    let mut next = rng.gen_range(15.0..22.0);
    for country in pool.into_iter().take(4) {
        locations.push((country, next));
        next *= rng.gen_range(0.6..0.9);
    }
    locations.push(("Others", rng.gen_range(10.0..20.0)));

    AudienceProfile {
        age: to_shares(&age),
        gender: to_shares(&[("Female", female), ("Male", 100.0 - female)]),
        locations: to_shares(&locations),
    }
}
