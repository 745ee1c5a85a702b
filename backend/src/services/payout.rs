//! Quality-weighted payout inputs.
//!
//! Two deterministic steps that feed the platform's payout optimizers:
//!
//! - **Ad pool weights.** Each compliant item earns merit `M = views × Q`,
//!   its pool share is `s = M / ΣM` and its concave weight is `w = s^α`
//!   (α = [`AD_POOL_ALPHA`] by default). Non-compliant items get zero.
//! - **Coin quality multiplier.** Gifted coins are scaled by
//!   `f(Q) = 1 + θ·Q`, or by the flat penalty η when `Q` is below the
//!   quality threshold.
//!
//! The optimization over these inputs is not part of this crate.

use serde::{Deserialize, Serialize};

use crate::api::{ContentId, ContentRecord};

use super::detail::composite_quality_score;

/// Concavity of the ad pool weighting.
pub const AD_POOL_ALPHA: f64 = 0.7;
/// Coin multiplier slope θ.
pub const COIN_QUALITY_SLOPE: f64 = 0.8;
/// Quality below which coins are penalized.
pub const COIN_QUALITY_THRESHOLD: f64 = 0.3;
/// Flat multiplier η applied below the threshold.
pub const COIN_LOW_QUALITY_MULTIPLIER: f64 = 0.9;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PayoutError {
    /// Every item is non-compliant, unwatched or of zero quality.
    #[error("No eligible content for the ad pool (total merit is 0)")]
    NoEligibleContent,
}

/// One item competing for the ad pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdPoolCandidate {
    pub id: ContentId,
    pub views: u64,
    /// Quality score `Q` in `[0, 1]`.
    pub quality: f64,
    pub compliant: bool,
}

impl From<&ContentRecord> for AdPoolCandidate {
    fn from(record: &ContentRecord) -> Self {
        Self {
            id: record.id,
            views: record.views,
            quality: composite_quality_score(record),
            compliant: record.compliance_flag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdPoolWeight {
    pub id: ContentId,
    /// `views × Q`, zero when not compliant.
    pub merit: f64,
    /// Fraction of the total merit, in `[0, 1]`.
    pub share: f64,
    /// `share^α`, zero when the share is zero.
    pub weight: f64,
}

impl AdPoolCandidate {
    fn merit(&self) -> f64 {
        if !self.compliant {
            return 0.0;
        }
        let quality = if self.quality.is_finite() {
            self.quality.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.views as f64 * quality
    }
}

/// Merit, share and weight for every candidate, in input order.
pub fn ad_pool_weights(
    candidates: &[AdPoolCandidate],
    alpha: f64,
) -> Result<Vec<AdPoolWeight>, PayoutError> {
    let merits: Vec<f64> = candidates.iter().map(AdPoolCandidate::merit).collect();
    let total: f64 = merits.iter().sum();
    if total <= 0.0 {
        return Err(PayoutError::NoEligibleContent);
    }

    let weights = candidates
        .iter()
        .zip(merits)
        .map(|(candidate, merit)| {
            let share = merit / total;
            AdPoolWeight {
                id: candidate.id,
                merit,
                share,
                weight: if share > 0.0 { share.powf(alpha) } else { 0.0 },
            }
        })
        .collect();
    log::debug!(
        "Ad pool weights over {} candidates, total merit {:.1}",
        candidates.len(),
        total
    );
    Ok(weights)
}

/// Ad pool weights for records, scoring each with the composite quality score.
pub fn ad_pool_weights_for_records(
    records: &[ContentRecord],
) -> Result<Vec<AdPoolWeight>, PayoutError> {
    let candidates: Vec<AdPoolCandidate> = records.iter().map(AdPoolCandidate::from).collect();
    ad_pool_weights(&candidates, AD_POOL_ALPHA)
}

/// Coin payout multiplier `f(Q)`.
pub fn coin_quality_multiplier(quality: f64) -> f64 {
    if quality < COIN_QUALITY_THRESHOLD {
        COIN_LOW_QUALITY_MULTIPLIER
    } else {
        1.0 + COIN_QUALITY_SLOPE * quality
    }
}

/// Coins paid to the creator for one item, weighted by `f(Q)`.
///
/// `normal_fraction` and `premium_fraction` are the shares of gifted normal
/// and premium coins passed on to the creator.
pub fn quality_weighted_coin_payout(
    normal_coins: f64,
    premium_coins: f64,
    normal_fraction: f64,
    premium_fraction: f64,
    quality: f64,
) -> f64 {
    (normal_fraction * normal_coins + premium_fraction * premium_coins)
        * coin_quality_multiplier(quality)
}
