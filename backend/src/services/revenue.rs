//! Revenue splitting and split validation.

use crate::api::{ContentRecord, RevenueBreakdown, SplitValidation};
use crate::config::RevenueRatios;

/// Tolerance on the reconstructed amount total.
pub const AMOUNT_TOLERANCE: f64 = 0.01;
/// Tolerance on the percentage total.
pub const PERCENT_TOLERANCE: f64 = 0.1;

/// Split `amount` by percentages. The standard share absorbs every rounding
/// remainder, so percentages add to exactly 100 and amounts to `amount`.
fn split(amount: f64, ad_pct: f64, premium_pct: f64) -> RevenueBreakdown {
    let ad_amount = amount * ad_pct / 100.0;
    let premium_amount = amount * premium_pct / 100.0;
    RevenueBreakdown {
        ad_amount,
        premium_amount,
        standard_amount: amount - ad_amount - premium_amount,
        ad_pct,
        premium_pct,
        standard_pct: 100.0 - ad_pct - premium_pct,
    }
}

/// Split an aggregate total by the configured fixed ratios.
pub fn allocate(total_revenue: f64, ratios: &RevenueRatios) -> RevenueBreakdown {
    split(total_revenue, ratios.ad_pct, ratios.premium_pct)
}

/// Split one record's earnings using its own revenue share.
///
/// The ad share is the record's `revenue_share_proportion`; the remainder is
/// divided between premium and standard in the configured premium:standard
/// ratio (evenly if both are zero).
pub fn split_record(record: &ContentRecord, ratios: &RevenueRatios) -> RevenueBreakdown {
    let ad_pct = record.revenue_share_proportion.clamp(0.0, 1.0) * 100.0;
    let remaining = 100.0 - ad_pct;
    let coin_ratio = ratios.premium_pct + ratios.standard_pct;
    let premium_share = if coin_ratio > 0.0 {
        ratios.premium_pct / coin_ratio
    } else {
        0.5
    };
    split(record.projected_earnings, ad_pct, remaining * premium_share)
}

/// Compare a split's reconstructed total against the expected total.
pub fn validate_split(breakdown: &RevenueBreakdown, expected_total: f64) -> SplitValidation {
    let calculated_total = breakdown.amount_total();
    let percentage_total = breakdown.pct_total();
    let is_valid = (calculated_total - expected_total).abs() < AMOUNT_TOLERANCE
        && (percentage_total - 100.0).abs() < PERCENT_TOLERANCE;

    if !is_valid {
        log::warn!(
            "Revenue split does not reconstruct: amounts {:.4} vs {:.4}, percentages {:.3}",
            calculated_total,
            expected_total,
            percentage_total
        );
    }

    SplitValidation {
        calculated_total,
        expected_total,
        percentage_total,
        is_valid,
    }
}
