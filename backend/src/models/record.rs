//! Content performance records.
//!
//! A [`ContentRecord`] is one point-in-time performance snapshot for a piece of
//! content, as handed over by the record source. The engine never mutates a
//! record it was given; [`ContentRecord::sanitized`] returns a clamped copy so
//! that malformed upstream data still aggregates into a well-formed snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, CreatorId);
crate::define_id_type!(i64, ContentId);

/// Violation of a record invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("field `{field}` of content {id} must lie in [0, 1], got {value}")]
    FractionOutOfRange {
        id: ContentId,
        field: &'static str,
        value: f64,
    },

    #[error("content {id} has negative or non-finite projected earnings: {value}")]
    InvalidEarnings { id: ContentId, value: f64 },
}

/// One unit of content's performance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,
    #[serde(default)]
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub watch_completion: f64,
    pub engagement_rate: f64,
    pub engagement_diversity: f64,
    pub rewatch_rate: f64,
    pub quality_score: f64,
    pub compliance_flag: bool,
    pub revenue_share_proportion: f64,
    pub projected_earnings: f64,
}

impl ContentRecord {
    /// Named fractional fields, in declaration order.
    fn fractions(&self) -> [(&'static str, f64); 6] {
        [
            ("watch_completion", self.watch_completion),
            ("engagement_rate", self.engagement_rate),
            ("engagement_diversity", self.engagement_diversity),
            ("rewatch_rate", self.rewatch_rate),
            ("quality_score", self.quality_score),
            ("revenue_share_proportion", self.revenue_share_proportion),
        ]
    }

    /// Check the record invariants, reporting the first violation found.
    pub fn validate(&self) -> Result<(), RecordError> {
        for (field, value) in self.fractions() {
            if !(0.0..=1.0).contains(&value) {
                return Err(RecordError::FractionOutOfRange {
                    id: self.id,
                    field,
                    value,
                });
            }
        }
        if !self.projected_earnings.is_finite() || self.projected_earnings < 0.0 {
            return Err(RecordError::InvalidEarnings {
                id: self.id,
                value: self.projected_earnings,
            });
        }
        Ok(())
    }

    /// Copy of this record with every invariant enforced.
    ///
    /// Fractions are clamped into `[0, 1]`, earnings below zero become zero and
    /// NaN values become zero.
    pub fn sanitized(&self) -> ContentRecord {
        ContentRecord {
            watch_completion: clamp_fraction(self.watch_completion),
            engagement_rate: clamp_fraction(self.engagement_rate),
            engagement_diversity: clamp_fraction(self.engagement_diversity),
            rewatch_rate: clamp_fraction(self.rewatch_rate),
            quality_score: clamp_fraction(self.quality_score),
            revenue_share_proportion: clamp_fraction(self.revenue_share_proportion),
            projected_earnings: if self.projected_earnings.is_finite() {
                self.projected_earnings.max(0.0)
            } else {
                0.0
            },
            ..self.clone()
        }
    }
}

fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Sanitize a batch of records, logging each one that needed repair.
pub fn sanitize_records(records: Vec<ContentRecord>) -> Vec<ContentRecord> {
    records
        .into_iter()
        .map(|record| match record.validate() {
            Ok(()) => record,
            Err(e) => {
                log::warn!("Repairing malformed record: {}", e);
                record.sanitized()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> ContentRecord {
        ContentRecord {
            id: ContentId::new(1),
            title: "Dancing Challenge".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 8, 25, 10, 30, 0).unwrap(),
            views: 450_000,
            likes: 35_000,
            comments: 2_300,
            shares: 1_500,
            watch_completion: 0.85,
            engagement_rate: 0.082,
            engagement_diversity: 0.75,
            rewatch_rate: 0.45,
            quality_score: 0.92,
            compliance_flag: true,
            revenue_share_proportion: 0.68,
            projected_earnings: 125.4,
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(record().validate().is_ok());
    }

    #[test]
    fn test_fraction_out_of_range_is_reported() {
        let mut r = record();
        r.rewatch_rate = 1.4;
        let err = r.validate().unwrap_err();
        assert_eq!(
            err,
            RecordError::FractionOutOfRange {
                id: ContentId::new(1),
                field: "rewatch_rate",
                value: 1.4
            }
        );
    }

    #[test]
    fn test_negative_earnings_are_reported() {
        let mut r = record();
        r.projected_earnings = -3.0;
        assert!(matches!(
            r.validate(),
            Err(RecordError::InvalidEarnings { .. })
        ));
    }

    #[test]
    fn test_sanitized_clamps_everything() {
        let mut r = record();
        r.watch_completion = f64::NAN;
        r.engagement_rate = -0.2;
        r.quality_score = 7.0;
        r.projected_earnings = f64::INFINITY;

        let clean = r.sanitized();
        assert_eq!(clean.watch_completion, 0.0);
        assert_eq!(clean.engagement_rate, 0.0);
        assert_eq!(clean.quality_score, 1.0);
        assert_eq!(clean.projected_earnings, 0.0);
        assert!(clean.validate().is_ok());
        // Non-fractional fields survive untouched
        assert_eq!(clean.views, 450_000);
        assert_eq!(clean.title, "Dancing Challenge");
    }

    #[test]
    fn test_record_json_uses_plain_ids() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["views"], 450_000);
    }

    #[test]
    fn test_title_defaults_when_missing() {
        let json = r#"{
            "id": 9, "created_at": "2024-08-17T15:30:00Z",
            "views": 10, "likes": 1, "comments": 0, "shares": 0,
            "watch_completion": 0.5, "engagement_rate": 0.1,
            "engagement_diversity": 0.2, "rewatch_rate": 0.3,
            "quality_score": 0.4, "compliance_flag": true,
            "revenue_share_proportion": 0.6, "projected_earnings": 1.5
        }"#;
        let r: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.title, "");
        assert_eq!(r.id, ContentId::new(9));
    }
}
