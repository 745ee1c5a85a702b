#[cfg(test)]
mod tests {
    use crate::api::{AnalyticsSnapshot, ContentId, CreatorId, RangeId};

    #[test]
    fn test_creator_id_new() {
        let id = CreatorId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_content_id_equality_and_ordering() {
        let id1 = ContentId::new(1);
        let id2 = ContentId::new(2);
        assert_eq!(id1, ContentId::from(1));
        assert!(id1 < id2);
    }

    #[test]
    fn test_id_conversions() {
        let raw: i64 = CreatorId::new(999).into();
        assert_eq!(raw, 999);
        assert_eq!(CreatorId::from(7).to_string(), "7");
    }

    #[test]
    fn test_range_id_serializes_as_wire_name() {
        assert_eq!(serde_json::to_string(&RangeId::OneYear).unwrap(), "\"1y\"");
        let parsed: RangeId = serde_json::from_str("\"90d\"").unwrap();
        assert_eq!(parsed, RangeId::NinetyDays);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = r#"{
            "creator_id": 3, "range": "30d", "source": "fallback", "record_count": 0,
            "total_views": 0, "total_revenue": 0.0, "total_likes": 0,
            "views_growth_pct": -100.0, "revenue_growth_pct": -100.0,
            "views_series": { "points": [], "axis": { "top": 0.0, "middle": 0.0, "bottom": 0.0 } },
            "revenue_series": { "points": [], "axis": { "top": 0.0, "middle": 0.0, "bottom": 0.0 } },
            "engagement_metrics": {
                "engagement_rate_pct": 0.0, "watch_time_pct": 0.0, "comments": 0, "shares": 0,
                "engagement_change_pct": 12.0, "watch_time_change_pct": 8.0,
                "comments_change_pct": 25.0, "shares_change_pct": -3.0
            },
            "revenue_breakdown": {
                "ad_amount": 0.0, "premium_amount": 0.0, "standard_amount": 0.0,
                "ad_pct": 68.0, "premium_pct": 20.0, "standard_pct": 12.0
            }
        }"#;
        let snapshot: AnalyticsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.creator_id, CreatorId::new(3));
        assert_eq!(snapshot.range, RangeId::ThirtyDays);
        assert_eq!(snapshot.revenue_breakdown.pct_total(), 100.0);
        assert!(snapshot.views_series.is_empty());
    }
}
