//! End-to-end snapshot, ranking and detail reads through real record sources.

mod support;

use std::io::Write;

use chrono::Duration;
use creator_analytics::api::{ContentId, CreatorId, DataSource, RangeId};
use creator_analytics::config::AnalyticsConfig;
use creator_analytics::db::{JsonFileRepository, LocalRepository, RepositoryFactory, RepositoryType};
use creator_analytics::services;
use support::{anchor, RecordBuilder};

fn write_json(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_snapshot_from_json_file() {
    let records = vec![
        RecordBuilder::new(1).age(Duration::days(10)).views(5_000).earnings(30.0).build(),
        RecordBuilder::new(2).age(Duration::days(2)).views(2_000).earnings(12.0).build(),
        RecordBuilder::new(3).age(Duration::days(200)).views(9_000).earnings(80.0).build(),
    ];
    let file = write_json(&serde_json::to_string(&records).unwrap());
    let repo = JsonFileRepository::new(file.path());
    let config = AnalyticsConfig::default();

    let week =
        services::get_snapshot_at(&repo, &config, CreatorId::new(1), "7d", anchor()).await;
    assert_eq!(week.source, DataSource::Live);
    assert_eq!(week.record_count, 1);
    assert_eq!(week.total_views, 2_000);

    let month =
        services::get_snapshot_at(&repo, &config, CreatorId::new(1), "30d", anchor()).await;
    assert_eq!(month.record_count, 2);
    assert_eq!(month.total_views, 7_000);
    assert!((month.total_revenue - 42.0).abs() < 1e-9);

    let year = services::get_snapshot_at(&repo, &config, CreatorId::new(1), "1y", anchor()).await;
    assert_eq!(year.record_count, 3);
    assert_eq!(year.views_series.len(), 12);
    assert_eq!(year.range, RangeId::OneYear);
}

#[tokio::test]
async fn test_malformed_records_are_repaired() {
    let mut broken = RecordBuilder::new(1).engagement_rate(1.5).build();
    broken.projected_earnings = -4.0;
    let repo = LocalRepository::new();
    repo.insert_records(CreatorId::new(2), vec![broken, RecordBuilder::new(2).build()]);

    let snapshot = services::get_snapshot_at(
        &repo,
        &AnalyticsConfig::default(),
        CreatorId::new(2),
        "7d",
        anchor(),
    )
    .await;
    assert_eq!(snapshot.record_count, 2);
    assert!(snapshot.engagement_metrics.engagement_rate_pct <= 100.0);
    assert!((snapshot.engagement_metrics.engagement_rate_pct - 54.0).abs() < 1e-9);
    assert!((snapshot.total_revenue - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_corrupt_or_missing_file_falls_back() {
    let config = AnalyticsConfig::default();
    let corrupt = write_json("{ not json");
    let repo = JsonFileRepository::new(corrupt.path());
    let snapshot =
        services::get_snapshot_at(&repo, &config, CreatorId::new(1), "30d", anchor()).await;
    assert_eq!(snapshot.source, DataSource::Fallback);
    assert_eq!(snapshot.total_views, 86_500);

    let missing = JsonFileRepository::new("/definitely/not/here/records.json");
    let snapshot =
        services::get_snapshot_at(&missing, &config, CreatorId::new(1), "1y", anchor()).await;
    assert_eq!(snapshot.source, DataSource::Fallback);
    assert_eq!(snapshot.total_views, 985_000);
    assert!((snapshot.total_revenue - 5_825.40).abs() < 1e-6);

    let top = services::get_top_performing_at(&missing, &config, CreatorId::new(1), 5, anchor())
        .await;
    assert_eq!(top.source, DataSource::Fallback);
    assert_eq!(top.items.len(), 5);
}

#[tokio::test]
async fn test_detail_with_audiences_from_file() {
    let records = vec![RecordBuilder::new(7).views(10_000).earnings(25.0).build()];
    let document = serde_json::json!({
        "records": records,
        "audiences": {
            "7": {
                "age": [
                    { "label": "18-24", "weight": 600 },
                    { "label": "25-34", "weight": 400 }
                ],
                "gender": [
                    { "label": "Female", "weight": 0.3 },
                    { "label": "Male", "weight": 0.7 }
                ],
                "locations": [
                    { "label": "Canada", "weight": 50 },
                    { "label": "Chile", "weight": 30 },
                    { "label": "Kenya", "weight": 20 }
                ]
            }
        }
    });
    let file = write_json(&document.to_string());
    let repo = JsonFileRepository::new(file.path());
    let mut config = AnalyticsConfig::default();
    config.engine.top_locations = 2;

    let detail = services::get_content_detail_at(
        &repo,
        &config,
        CreatorId::new(1),
        ContentId::new(7),
        anchor(),
    )
    .await
    .unwrap();

    assert_eq!(detail.source, DataSource::Live);
    assert_eq!(detail.demographics.age[1].pct, 60.0);
    assert_eq!(detail.demographics.age[2].pct, 40.0);
    assert_eq!(detail.demographics.gender[1].pct, 70.0);
    let labels: Vec<&str> = detail.locations.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Canada", "Chile", "Others"]);
    assert_eq!(detail.locations[2].pct, 20.0);
    assert!(detail.split_validation.is_valid);
    assert!((detail.kpis.earnings_per_view - 0.0025).abs() < 1e-12);
}

#[tokio::test]
async fn test_factory_builds_file_source_from_env() {
    let records = vec![RecordBuilder::new(1).views(321).build()];
    let file = write_json(&serde_json::to_string(&records).unwrap());
    let path = file.path().to_string_lossy().to_string();

    let repo = support::with_scoped_env(
        &[("REPOSITORY_TYPE", None), ("RECORDS_FILE", Some(&path))],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::File);
            RepositoryFactory::from_env().unwrap()
        },
    );

    assert!(services::health_check(repo.as_ref()).await.unwrap());
    let snapshot = services::get_snapshot_at(
        repo.as_ref(),
        &AnalyticsConfig::default(),
        CreatorId::new(1),
        "7d",
        anchor(),
    )
    .await;
    assert_eq!(snapshot.total_views, 321);
}
