#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use creator_analytics::api::{ContentId, ContentRecord};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Variables are restored on unwind, and access to the process environment
/// is serialized across tests running in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Fixed anchor instant shared by the integration tests.
pub fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 30, 12, 0, 0).unwrap()
}

/// Builder for test records with sensible defaults.
pub struct RecordBuilder {
    record: ContentRecord,
}

impl RecordBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            record: ContentRecord {
                id: ContentId::new(id),
                title: format!("content {}", id),
                created_at: anchor() - Duration::hours(1),
                views: 1_000,
                likes: 80,
                comments: 10,
                shares: 5,
                watch_completion: 0.6,
                engagement_rate: 0.08,
                engagement_diversity: 0.7,
                rewatch_rate: 0.3,
                quality_score: 0.85,
                compliance_flag: true,
                revenue_share_proportion: 0.68,
                projected_earnings: 10.0,
            },
        }
    }

    pub fn age(mut self, age: Duration) -> Self {
        self.record.created_at = anchor() - age;
        self
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.record.created_at = created_at;
        self
    }

    pub fn views(mut self, views: u64) -> Self {
        self.record.views = views;
        self
    }

    pub fn earnings(mut self, earnings: f64) -> Self {
        self.record.projected_earnings = earnings;
        self
    }

    pub fn engagement_rate(mut self, rate: f64) -> Self {
        self.record.engagement_rate = rate;
        self
    }

    pub fn build(self) -> ContentRecord {
        self.record
    }
}
