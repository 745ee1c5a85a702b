//! Engine configuration file support.
//!
//! Configuration is read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) yields a working configuration.
//!
//! ```toml
//! [repository]
//! type = "file"
//!
//! [file]
//! path = "data/records.json"
//!
//! [engine]
//! min_visible_height_pct = 5.0
//! bucketing = "timestamp"
//! fetch_timeout_ms = 2000
//!
//! [revenue]
//! ad_pct = 68.0
//! premium_pct = 20.0
//! standard_pct = 12.0
//!
//! [baselines."30d"]
//! views = 65000
//! revenue = 380.5
//!
//! [engagement_deltas]
//! engagement = 12.0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::db::factory::RepositoryType;
use crate::db::repository::{ErrorContext, RepositoryError};
use crate::models::RangeId;
use crate::services::buckets::BucketingMode;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "ANALYTICS_CONFIG";
/// Environment variable overriding `[file] path`.
pub const RECORDS_FILE_ENV: &str = "RECORDS_FILE";

const DEFAULT_LOCATIONS: [&str; 3] = [
    "analytics.toml",
    "backend/analytics.toml",
    "../analytics.toml",
];

const RATIO_TOLERANCE: f64 = 1e-6;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub file: FileSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub revenue: RevenueRatios,
    #[serde(default)]
    pub baselines: Baselines,
    #[serde(default)]
    pub engagement_deltas: EngagementDeltas,
}

/// Repository type settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

fn default_repo_type() -> String {
    "local".to_string()
}

/// Settings for the JSON file record source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Numeric knobs of the aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Lowest height any chart bar is drawn at, in percent.
    pub min_visible_height_pct: f64,
    pub bucketing: BucketingMode,
    /// Relative per-bucket jitter for positional bucketing, in `[0, 1)`.
    pub jitter: f64,
    pub jitter_seed: u64,
    pub fetch_timeout_ms: u64,
    /// Countries listed individually before the "Others" remainder.
    pub top_locations: usize,
    /// Reference earnings per view used for the detail KPIs.
    pub industry_earnings_per_view: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_visible_height_pct: 5.0,
            bucketing: BucketingMode::default(),
            jitter: 0.2,
            jitter_seed: 42,
            fetch_timeout_ms: 2000,
            top_locations: 4,
            industry_earnings_per_view: 0.0015,
        }
    }
}

impl EngineSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Fixed revenue split ratios, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueRatios {
    pub ad_pct: f64,
    pub premium_pct: f64,
    pub standard_pct: f64,
}

impl Default for RevenueRatios {
    fn default() -> Self {
        Self {
            ad_pct: 68.0,
            premium_pct: 20.0,
            standard_pct: 12.0,
        }
    }
}

/// Prior-period reference totals for one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub views: f64,
    pub revenue: f64,
}

impl Baseline {
    pub const fn new(views: f64, revenue: f64) -> Self {
        Self { views, revenue }
    }
}

/// Baseline per reporting window.
///
/// A table that sets only some fields keeps the built-in value for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BaselineTables")]
pub struct Baselines {
    #[serde(rename = "7d")]
    pub seven_days: Baseline,
    #[serde(rename = "30d")]
    pub thirty_days: Baseline,
    #[serde(rename = "90d")]
    pub ninety_days: Baseline,
    #[serde(rename = "1y")]
    pub one_year: Baseline,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialBaseline {
    views: Option<f64>,
    revenue: Option<f64>,
}

impl PartialBaseline {
    fn or(self, fallback: Baseline) -> Baseline {
        Baseline {
            views: self.views.unwrap_or(fallback.views),
            revenue: self.revenue.unwrap_or(fallback.revenue),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BaselineTables {
    #[serde(rename = "7d")]
    seven_days: PartialBaseline,
    #[serde(rename = "30d")]
    thirty_days: PartialBaseline,
    #[serde(rename = "90d")]
    ninety_days: PartialBaseline,
    #[serde(rename = "1y")]
    one_year: PartialBaseline,
}

impl From<BaselineTables> for Baselines {
    fn from(tables: BaselineTables) -> Self {
        let defaults = Baselines::default();
        Self {
            seven_days: tables.seven_days.or(defaults.seven_days),
            thirty_days: tables.thirty_days.or(defaults.thirty_days),
            ninety_days: tables.ninety_days.or(defaults.ninety_days),
            one_year: tables.one_year.or(defaults.one_year),
        }
    }
}

impl Default for Baselines {
    fn default() -> Self {
        Self {
            seven_days: Baseline::new(16_800.0, 106.2),
            thirty_days: Baseline::new(65_000.0, 380.5),
            ninety_days: Baseline::new(195_000.0, 1_142.3),
            one_year: Baseline::new(850_000.0, 4_856.8),
        }
    }
}

impl Baselines {
    pub fn for_range(&self, range: RangeId) -> Baseline {
        match range {
            RangeId::SevenDays => self.seven_days,
            RangeId::ThirtyDays => self.thirty_days,
            RangeId::NinetyDays => self.ninety_days,
            RangeId::OneYear => self.one_year,
        }
    }
}

/// Growth deltas for the secondary engagement metrics, in percent.
///
/// These are inputs, not derived from records: the record set carries no
/// prior-period engagement history to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementDeltas {
    pub engagement: f64,
    pub watch_time: f64,
    pub comments: f64,
    pub shares: f64,
}

impl Default for EngagementDeltas {
    fn default() -> Self {
        Self {
            engagement: 12.0,
            watch_time: 8.0,
            comments: 25.0,
            shares: -3.0,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(AnalyticsConfig)` if the file was read, parsed and validated
    /// * `Err(RepositoryError)` if file cannot be read or parsed, or fails validation
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let context = || ErrorContext::new("load_config").with_details(path.display().to_string());

        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to read config file: {}", e),
                context(),
            )
        })?;

        let config: AnalyticsConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to parse config file: {}", e),
                context(),
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the first default location that exists.
    ///
    /// Searches for `analytics.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        for path in DEFAULT_LOCATIONS.iter().map(PathBuf::from) {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No analytics.toml found in standard locations",
        ))
    }

    /// Resolve the configuration the way the server does.
    ///
    /// `ANALYTICS_CONFIG` wins, then the default locations, then built-in
    /// defaults. Environment overrides are applied last.
    pub fn load() -> Result<Self, RepositoryError> {
        let mut config = if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            Self::from_file(path)?
        } else if DEFAULT_LOCATIONS.iter().any(|p| Path::new(p).exists()) {
            Self::from_default_location()?
        } else {
            log::info!("No configuration file found, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `REPOSITORY_TYPE` and `RECORDS_FILE` on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(repo_type) = std::env::var("REPOSITORY_TYPE") {
            log::debug!("REPOSITORY_TYPE overrides repository type: {}", repo_type);
            self.repository.repo_type = repo_type;
        }
        if let Ok(path) = std::env::var(RECORDS_FILE_ENV) {
            log::debug!("{} overrides records file: {}", RECORDS_FILE_ENV, path);
            self.file.path = Some(PathBuf::from(path));
        }
    }

    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Check every cross-field constraint.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        let invalid = |msg: String| {
            RepositoryError::configuration_with_context(msg, ErrorContext::new("validate_config"))
        };

        self.repository_type()
            .map_err(|e| invalid(format!("Invalid repository type: {}", e)))?;

        let r = &self.revenue;
        let ratios = [r.ad_pct, r.premium_pct, r.standard_pct];
        if ratios.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(invalid(format!("Revenue ratios must be non-negative: {:?}", ratios)));
        }
        let sum: f64 = ratios.iter().sum();
        if (sum - 100.0).abs() > RATIO_TOLERANCE {
            return Err(invalid(format!("Revenue ratios must sum to 100, got {}", sum)));
        }

        let e = &self.engine;
        if !(0.0..=100.0).contains(&e.min_visible_height_pct) {
            return Err(invalid(format!(
                "min_visible_height_pct must lie in [0, 100], got {}",
                e.min_visible_height_pct
            )));
        }
        if !(0.0..1.0).contains(&e.jitter) {
            return Err(invalid(format!("jitter must lie in [0, 1), got {}", e.jitter)));
        }
        if e.fetch_timeout_ms == 0 {
            return Err(invalid("fetch_timeout_ms must be positive".to_string()));
        }
        if e.top_locations == 0 {
            return Err(invalid("top_locations must be at least 1".to_string()));
        }
        if !e.industry_earnings_per_view.is_finite() || e.industry_earnings_per_view <= 0.0 {
            return Err(invalid(format!(
                "industry_earnings_per_view must be positive, got {}",
                e.industry_earnings_per_view
            )));
        }

        for range in RangeId::ALL {
            let b = self.baselines.for_range(range);
            if !b.views.is_finite() || b.views < 0.0 || !b.revenue.is_finite() || b.revenue < 0.0 {
                return Err(invalid(format!("Baseline for {} must be non-negative", range)));
            }
        }

        Ok(())
    }
}
