//! Reporting windows and bucket labelling.
//!
//! A [`RangeId`] names one of the fixed reporting windows. Resolving it against
//! an anchor instant produces a [`TimeWindow`], which knows its cutoff, how many
//! chart buckets it has and how each bucket is labelled.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Bucket count used for the year-long window.
pub const YEAR_BUCKET_COUNT: usize = 12;

/// Reporting window identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RangeId {
    #[default]
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
}

impl RangeId {
    pub const ALL: [RangeId; 4] = [
        RangeId::SevenDays,
        RangeId::ThirtyDays,
        RangeId::NinetyDays,
        RangeId::OneYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeId::SevenDays => "7d",
            RangeId::ThirtyDays => "30d",
            RangeId::NinetyDays => "90d",
            RangeId::OneYear => "1y",
        }
    }

    /// Parse a range identifier, falling back to `7d` for anything unknown.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::debug!("Unknown range id '{}', defaulting to 7d", s);
            RangeId::default()
        })
    }

    /// Window length in days.
    pub fn days(&self) -> u32 {
        match self {
            RangeId::SevenDays => 7,
            RangeId::ThirtyDays => 30,
            RangeId::NinetyDays => 90,
            RangeId::OneYear => 365,
        }
    }

    pub fn bucket_count(&self) -> usize {
        match self {
            RangeId::OneYear => YEAR_BUCKET_COUNT,
            other => other.days() as usize,
        }
    }

    pub fn label_format(&self) -> LabelFormat {
        match self {
            RangeId::OneYear => LabelFormat::MonthAbbrev,
            _ => LabelFormat::DayOfMonth,
        }
    }
}

impl FromStr for RangeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(RangeId::SevenDays),
            "30d" => Ok(RangeId::ThirtyDays),
            "90d" => Ok(RangeId::NinetyDays),
            "1y" => Ok(RangeId::OneYear),
            _ => Err(format!("Unknown range id: {}", s)),
        }
    }
}

impl fmt::Display for RangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How bucket labels are rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFormat {
    /// Day of month, e.g. `"24"`.
    DayOfMonth,
    /// Three-letter month, e.g. `"Mar"`.
    MonthAbbrev,
}

/// A resolved reporting window anchored at a specific instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow {
    pub range: RangeId,
    pub days: u32,
    pub bucket_count: usize,
    pub label_format: LabelFormat,
    pub anchor: DateTime<Utc>,
}

impl TimeWindow {
    pub fn resolve(range: RangeId, anchor: DateTime<Utc>) -> Self {
        Self {
            range,
            days: range.days(),
            bucket_count: range.bucket_count(),
            label_format: range.label_format(),
            anchor,
        }
    }

    /// Oldest instant still inside the window (inclusive).
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.anchor - Duration::days(self.days as i64)
    }

    pub fn window_seconds(&self) -> i64 {
        self.days as i64 * SECONDS_PER_DAY
    }

    /// Width of a single bucket in seconds.
    pub fn bucket_seconds(&self) -> i64 {
        (self.window_seconds() / self.bucket_count.max(1) as i64).max(1)
    }

    fn steps_back(&self, index: usize) -> usize {
        self.bucket_count.saturating_sub(1).saturating_sub(index)
    }

    /// Newest instant represented by bucket `index` (0 = oldest).
    ///
    /// Year buckets are calendar months: bucket `index` is the anchor shifted
    /// back by whole months, with the day clamped to the end of that month.
    pub fn bucket_instant(&self, index: usize) -> DateTime<Utc> {
        let steps_back = self.steps_back(index);
        match self.label_format {
            LabelFormat::DayOfMonth => {
                self.anchor - Duration::seconds(steps_back as i64 * self.bucket_seconds())
            }
            LabelFormat::MonthAbbrev => self
                .anchor
                .checked_sub_months(Months::new(steps_back as u32))
                .unwrap_or_else(|| self.cutoff()),
        }
    }

    /// An instant that falls inside bucket `index` and inside the window.
    pub fn sample_instant(&self, index: usize) -> DateTime<Utc> {
        match self.label_format {
            LabelFormat::DayOfMonth => {
                let span = self.bucket_seconds();
                self.bucket_instant(index) - Duration::seconds(span / 2)
            }
            LabelFormat::MonthAbbrev => self.bucket_instant(index),
        }
    }

    /// Display label for bucket `index`.
    pub fn label(&self, index: usize) -> String {
        let instant = self.bucket_instant(index);
        match self.label_format {
            LabelFormat::DayOfMonth => instant.day().to_string(),
            LabelFormat::MonthAbbrev => instant.format("%b").to_string(),
        }
    }

    /// All labels, oldest first.
    pub fn labels(&self) -> Vec<String> {
        (0..self.bucket_count).map(|i| self.label(i)).collect()
    }

    /// Bucket index for a timestamp by its age relative to the anchor.
    ///
    /// Short windows use fixed-width buckets; the year window counts calendar
    /// months back from the anchor's month. Timestamps newer than the anchor
    /// land in the newest bucket; timestamps older than the first bucket land
    /// in the oldest.
    pub fn bucket_index_for(&self, timestamp: DateTime<Utc>) -> usize {
        let last = self.bucket_count.saturating_sub(1);
        let steps_back = match self.label_format {
            LabelFormat::DayOfMonth => {
                let age = (self.anchor - timestamp).num_seconds().max(0);
                (age / self.bucket_seconds()) as usize
            }
            LabelFormat::MonthAbbrev => {
                let months = |t: DateTime<Utc>| t.year() as i64 * 12 + t.month0() as i64;
                (months(self.anchor) - months(timestamp)).max(0) as usize
            }
        };
        last.saturating_sub(steps_back)
    }
}
