//! Audience composition as reported by the record source.
//!
//! Weights here are raw: a source may hand back counts, fractions or
//! percentages. The detail service normalizes every group to sum to 100.

use serde::{Deserialize, Serialize};

/// One labelled slice of an audience group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceShare {
    pub label: String,
    pub weight: f64,
}

impl AudienceShare {
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
        }
    }
}

/// Raw audience profile for a single piece of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudienceProfile {
    #[serde(default)]
    pub age: Vec<AudienceShare>,
    #[serde(default)]
    pub gender: Vec<AudienceShare>,
    /// Country breakdown, in any order.
    #[serde(default)]
    pub locations: Vec<AudienceShare>,
}

/// Age brackets reported in every demographic breakdown.
pub const AGE_BRACKETS: [&str; 5] = ["13-17", "18-24", "25-34", "35-44", "45+"];

/// Gender groups reported in every demographic breakdown.
pub const GENDER_GROUPS: [&str; 2] = ["Female", "Male"];
