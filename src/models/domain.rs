use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::interval::{range_distance, ranges_overlap};

/// Numeric band with optional bounds
///
/// `None` on the min side stands for negative infinity and `None` on the max
/// side for positive infinity. When both bounds are present `min <= max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl ParsedRange {
    /// Fully unbounded range, overlaps everything
    pub const UNBOUNDED: ParsedRange = ParsedRange { min: None, max: None };

    /// Build a range, swapping the bounds if they arrive reversed
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => Self { min: Some(hi), max: Some(lo) },
            _ => Self { min, max },
        }
    }

    pub fn exact(value: i64) -> Self {
        Self { min: Some(value), max: Some(value) }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    #[inline]
    pub fn overlaps(&self, other: &ParsedRange) -> bool {
        ranges_overlap(self.min, self.max, other.min, other.max)
    }

    /// Gap from this (student) range to `target`; see [`range_distance`]
    #[inline]
    pub fn distance_to(&self, target: &ParsedRange) -> f64 {
        range_distance(self.min, self.max, target.min, target.max)
    }
}

/// University catalog entry, read-only for the duration of a match request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversityRecord {
    pub id: i32,
    pub name: String,
    #[serde(rename = "geopoliticalRegion")]
    pub geopolitical_region: String,
    pub state: String,
    pub specialty: String,
    pub ownership: String,
    #[serde(rename = "type", default)]
    pub university_type: Option<String>,
    #[serde(rename = "academicRigor", default)]
    pub academic_rigor: Option<i32>,
    #[serde(rename = "sportsFacilities", default)]
    pub sports_facilities: Option<i32>,
    #[serde(rename = "hostelQuality", default)]
    pub hostel_quality: Option<i32>,
    #[serde(rename = "socialLife", default)]
    pub social_life: Option<i32>,
    #[serde(default)]
    pub tuition: ParsedRange,
    #[serde(rename = "costOfLiving", default)]
    pub cost_of_living: ParsedRange,
    #[serde(rename = "tuitionDisplay", default)]
    pub tuition_display: Option<String>,
    #[serde(rename = "costOfLivingDisplay", default)]
    pub cost_of_living_display: Option<String>,
    #[serde(rename = "sourceUrl1", default)]
    pub source_url_1: Option<String>,
    #[serde(rename = "sourceUrl2", default)]
    pub source_url_2: Option<String>,
}

/// Catalog row ready to be inserted; the database assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewUniversity {
    pub name: String,
    pub geopolitical_region: String,
    pub state: String,
    pub specialty: String,
    pub ownership: String,
    pub university_type: Option<String>,
    pub academic_rigor: Option<i32>,
    pub sports_facilities: Option<i32>,
    pub hostel_quality: Option<i32>,
    pub social_life: Option<i32>,
    pub tuition: ParsedRange,
    pub cost_of_living: ParsedRange,
    pub tuition_display: Option<String>,
    pub cost_of_living_display: Option<String>,
    pub source_url_1: Option<String>,
    pub source_url_2: Option<String>,
}

/// Student matching preferences
///
/// The categorical sets hold trimmed, non-empty values. Importances are
/// intended to be 1-5 but are used as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPreferences {
    pub specialties: HashSet<String>,
    pub ownerships: HashSet<String>,
    pub states: HashSet<String>,
    pub regions: HashSet<String>,
    pub academic_importance: i32,
    pub hostel_importance: i32,
    pub sports_importance: i32,
    pub social_life_importance: i32,
    pub tuition_range: Option<String>,
    pub cost_of_living_range: Option<String>,
}

/// Collect free-text selections into a set, dropping blank entries
pub fn preference_set<I, S>(values: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// A university paired with the score it earned in this request
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub university: &'a UniversityRecord,
    pub score: f64,
}

/// Ranked university as returned to the caller
///
/// Ranges are shown using the original catalog text, not the parsed bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityMatch {
    pub id: i32,
    pub name: String,
    #[serde(rename = "geopoliticalRegion")]
    pub geopolitical_region: String,
    pub state: String,
    pub specialty: String,
    pub ownership: String,
    #[serde(rename = "type")]
    pub university_type: Option<String>,
    #[serde(rename = "academicRigor")]
    pub academic_rigor: Option<i32>,
    #[serde(rename = "sportsFacilities")]
    pub sports_facilities: Option<i32>,
    #[serde(rename = "hostelQuality")]
    pub hostel_quality: Option<i32>,
    #[serde(rename = "socialLife")]
    pub social_life: Option<i32>,
    #[serde(rename = "tuitionDisplay")]
    pub tuition_display: Option<String>,
    #[serde(rename = "costOfLivingDisplay")]
    pub cost_of_living_display: Option<String>,
    #[serde(rename = "sourceUrl1")]
    pub source_url_1: Option<String>,
    #[serde(rename = "sourceUrl2")]
    pub source_url_2: Option<String>,
    pub score: f64,
}

impl From<ScoredCandidate<'_>> for UniversityMatch {
    fn from(candidate: ScoredCandidate<'_>) -> Self {
        let uni = candidate.university;
        Self {
            id: uni.id,
            name: uni.name.clone(),
            geopolitical_region: uni.geopolitical_region.clone(),
            state: uni.state.clone(),
            specialty: uni.specialty.clone(),
            ownership: uni.ownership.clone(),
            university_type: uni.university_type.clone(),
            academic_rigor: uni.academic_rigor,
            sports_facilities: uni.sports_facilities,
            hostel_quality: uni.hostel_quality,
            social_life: uni.social_life,
            tuition_display: uni.tuition_display.clone(),
            cost_of_living_display: uni.cost_of_living_display.clone(),
            source_url_1: uni.source_url_1.clone(),
            source_url_2: uni.source_url_2.clone(),
            score: candidate.score,
        }
    }
}

/// Scoring knobs that are not part of the student's input
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    /// Added when the cost-of-living ranges overlap
    pub cost_of_living_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cost_of_living_bonus: 5.0,
        }
    }
}
