//! FindMyUni - University matching service
//!
//! This library provides the matching engine used by FindMyUni. It parses
//! free-text budget ranges, filters the university catalog against a
//! student's selections, scores the survivors and falls back to ranking by
//! distance from the tuition budget when nothing fits.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{parse_range, range_distance, ranges_overlap, MatchResult, Matcher};
pub use crate::models::{
    FindMatchesRequest, FindMatchesResponse, ParsedRange, ScoringWeights, StudentPreferences,
    UniversityMatch, UniversityRecord,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let range = parse_range(Some("100,000 - 300,000 naira"));
        assert!(ranges_overlap(range.min, range.max, Some(250_000), None));
    }
}
