use crate::core::{
    filters::{matches_categories, matches_tuition},
    range::parse_range,
    scoring::{calculate_fallback_score, calculate_match_score},
};
use crate::models::{
    ParsedRange, ScoredCandidate, ScoringWeights, StudentPreferences, UniversityMatch,
    UniversityRecord,
};

/// Number of universities returned when no limit is configured, and the
/// largest limit a matcher accepts
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub matches: Vec<UniversityMatch>,
    pub total_candidates: usize,
    pub used_fallback: bool,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Categorical filter + tuition overlap, survivors get a weighted score
/// 2. Fallback, only when stage 1 found nothing: categorical filter alone,
///    ranked by closeness to the tuition budget
/// 3. Stable sort by score, truncate
/// 4. Projection into output records
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    max_results: usize,
}

impl Matcher {
    /// Create a matcher returning up to `max_results` universities
    ///
    /// The limit is clamped to `1..=DEFAULT_MAX_RESULTS`.
    pub fn new(weights: ScoringWeights, max_results: usize) -> Self {
        let clamped = max_results.clamp(1, DEFAULT_MAX_RESULTS);
        if clamped != max_results {
            tracing::warn!(
                "Result limit {} is outside 1..={}, using {}",
                max_results,
                DEFAULT_MAX_RESULTS,
                clamped
            );
        }

        Self {
            weights,
            max_results: clamped,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MAX_RESULTS)
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Find the best-fit universities for a student
    ///
    /// # Arguments
    /// * `preferences` - The student's selections, importances and budget text
    /// * `candidates` - Snapshot of the full catalog, in stable order
    ///
    /// # Returns
    /// MatchResult with at most `max_results` matches, best first. Universities
    /// with equal scores keep their catalog order.
    pub fn find_matches(
        &self,
        preferences: &StudentPreferences,
        candidates: &[UniversityRecord],
    ) -> MatchResult {
        let student_tuition = parse_range(preferences.tuition_range.as_deref());
        let student_cost = parse_range(preferences.cost_of_living_range.as_deref());

        let mut scored = self.score_within_budget(preferences, candidates, &student_tuition, &student_cost);

        let used_fallback = scored.is_empty();
        if used_fallback {
            tracing::debug!("No universities within tuition range, ranking by distance to budget");
            scored = rank_by_budget_distance(preferences, candidates, &student_tuition);
        }

        tracing::debug!(
            "{} of {} universities passed filtering (fallback: {})",
            scored.len(),
            candidates.len(),
            used_fallback
        );

        // sort_by is stable, so ties keep catalog order
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(self.max_results);

        MatchResult {
            matches: scored.into_iter().map(UniversityMatch::from).collect(),
            total_candidates: candidates.len(),
            used_fallback,
        }
    }

    fn score_within_budget<'a>(
        &self,
        preferences: &StudentPreferences,
        candidates: &'a [UniversityRecord],
        student_tuition: &ParsedRange,
        student_cost: &ParsedRange,
    ) -> Vec<ScoredCandidate<'a>> {
        candidates
            .iter()
            .filter(|uni| matches_categories(uni, preferences))
            .filter(|uni| matches_tuition(uni, student_tuition))
            .map(|uni| ScoredCandidate {
                university: uni,
                score: calculate_match_score(uni, preferences, student_cost, &self.weights),
            })
            .collect()
    }
}

fn rank_by_budget_distance<'a>(
    preferences: &StudentPreferences,
    candidates: &'a [UniversityRecord],
    student_tuition: &ParsedRange,
) -> Vec<ScoredCandidate<'a>> {
    candidates
        .iter()
        .filter(|uni| matches_categories(uni, preferences))
        .map(|uni| ScoredCandidate {
            university: uni,
            score: calculate_fallback_score(uni, student_tuition),
        })
        .collect()
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preference_set;

    fn create_candidate(id: i32, state: &str, tuition: ParsedRange, academic_rigor: Option<i32>) -> UniversityRecord {
        UniversityRecord {
            id,
            name: format!("University {}", id),
            geopolitical_region: "South West".to_string(),
            state: state.to_string(),
            specialty: "Conventional".to_string(),
            ownership: "Federal".to_string(),
            university_type: None,
            academic_rigor,
            sports_facilities: None,
            hostel_quality: None,
            social_life: None,
            tuition,
            cost_of_living: ParsedRange::new(Some(300_000), Some(400_000)),
            tuition_display: Some(format!("display {}", id)),
            cost_of_living_display: Some("300,000 - 400,000 naira".to_string()),
            source_url_1: None,
            source_url_2: None,
        }
    }

    fn create_preferences(tuition: &str) -> StudentPreferences {
        StudentPreferences {
            specialties: preference_set(["Conventional"]),
            ownerships: preference_set(["Federal"]),
            states: preference_set(["Lagos"]),
            regions: preference_set(["South West"]),
            academic_importance: 3,
            hostel_importance: 0,
            sports_importance: 0,
            social_life_importance: 0,
            tuition_range: Some(tuition.to_string()),
            cost_of_living_range: Some("50,000 - 80,000 naira".to_string()),
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let matcher = Matcher::with_default_weights();
        let preferences = create_preferences("100,000 - 300,000 naira");

        let candidates = vec![create_candidate(1, "Lagos", ParsedRange::new(Some(150_000), Some(250_000)), Some(5))];

        let result = matcher.find_matches(&preferences, &candidates);

        assert!(!result.used_fallback);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].score, 15.0);
        assert_eq!(result.matches[0].tuition_display.as_deref(), Some("display 1"));
    }

    #[test]
    fn test_primary_pass_excludes_over_budget() {
        let matcher = Matcher::with_default_weights();
        let preferences = create_preferences("Less than 200,000");

        let candidates = vec![
            create_candidate(1, "Lagos", ParsedRange::new(Some(150_000), Some(250_000)), Some(1)),
            create_candidate(2, "Lagos", ParsedRange::new(Some(900_000), Some(950_000)), Some(5)),
        ];

        let result = matcher.find_matches(&preferences, &candidates);

        assert!(!result.used_fallback);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].id, 1);
    }

    #[test]
    fn test_fallback_ranks_by_budget_distance() {
        let matcher = Matcher::with_default_weights();
        let preferences = create_preferences("Less than 100,000");

        let candidates = vec![
            create_candidate(1, "Lagos", ParsedRange::new(Some(800_000), Some(900_000)), Some(5)),
            create_candidate(2, "Lagos", ParsedRange::new(Some(500_000), Some(600_000)), Some(1)),
            create_candidate(3, "Ogun", ParsedRange::new(Some(200_000), Some(300_000)), None),
        ];

        let result = matcher.find_matches(&preferences, &candidates);

        assert!(result.used_fallback);
        let ids: Vec<i32> = result.matches.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(result.matches[0].score, -100_000.0);
        assert_eq!(result.matches[1].score, -400_000.0);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let matcher = Matcher::with_default_weights();
        let preferences = create_preferences("100,000 - 300,000 naira");

        let candidates: Vec<UniversityRecord> = (0..5)
            .map(|i| create_candidate(i, "Lagos", ParsedRange::exact(200_000), Some(4)))
            .collect();

        let result = matcher.find_matches(&preferences, &candidates);

        let ids: Vec<i32> = result.matches.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let preferences = create_preferences("100,000 - 300,000 naira");

        let candidates: Vec<UniversityRecord> = (0..25)
            .map(|i| create_candidate(i, "Lagos", ParsedRange::exact(200_000), Some(i % 5 + 1)))
            .collect();

        let result = matcher.find_matches(&preferences, &candidates);

        assert_eq!(result.matches.len(), DEFAULT_MAX_RESULTS);
        assert_eq!(result.total_candidates, 25);
        for pair in result.matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_custom_limit() {
        let matcher = Matcher::new(ScoringWeights::default(), 2);
        let preferences = create_preferences("100,000 - 300,000 naira");

        let candidates: Vec<UniversityRecord> = (0..5)
            .map(|i| create_candidate(i, "Lagos", ParsedRange::exact(200_000), Some(3)))
            .collect();

        assert_eq!(matcher.find_matches(&preferences, &candidates).matches.len(), 2);
    }

    #[test]
    fn test_limit_is_clamped() {
        let preferences = create_preferences("100,000 - 300,000 naira");
        let candidates: Vec<UniversityRecord> = (0..30)
            .map(|i| create_candidate(i, "Lagos", ParsedRange::exact(200_000), Some(3)))
            .collect();

        let generous = Matcher::new(ScoringWeights::default(), 50);
        assert_eq!(generous.max_results(), DEFAULT_MAX_RESULTS);
        let result = generous.find_matches(&preferences, &candidates);
        assert_eq!(result.matches.len(), DEFAULT_MAX_RESULTS);

        let empty = Matcher::new(ScoringWeights::default(), 0);
        assert_eq!(empty.max_results(), 1);
        assert_eq!(empty.find_matches(&preferences, &candidates).matches.len(), 1);
    }

    #[test]
    fn test_fallback_ties_keep_catalog_order() {
        let matcher = Matcher::with_default_weights();
        let preferences = create_preferences("100,000 - 200,000 naira");

        // 7 and 1 miss the budget by 50,000, the rest by 100,000 from either side
        let candidates = vec![
            create_candidate(4, "Lagos", ParsedRange::new(Some(300_000), None), Some(5)),
            create_candidate(7, "Lagos", ParsedRange::exact(50_000), None),
            create_candidate(2, "Ogun", ParsedRange::exact(300_000), Some(1)),
            create_candidate(9, "Lagos", ParsedRange::new(None, Some(0)), Some(2)),
            create_candidate(1, "Lagos", ParsedRange::new(Some(250_000), Some(260_000)), Some(4)),
        ];

        let result = matcher.find_matches(&preferences, &candidates);

        assert!(result.used_fallback);
        let ids: Vec<i32> = result.matches.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![7, 1, 4, 2, 9]);
        assert_eq!(result.matches[0].score, -50_000.0);
        assert_eq!(result.matches[4].score, -100_000.0);
    }

    #[test]
    fn test_empty_pool() {
        let matcher = Matcher::with_default_weights();
        let result = matcher.find_matches(&create_preferences("100,000 - 300,000 naira"), &[]);

        assert!(result.matches.is_empty());
        assert!(result.used_fallback);
        assert_eq!(result.total_candidates, 0);
    }
}
