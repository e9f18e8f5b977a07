use crate::models::{ParsedRange, ScoringWeights, StudentPreferences, UniversityRecord};

/// Calculate the desirability score of a university that passed filtering
///
/// Scoring formula:
/// score = (
///     academic_importance * academic_rigor +
///     hostel_importance * hostel_quality +
///     sports_importance * sports_facilities +
///     social_life_importance * social_life +
///     cost_of_living_bonus            # when cost-of-living ranges overlap
/// )
///
/// Missing ratings contribute nothing. The result is not normalized.
pub fn calculate_match_score(
    university: &UniversityRecord,
    preferences: &StudentPreferences,
    student_cost_of_living: &ParsedRange,
    weights: &ScoringWeights,
) -> f64 {
    let quality_score = weighted_rating(preferences.academic_importance, university.academic_rigor)
        + weighted_rating(preferences.hostel_importance, university.hostel_quality)
        + weighted_rating(preferences.sports_importance, university.sports_facilities)
        + weighted_rating(preferences.social_life_importance, university.social_life);

    let cost_bonus = if student_cost_of_living.overlaps(&university.cost_of_living) {
        weights.cost_of_living_bonus
    } else {
        0.0
    };

    quality_score + cost_bonus
}

/// Score used when no university fits the tuition budget
///
/// Negated distance from the budget, so the closest universities rank first
/// and anything already affordable scores 0.
#[inline]
pub fn calculate_fallback_score(university: &UniversityRecord, student_tuition: &ParsedRange) -> f64 {
    0.0 - student_tuition.distance_to(&university.tuition)
}

#[inline]
fn weighted_rating(importance: i32, rating: Option<i32>) -> f64 {
    rating.map_or(0.0, |r| importance as f64 * r as f64)
}
