use crate::models::{ParsedRange, StudentPreferences, UniversityRecord};

/// Check a university against the student's categorical selections
///
/// Specialty and ownership must both be selected, and either the state or
/// the geopolitical region must be. An empty selection matches nothing.
#[inline]
pub fn matches_categories(
    university: &UniversityRecord,
    preferences: &StudentPreferences,
) -> bool {
    if !preferences.specialties.contains(&university.specialty) {
        return false;
    }

    if !preferences.ownerships.contains(&university.ownership) {
        return false;
    }

    preferences.states.contains(&university.state)
        || preferences.regions.contains(&university.geopolitical_region)
}

/// Check whether the university's tuition band overlaps the student's budget
#[inline]
pub fn matches_tuition(university: &UniversityRecord, student_tuition: &ParsedRange) -> bool {
    student_tuition.overlaps(&university.tuition)
}
