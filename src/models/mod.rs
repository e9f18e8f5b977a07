// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    preference_set, NewUniversity, ParsedRange, ScoredCandidate, ScoringWeights,
    StudentPreferences, UniversityMatch, UniversityRecord,
};
pub use requests::FindMatchesRequest;
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse};
