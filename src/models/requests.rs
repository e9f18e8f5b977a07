use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{preference_set, StudentPreferences};

/// Request to find university matches for a student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub ownerships: Vec<String>,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[validate(range(min = 0, max = 5))]
    #[serde(alias = "academic_importance", rename = "academicImportance")]
    pub academic_importance: i32,
    #[validate(range(min = 0, max = 5))]
    #[serde(alias = "hostel_importance", rename = "hostelImportance")]
    pub hostel_importance: i32,
    #[validate(range(min = 0, max = 5))]
    #[serde(alias = "sports_importance", rename = "sportsImportance")]
    pub sports_importance: i32,
    #[validate(range(min = 0, max = 5))]
    #[serde(alias = "social_life_importance", rename = "socialLifeImportance")]
    pub social_life_importance: i32,
    #[serde(default, alias = "tuition_range", rename = "tuitionRange")]
    pub tuition_range: Option<String>,
    #[serde(default, alias = "cost_of_living_range", rename = "costOfLivingRange")]
    pub cost_of_living_range: Option<String>,
}

impl From<&FindMatchesRequest> for StudentPreferences {
    fn from(req: &FindMatchesRequest) -> Self {
        Self {
            specialties: preference_set(&req.specialties),
            ownerships: preference_set(&req.ownerships),
            states: preference_set(&req.states),
            regions: preference_set(&req.regions),
            academic_importance: req.academic_importance,
            hostel_importance: req.hostel_importance,
            sports_importance: req.sports_importance,
            social_life_importance: req.social_life_importance,
            tuition_range: req.tuition_range.clone(),
            cost_of_living_range: req.cost_of_living_range.clone(),
        }
    }
}
