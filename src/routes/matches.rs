use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse, StudentPreferences,
};
use crate::services::PostgresClient;
use crate::core::Matcher;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "specialties": ["Conventional"],
///   "ownerships": ["Federal", "State"],
///   "states": ["Lagos"],
///   "regions": ["South West"],
///   "academicImportance": 5,
///   "hostelImportance": 3,
///   "sportsImportance": 1,
///   "socialLifeImportance": 2,
///   "tuitionRange": "100,000 - 300,000 naira",
///   "costOfLivingRange": "Less than 80,000 naira"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let preferences = StudentPreferences::from(&req.into_inner());

    tracing::info!(
        "Finding matches for {} specialties, {} ownerships, {} states, {} regions",
        preferences.specialties.len(),
        preferences.ownerships.len(),
        preferences.states.len(),
        preferences.regions.len()
    );

    // The catalog snapshot is fetched once per request; matching itself is synchronous
    let candidates = match state.postgres.fetch_universities().await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to fetch universities: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch universities".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result = state.matcher.find_matches(&preferences, &candidates);

    let response = FindMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
        used_fallback: result.used_fallback,
    };

    tracing::info!(
        "Returning {} matches (from {} universities, fallback: {})",
        response.matches.len(),
        response.total_candidates,
        response.used_fallback
    );

    HttpResponse::Ok().json(response)
}
