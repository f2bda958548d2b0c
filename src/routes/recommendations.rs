use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::RecommendationSettings;
use crate::core::{RecommendError, Recommender};
use crate::models::{
    ErrorResponse, FilterCriteria, HealthResponse, PreviewRequest, RecommendRequest,
    RecommendResponse, SortKey, UserProfile,
};
use crate::services::{decode_profiles, ProfileStoreClient, ProfileStoreError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStoreClient>,
    pub recommender: Recommender,
    pub limits: RecommendationSettings,
}

impl AppState {
    /// Requested limit, defaulted and capped by configuration
    fn page_limit(&self, requested: Option<u16>) -> usize {
        requested
            .unwrap_or(self.limits.default_limit)
            .min(self.limits.max_limit) as usize
    }
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/recommendations/preview", web::post().to(preview));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Run the engine and render the page as JSON
fn render(
    state: &AppState,
    requester: &UserProfile,
    pool: &[UserProfile],
    criteria: &FilterCriteria,
    sort_by: SortKey,
    limit: usize,
) -> HttpResponse {
    match state
        .recommender
        .recommend_page(requester, pool, criteria, sort_by, limit)
    {
        Ok(page) => {
            tracing::info!(
                "Returning {} recommendations for user {} ({} matched of {} candidates)",
                page.matches.len(),
                requester.id,
                page.total_matches,
                page.total_candidates
            );

            HttpResponse::Ok().json(RecommendResponse {
                matches: page.matches,
                total_candidates: page.total_candidates,
                total_matches: page.total_matches,
            })
        }
        Err(RecommendError::InvalidCriteria(message)) => {
            tracing::info!("Rejected criteria for user {}: {}", requester.id, message);
            error_response(
                actix_web::http::StatusCode::BAD_REQUEST,
                "Invalid criteria",
                message,
            )
        }
    }
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "criteria": { "subjects": [], "learningStyles": [], "minRating": 0,
///                 "minMatchScore": 0, "availabilityDays": [], "query": null },
///   "sortBy": "match|rating|sessions|name",
///   "limit": 20
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    // Reject bad criteria before touching the store
    if let Err(RecommendError::InvalidCriteria(message)) =
        crate::core::validate_criteria(&req.criteria)
    {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Invalid criteria",
            message,
        );
    }

    let user_id = &req.user_id;
    let limit = state.page_limit(req.limit);

    tracing::info!("Finding study buddies for user: {}, limit: {}", user_id, limit);

    let requester = match state.store.get_profile(user_id).await {
        Ok(profile) => profile,
        Err(ProfileStoreError::NotFound(message)) => {
            return error_response(
                actix_web::http::StatusCode::NOT_FOUND,
                "Profile not found",
                message,
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return error_response(
                actix_web::http::StatusCode::BAD_GATEWAY,
                "Failed to fetch user profile",
                e.to_string(),
            );
        }
    };

    let pool = match state.store.list_candidates(user_id).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to list candidates for {}: {}", user_id, e);
            return error_response(
                actix_web::http::StatusCode::BAD_GATEWAY,
                "Failed to list candidates",
                e.to_string(),
            );
        }
    };

    render(&state, &requester, &pool, &req.criteria, req.sort_by, limit)
}

/// Preview endpoint - rank an inline pool
///
/// POST /api/v1/recommendations/preview
async fn preview(
    state: web::Data<AppState>,
    req: web::Json<PreviewRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let mut pool = decode_profiles(&req.pool);
    pool.retain(|p| p.id != req.requester.id);
    let limit = state.page_limit(req.limit);

    render(&state, &req.requester, &pool, &req.criteria, req.sort_by, limit)
}
