use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::models::{DiscoverResponse, MatchesResponse, SwipeRequest};
use crate::routes::{error_response, require_profile, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/discover", web::get().to(discover))
        .route("/discover/swipe", web::post().to(swipe))
        .route("/matches", web::get().to(list_matches));
}

/// Deck head, or the empty state once every candidate has been seen
///
/// GET /api/v1/discover
async fn discover(state: web::Data<AppState>) -> impl Responder {
    if let Err(response) = require_profile(&state) {
        return response;
    }

    let candidate = state.session.current_candidate().await;
    let remaining = state.session.remaining().await;

    HttpResponse::Ok().json(DiscoverResponse {
        exhausted: candidate.is_none(),
        candidate,
        remaining,
    })
}

/// POST /api/v1/discover/swipe
///
/// Request body:
/// ```json
/// { "direction": "left|right" }
/// ```
async fn swipe(state: web::Data<AppState>, req: web::Json<SwipeRequest>) -> impl Responder {
    if let Err(response) = require_profile(&state) {
        return response;
    }

    match state.session.swipe(req.direction).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            tracing::error!("Swipe failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to record match", e)
        }
    }
}

/// Matches in the order they were made
///
/// GET /api/v1/matches
async fn list_matches(state: web::Data<AppState>) -> impl Responder {
    match state.session.list_matches().await {
        Ok(matches) => HttpResponse::Ok().json(MatchesResponse {
            total: matches.len(),
            matches,
        }),
        Err(e) => {
            tracing::error!("Match registry out of sync with catalog: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list matches", e)
        }
    }
}
