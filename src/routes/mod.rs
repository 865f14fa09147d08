// Route exports
pub mod account;
pub mod chat;
pub mod discover;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::header, http::StatusCode, web, HttpResponse};

use crate::config::Settings;
use crate::core::{HackSession, SeedData, SystemClock, TracingNotifier};
use crate::models::{ErrorResponse, Profile};
use crate::services::{EventVerifier, ProfileStore, SessionProfileStore, SessionStore, SimulatedVerifier};

/// Where clients are sent when no profile exists yet
pub const SETUP_PROFILE_PATH: &str = "/api/v1/profile/setup";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<HackSession>,
    pub profiles: Arc<dyn ProfileStore>,
    pub verifier: Arc<dyn EventVerifier>,
    pub verification_delay: Duration,
}

impl AppState {
    /// Demo session wired from configuration
    pub fn from_settings(settings: &Settings) -> Self {
        let storage = Arc::new(SessionStore::new(
            settings.session.capacity,
            settings.session.ttl_secs,
        ));

        let session = HackSession::new(
            SeedData::hackathon_demo(chrono::Utc::now()),
            settings.session_options(),
            Arc::new(SystemClock),
            Arc::new(TracingNotifier),
        );

        let verifier = SimulatedVerifier::new(
            storage.clone(),
            Duration::from_secs(settings.verification.code_ttl_secs),
            settings.simulation.seed,
            settings.verification.reveal_codes,
        );

        Self {
            session: Arc::new(session),
            profiles: Arc::new(SessionProfileStore::new(storage)),
            verifier: Arc::new(verifier),
            verification_delay: settings.verification_delay(),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(account::configure)
            .configure(discover::configure)
            .configure(chat::configure),
    );
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

/// Missing profile is recovered by sending the client to profile setup
pub(crate) fn profile_required() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SETUP_PROFILE_PATH))
        .json(ErrorResponse {
            error: "profile_required".to_string(),
            message: "Set up your profile first.".to_string(),
            status_code: StatusCode::SEE_OTHER.as_u16(),
        })
}

/// The stored profile, or the response to send instead
pub(crate) fn require_profile(state: &AppState) -> Result<Profile, HttpResponse> {
    match state.profiles.get_profile() {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(profile_required()),
        Err(e) => {
            tracing::error!("Failed to read profile: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, "profile_unavailable", e))
        }
    }
}
