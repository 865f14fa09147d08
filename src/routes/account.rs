use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    ConfirmCodeRequest, ConfirmCodeResponse, HackProfile, HealthResponse, Notice, NoticeKind,
    PageResponse, Profile, RequestCodeRequest, RequestCodeResponse, SavedResponse,
};
use crate::routes::{error_response, require_profile, AppState};
use crate::services::{ProfileError, VerificationError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/", web::get().to(landing))
        .route("/about", web::get().to(about))
        .route("/profile", web::get().to(get_profile))
        .route("/profile", web::put().to(set_profile))
        .route("/profile", web::delete().to(logout))
        .route("/profile/setup", web::get().to(setup_form))
        .route("/profile/setup", web::put().to(set_profile))
        .route("/hack-profile", web::put().to(set_hack_profile))
        .route("/verification/request", web::post().to(request_code))
        .route("/verification/confirm", web::post().to(confirm_code));
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

async fn landing() -> impl Responder {
    HttpResponse::Ok().json(PageResponse {
        title: "HackConnect".to_string(),
        body: "Find your hackathon team before the event starts.".to_string(),
        links: vec![
            "/api/v1/profile".to_string(),
            "/api/v1/verification/request".to_string(),
            "/api/v1/about".to_string(),
        ],
    })
}

async fn about() -> impl Responder {
    HttpResponse::Ok().json(PageResponse {
        title: "About HackConnect".to_string(),
        body: "HackConnect lets verified attendees swipe through each other's skills, \
               match with people who are actually coming to the event and are relevant \
               to them, and start chatting."
            .to_string(),
        links: vec!["/api/v1/discover".to_string(), "/api/v1/matches".to_string()],
    })
}

/// Account view
///
/// GET /api/v1/profile
async fn get_profile(state: web::Data<AppState>) -> impl Responder {
    match require_profile(&state) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(response) => response,
    }
}

/// Setup form, the target of every missing-profile redirect
///
/// GET /api/v1/profile/setup
async fn setup_form() -> impl Responder {
    HttpResponse::Ok().json(PageResponse {
        title: "Create your profile".to_string(),
        body: "Tell other attendees your name, up to three skills and what you're looking for. \
               Submit the form with PUT to this address."
            .to_string(),
        links: vec!["/api/v1/profile/setup".to_string(), "/api/v1/about".to_string()],
    })
}

/// Profile setup
///
/// PUT /api/v1/profile/setup (also PUT /api/v1/profile)
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "skill1": "string",
///   "skill2": "string",
///   "skill3": "string",
///   "lookingFor": "string"
/// }
/// ```
async fn set_profile(state: web::Data<AppState>, req: web::Json<Profile>) -> impl Responder {
    match state.profiles.set_profile(req.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(SavedResponse {
            notice: Notice::new(
                NoticeKind::Success,
                "Profile created!",
                "Your profile has been set up successfully.",
            ),
            next: "/api/v1/discover".to_string(),
        }),
        Err(e) => profile_error(e),
    }
}

/// PUT /api/v1/hack-profile
///
/// Unlocked by a confirmed event verification in this session.
async fn set_hack_profile(state: web::Data<AppState>, req: web::Json<HackProfile>) -> impl Responder {
    match state.profiles.set_hack_profile(req.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(SavedResponse {
            notice: Notice::new(
                NoticeKind::Success,
                "Hack profile created!",
                "Your hackathon profile has been set up successfully.",
            ),
            next: "/api/v1/discover".to_string(),
        }),
        Err(e) => profile_error(e),
    }
}

/// DELETE /api/v1/profile
async fn logout(state: web::Data<AppState>) -> impl Responder {
    match state.profiles.clear() {
        Ok(()) => HttpResponse::Ok().json(SavedResponse {
            notice: Notice::new(NoticeKind::Info, "Logged out", "You have been logged out successfully."),
            next: "/api/v1/".to_string(),
        }),
        Err(e) => profile_error(e),
    }
}

/// Event verification, step one
///
/// POST /api/v1/verification/request
///
/// Request body:
/// ```json
/// { "eventCode": "string", "email": "string" }
/// ```
async fn request_code(state: web::Data<AppState>, req: web::Json<RequestCodeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    tokio::time::sleep(state.verification_delay).await;

    match state.verifier.request_code(&req.event_code, &req.email) {
        Ok(pending) => HttpResponse::Ok().json(RequestCodeResponse {
            token: pending.token,
            notice: Notice::new(
                NoticeKind::Success,
                "Verification initiated",
                "We've sent a one-time password to your registered email.",
            ),
            dev_code: pending.dev_code,
        }),
        Err(e) => verification_error(e),
    }
}

/// Event verification, step two
///
/// POST /api/v1/verification/confirm
///
/// Request body:
/// ```json
/// { "token": "uuid", "code": "123456" }
/// ```
async fn confirm_code(state: web::Data<AppState>, req: web::Json<ConfirmCodeRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    tokio::time::sleep(state.verification_delay).await;

    let attendance = match state.verifier.confirm_code(&req.token, &req.code) {
        Ok(attendance) => attendance,
        Err(e) => return verification_error(e),
    };

    match state.profiles.mark_verified(&attendance) {
        Ok(()) => HttpResponse::Ok().json(ConfirmCodeResponse {
            email: attendance.email,
            event_code: attendance.event_code,
            notice: Notice::new(
                NoticeKind::Success,
                "RSVP confirmed",
                "You can now set up your hackathon profile.",
            ),
        }),
        Err(e) => profile_error(e),
    }
}

fn profile_error(e: ProfileError) -> HttpResponse {
    match e {
        ProfileError::Validation(errors) => {
            error_response(StatusCode::BAD_REQUEST, "Validation failed", errors)
        }
        ProfileError::NotVerified => error_response(
            StatusCode::FORBIDDEN,
            "verification_required",
            "Verify your event attendance at /api/v1/verification/request first.",
        ),
        ProfileError::Storage(e) => {
            tracing::error!("Failed to store profile: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store profile", e)
        }
    }
}

fn verification_error(e: VerificationError) -> HttpResponse {
    let status = match &e {
        VerificationError::Validation(_) | VerificationError::MalformedCode => StatusCode::BAD_REQUEST,
        VerificationError::CodeMismatch => StatusCode::UNAUTHORIZED,
        VerificationError::UnknownToken => StatusCode::NOT_FOUND,
    };
    tracing::info!("Verification rejected: {}", e);
    error_response(status, "Verification failed", e)
}
