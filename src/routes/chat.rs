use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::core::ChatError;
use crate::models::{ChatResponse, SendMessageRequest, SendMessageResponse};
use crate::routes::{error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/chats/{id}", web::get().to(open_chat))
        .route("/chats/{id}", web::delete().to(close_chat))
        .route("/chats/{id}/messages", web::post().to(send_message));
}

/// GET /api/v1/chats/{id}
async fn open_chat(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.session.chat_snapshot(&path).await {
        Ok(snapshot) => HttpResponse::Ok().json(ChatResponse {
            candidate: snapshot.candidate,
            messages: snapshot.messages,
            phase: snapshot.phase,
        }),
        Err(e) => chat_error(e),
    }
}

/// Leaving the chat view: pending replies are cancelled
///
/// DELETE /api/v1/chats/{id}
async fn close_chat(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.session.close_chat(&path).await {
        Ok(cancelled) => HttpResponse::Ok().json(serde_json::json!({
            "candidateId": path.as_str(),
            "cancelled": cancelled,
        })),
        Err(e) => chat_error(e),
    }
}

/// POST /api/v1/chats/{id}/messages
///
/// Request body:
/// ```json
/// { "text": "string" }
/// ```
///
/// Blank text is accepted and ignored (`sent` is null).
async fn send_message(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SendMessageRequest>,
) -> impl Responder {
    let sent = match state.session.send_message(&path, &req.text).await {
        Ok(sent) => sent,
        Err(e) => return chat_error(e),
    };

    match state.session.chat_phase(&path).await {
        Ok(phase) => HttpResponse::Ok().json(SendMessageResponse { sent, phase }),
        Err(e) => chat_error(e),
    }
}

fn chat_error(e: ChatError) -> HttpResponse {
    match e {
        ChatError::UnknownCandidate(_) => error_response(StatusCode::NOT_FOUND, "Chat not found", e),
    }
}
