// Integration tests for HackConnect: full session flows and the HTTP surface

use std::time::Duration;

use actix_web::{http::header, http::StatusCode, test, web, App};
use chrono::Utc;
use hackconnect::config::Settings;
use hackconnect::core::{HackSession, SeedData, SessionOptions, SwipeResult};
use hackconnect::models::SwipeDirection;
use hackconnect::routes::{self, AppState};
use serde_json::{json, Value};

fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.discover.transition_ms = 0;
    settings.verification.delay_ms = 0;
    settings.simulation.seed = Some(99);
    settings
}

fn profile_json() -> Value {
    json!({
        "name": "Ada Lovelace",
        "skill1": "Rust",
        "skill2": "AI/ML",
        "lookingFor": "Frontend Developer"
    })
}

#[tokio::test]
async fn test_integration_right_then_lefts_exhausts_deck() {
    let catalog = SeedData::hackathon_demo(Utc::now()).catalog;
    let options = SessionOptions {
        transition: Duration::ZERO,
        ..Default::default()
    };
    let session = HackSession::with_defaults(SeedData::from_catalog(catalog), options);

    session.swipe(SwipeDirection::Right).await.unwrap();
    for _ in 0..7 {
        session.swipe(SwipeDirection::Left).await.unwrap();
    }

    let matches = session.list_matches().await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].candidate.id, "1");
    assert_eq!(session.cursor().await, 8);
    assert!(session.current_candidate().await.is_none());

    let outcome = session.swipe(SwipeDirection::Right).await.unwrap();
    assert_eq!(outcome.result, SwipeResult::NoMoreProfiles);
}

#[tokio::test(start_paused = true)]
async fn test_integration_match_then_chat() {
    let options = SessionOptions {
        transition: Duration::from_millis(300),
        rng_seed: Some(5),
        ..Default::default()
    };
    let session = HackSession::with_defaults(SeedData::hackathon_demo(Utc::now()), options);

    session.swipe(SwipeDirection::Left).await.unwrap();
    session.swipe(SwipeDirection::Left).await.unwrap();
    let outcome = session.swipe(SwipeDirection::Right).await.unwrap();
    assert!(matches!(outcome.result, SwipeResult::Matched { .. }));

    let matches = session.list_matches().await.unwrap();
    let newest = matches.last().unwrap();
    assert_eq!(newest.candidate.name, "Taylor Kim");

    assert!(session.open_chat(&newest.candidate.id).await.unwrap().is_empty());
    session.send_message(&newest.candidate.id, "Want to team up?").await.unwrap();

    tokio::time::sleep(Duration::from_secs(4)).await;
    let log = session.open_chat(&newest.candidate.id).await.unwrap();
    assert_eq!(log.len(), 2);
    assert!(!log[1].sender.is_local());
}

#[actix_web::test]
async fn test_http_discover_requires_profile() {
    let state = AppState::from_settings(&test_settings());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/discover").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        routes::SETUP_PROFILE_PATH
    );
}

#[actix_web::test]
async fn test_http_profile_swipe_and_matches() {
    let state = AppState::from_settings(&test_settings());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    // Too short a name is rejected with a field message
    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .set_json(json!({ "name": "A", "skill1": "Rust", "lookingFor": "Mentor" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("at least 2 characters"));

    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .set_json(profile_json())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/discover").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["candidate"]["id"], "1");
    assert_eq!(body["remaining"], 8);

    // Candidate 1 is already a match in the demo history
    let req = test::TestRequest::post()
        .uri("/api/v1/discover/swipe")
        .set_json(json!({ "direction": "right" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["result"]["kind"], "already_matched");
    assert_eq!(body["cursor"], 1);

    let req = test::TestRequest::post()
        .uri("/api/v1/discover/swipe")
        .set_json(json!({ "direction": "right" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["result"]["kind"], "matched");
    assert_eq!(body["result"]["candidate"]["id"], "2");
    assert_eq!(body["notices"][0]["title"], "Connection Request Sent!");

    let req = test::TestRequest::get().uri("/api/v1/matches").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["matches"][2]["candidate"]["id"], "2");

    let req = test::TestRequest::delete().uri("/api/v1/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn test_http_missing_profile_redirect_lands_on_setup() {
    let state = AppState::from_settings(&test_settings());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_ne!(location, "/api/v1/profile");

    // Following the redirect once reaches the form, not another redirect
    let req = test::TestRequest::get().uri(&location).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::LOCATION).is_none());

    let req = test::TestRequest::put()
        .uri(&location)
        .set_json(profile_json())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Ada Lovelace");
}

#[actix_web::test]
async fn test_http_event_verification() {
    let state = AppState::from_settings(&test_settings());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let hack_profile = json!({
        "skill1": "Rust",
        "lookingFor": "Mentor",
        "preferredRole": "Developer"
    });

    // Locked until attendance is confirmed
    let req = test::TestRequest::put()
        .uri("/api/v1/hack-profile")
        .set_json(hack_profile.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/request")
        .set_json(json!({ "eventCode": "HACK24", "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/request")
        .set_json(json!({ "eventCode": "HACK24", "email": "ada@example.com" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["token"].as_str().unwrap().to_string();
    let code = body["devCode"].as_str().unwrap().to_string();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/confirm")
        .set_json(json!({ "token": token, "code": wrong }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // A wrong code unlocks nothing
    let req = test::TestRequest::put()
        .uri("/api/v1/hack-profile")
        .set_json(hack_profile.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/verification/confirm")
        .set_json(json!({ "token": token, "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["eventCode"], "HACK24");
    assert_eq!(body["notice"]["title"], "RSVP confirmed");

    let req = test::TestRequest::put()
        .uri("/api/v1/hack-profile")
        .set_json(json!({
            "skill1": "Rust",
            "lookingFor": "Mentor",
            "preferredRole": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/v1/hack-profile")
        .set_json(hack_profile)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["notice"]["title"], "Hack profile created!");
}

#[actix_web::test]
async fn test_http_chat_flow() {
    let state = AppState::from_settings(&test_settings());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/chats/4").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["candidate"]["name"], "Jordan Smith");
    assert_eq!(body["messages"].as_array().unwrap().len(), 3);

    let req = test::TestRequest::get().uri("/api/v1/chats/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["messages"].as_array().unwrap().is_empty());
    assert_eq!(body["phase"], "idle");

    let req = test::TestRequest::post()
        .uri("/api/v1/chats/2/messages")
        .set_json(json!({ "text": "   " }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["sent"].is_null());

    let req = test::TestRequest::post()
        .uri("/api/v1/chats/2/messages")
        .set_json(json!({ "text": "Hello" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["sent"]["text"], "Hello");
    assert_eq!(body["sent"]["senderId"], "currentUser");

    let req = test::TestRequest::delete().uri("/api/v1/chats/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["cancelled"], true);

    let req = test::TestRequest::get().uri("/api/v1/chats/nobody").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
