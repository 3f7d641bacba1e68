//! HTTP-surface tests for the account-deletion JSON API and the waitlist
//! form flow, run against the real handlers with a stub backend behind.

mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use common::*;
use ments_site::handlers::{deletion_handlers, waitlist_handlers};

#[actix_rt::test]
async fn test_get_on_delete_api_is_method_not_allowed() {
    let (_state, backend) = spawn_stub().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(backend))
            .route(
                "/api/account/delete",
                web::post().to(deletion_handlers::api_submit),
            )
            .route(
                "/api/account/delete",
                web::to(deletion_handlers::api_method_not_allowed),
            ),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/account/delete").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Method not allowed");
}

#[actix_rt::test]
async fn test_delete_api_rejects_malformed_email() {
    let (state, backend) = spawn_stub().await;
    let app = test::init_service(App::new().app_data(web::Data::new(backend)).route(
        "/api/account/delete",
        web::post().to(deletion_handlers::api_submit),
    ))
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/account/delete")
            .set_json(json!({
                "username": "bob",
                "email": "not-an-email",
                "reason": "other",
                "feedback": "",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"]
        .as_str()
        .expect("details string")
        .contains("valid email"));
    assert_eq!(write_count(&state), 0);
}

#[actix_rt::test]
async fn test_delete_api_success_then_duplicate() {
    let (_state, backend) = spawn_stub().await;
    let app = test::init_service(App::new().app_data(web::Data::new(backend)).route(
        "/api/account/delete",
        web::post().to(deletion_handlers::api_submit),
    ))
    .await;

    let payload = json!({
        "username": "bob",
        "email": "bob@x.com",
        "reason": "other",
        "feedback": "",
    });

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/account/delete")
            .set_json(payload.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body.get("isDuplicate").is_none());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/account/delete")
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["isDuplicate"], true);
    assert!(body["message"]
        .as_str()
        .expect("message string")
        .contains("already being processed"));
}

#[actix_rt::test]
async fn test_waitlist_form_renders_confirmation() {
    let (_state, backend) = spawn_stub().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(backend))
            .route("/waitlist", web::post().to(waitlist_handlers::submit)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/waitlist")
            .set_form([("name", "Ada"), ("email", "ada@b.com")])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).expect("utf-8 body");
    assert!(html.contains("You're on the list!"));
}

#[actix_rt::test]
async fn test_waitlist_form_keeps_input_on_validation_error() {
    let (state, backend) = spawn_stub().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(backend))
            .route("/waitlist", web::post().to(waitlist_handlers::submit)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/waitlist")
            .set_form([("name", "Ada"), ("email", "not-an-email")])
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).expect("utf-8 body");
    assert!(html.contains("Please enter a valid email address"));
    // the form stays open with what the visitor typed
    assert!(html.contains("value=\"Ada\""));
    assert_eq!(write_count(&state), 0);
}
