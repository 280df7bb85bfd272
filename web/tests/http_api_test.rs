//! HTTP API integration tests.
//!
//! Drives the full router (middleware included) with `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Integration tests can use unwrap/expect for setup

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use eventdesk_core::ticket_code;
use eventdesk_web::{
    AppState, CORRELATION_ID_HEADER, build_router, config::Config, error::ErrorResponse,
    handlers::tickets::{IssueCodeResponse, ValidationResponse},
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> (Router, AppState) {
    let state = AppState::from_config(&Config::default());
    (build_router(state.clone()), state)
}

async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}

#[tokio::test]
async fn test_issue_code() {
    let (app, state) = app();

    let response = app
        .oneshot(post_json("/api/tickets/codes", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: IssueCodeResponse = json_body(response).await;
    assert!(ticket_code::is_valid(body.code.as_str()));
    assert_eq!(body.mailed_to, None);
    assert!(state.issuer.is_issued(&body.code).await.unwrap());
}

#[tokio::test]
async fn test_issue_code_with_confirmation_mail() {
    let (app, _) = app();

    let response = app
        .oneshot(post_json(
            "/api/tickets/codes",
            r#"{"email": "holder@example.com", "event_name": "Launch Night"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: IssueCodeResponse = json_body(response).await;
    assert_eq!(body.mailed_to.as_deref(), Some("holder@example.com"));
}

#[tokio::test]
async fn test_issue_code_rejects_bad_email() {
    let (app, state) = app();

    let response = app
        .oneshot(post_json("/api/tickets/codes", r#"{"email": "holder"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = json_body(response).await;
    assert_eq!(body.code, "VALIDATION_ERROR");
    assert!(state.issuer.registry().is_empty().await);
}

#[tokio::test]
async fn test_issued_code_is_registered() {
    let (app, _) = app();

    let issued: IssueCodeResponse = json_body(
        app.clone()
            .oneshot(post_json("/api/tickets/codes", "{}"))
            .await
            .unwrap(),
    )
    .await;

    let response = app
        .oneshot(get(&format!("/api/tickets/codes/{}", issued.code)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ValidationResponse = json_body(response).await;
    assert!(body.valid);
    assert!(body.registered);
    assert_eq!(body.code, issued.code.as_str());
}

#[tokio::test]
async fn test_lookup_of_unknown_well_formed_code() {
    let (app, _) = app();

    let response = app
        .oneshot(get("/api/tickets/codes/TKT-ABC123"))
        .await
        .unwrap();

    let body: ValidationResponse = json_body(response).await;
    assert!(body.valid);
    assert!(!body.registered);
    assert_eq!(body.reason, None);
}

#[tokio::test]
async fn test_lookup_of_malformed_code_is_not_an_error() {
    let (app, _) = app();

    let response = app
        .oneshot(get("/api/tickets/codes/TKT-ABC12"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ValidationResponse = json_body(response).await;
    assert!(!body.valid);
    assert_eq!(
        body.reason.as_deref(),
        Some("Ticket code must be 10 characters long, got 9")
    );
}

#[tokio::test]
async fn test_validate_endpoint_cases() {
    let cases = [
        ("", false),
        ("TKT-ABC12", false),
        ("TKT-ABC123X", false),
        ("tkt-ABC123", false),
        ("TKT-AB*123", false),
        (" TKT-ABC123", false),
        ("TKT-ABC123", true),
    ];

    for (candidate, expected) in cases {
        let (app, _) = app();
        let body = serde_json::json!({ "code": candidate }).to_string();

        let response = app
            .oneshot(post_json("/api/tickets/validate", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "candidate {candidate:?}");
        let result: ValidationResponse = json_body(response).await;
        assert_eq!(result.valid, expected, "candidate {candidate:?}");
        assert_eq!(result.code, candidate);
        assert_eq!(result.reason.is_none(), expected);
    }
}

async fn assert_json_error(response: Response, status: StatusCode, code: &str) -> ErrorResponse {
    assert_eq!(response.status(), status);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json",
        "error bodies are JSON"
    );
    let body: ErrorResponse = json_body(response).await;
    assert_eq!(body.code, code);
    body
}

#[tokio::test]
async fn test_validate_without_content_type_is_json_error() {
    let (app, _) = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tickets/validate")
                .body(Body::from("TKT-ABC123"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_json_error(
        response,
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        "UNSUPPORTED_MEDIA_TYPE",
    )
    .await;
}

#[tokio::test]
async fn test_validate_with_malformed_json_is_json_error() {
    let (app, _) = app();

    let response = app
        .oneshot(post_json("/api/tickets/validate", "{not json"))
        .await
        .unwrap();

    assert_json_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[tokio::test]
async fn test_validate_with_missing_field_is_json_error() {
    let (app, _) = app();

    let response = app
        .oneshot(post_json("/api/tickets/validate", "{}"))
        .await
        .unwrap();

    let body =
        assert_json_error(response, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR").await;
    assert!(body.message.contains("missing field `code`"), "{}", body.message);
}

#[tokio::test]
async fn test_issue_with_malformed_json_is_json_error() {
    let (app, state) = app();

    let response = app
        .oneshot(post_json("/api/tickets/codes", r#"{"email": 42}"#))
        .await
        .unwrap();

    assert_json_error(response, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR").await;
    assert!(state.issuer.registry().is_empty().await);
}

#[tokio::test]
async fn test_issue_with_blank_event_name_succeeds() {
    let (app, _) = app();

    let response = app
        .oneshot(post_json(
            "/api/tickets/codes",
            r#"{"email": "holder@example.com", "event_name": "  "}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_correlation_id_round_trips() {
    let (app, _) = app();
    let correlation_id = Uuid::new_v4();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/tickets/codes/TKT-ABC123")
                .header(CORRELATION_ID_HEADER, correlation_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[CORRELATION_ID_HEADER],
        correlation_id.to_string().as_str()
    );
}
