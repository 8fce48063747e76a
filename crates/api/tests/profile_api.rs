//! Integration tests for the studio profile and admin dashboard.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_auth, put_json_auth, seed_content};
use serde_json::{json, Value};
use studio_store::ContentStore;

#[tokio::test]
async fn get_returns_stored_profile() {
    let app = build_test_app(seed_content()).await;
    let token = app.token().await;

    let response = get_auth(app.app(), "/api/v1/admin/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["studioName"], "Lens Studio");
    assert_eq!(json["data"]["phone"], "0700000001");
}

#[tokio::test]
async fn get_without_profile_returns_defaults() {
    let app = build_test_app(Value::Null).await;
    let token = app.token().await;

    let response = get_auth(app.app(), "/api/v1/admin/profile", &token).await;
    let json = body_json(response).await;

    assert_eq!(json["data"]["studioName"], "Dev Studio");
}

#[tokio::test]
async fn save_overwrites_whole_record() {
    let app = build_test_app(seed_content()).await;
    let token = app.token().await;

    let body = json!({
        "username": "new-owner",
        "email": "team@studio.test",
        "studioName": "Northlight"
    });
    let response = put_json_auth(app.app(), "/api/v1/admin/profile", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = app.store.get("admin/profile").await.unwrap();
    assert_eq!(stored["studioName"], "Northlight");
    assert_eq!(stored["email"], "team@studio.test");
    // Fields not sent are cleared, not merged.
    assert_eq!(stored["address"], "");
    assert_eq!(stored["phone"], "");
}

#[tokio::test]
async fn save_rejects_malformed_email() {
    let app = build_test_app(seed_content()).await;
    let token = app.token().await;

    let body = json!({ "email": "not-an-email", "studioName": "X" });
    let response = put_json_auth(app.app(), "/api/v1/admin/profile", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let stored = app.store.get("admin/profile").await.unwrap();
    assert_eq!(stored["studioName"], "Lens Studio");
}

#[tokio::test]
async fn dashboard_counts_collections() {
    let app = build_test_app(seed_content()).await;
    let token = app.token().await;

    let response = get_auth(app.app(), "/api/v1/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["gallery_count"], 2);
    assert_eq!(json["data"]["project_count"], 1);
    assert_eq!(json["data"]["service_count"], 2);
    assert_eq!(json["data"]["profile"]["studioName"], "Lens Studio");
}
