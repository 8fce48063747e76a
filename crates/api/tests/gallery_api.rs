//! Integration tests for gallery administration.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get_auth, post_multipart_auth, seed_content,
    MultipartForm,
};
use serde_json::{json, Value};
use studio_store::ContentStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn photo_form(title: &str) -> MultipartForm {
    MultipartForm::new()
        .text("title", title)
        .text("category", "portrait")
        .text("type", "image")
        .file("file", "headshot.jpg", "image/jpeg", b"jpeg-bytes")
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = build_test_app(seed_content()).await;
    let token = app.token().await;

    let response = get_auth(app.app(), "/api/v1/admin/gallery", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["-G002", "-G001"]);
}

#[tokio::test]
async fn upload_writes_record_under_endpoint_id() {
    let app = build_test_app(seed_content()).await;
    app.accept_uploads("upload-7", "https://cdn.test/u7.jpg").await;
    let token = app.token().await;
    let before = gallery_len(&app, &token).await;

    let response =
        post_multipart_auth(app.app(), "/api/v1/admin/gallery", &token, photo_form("Headshot")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(gallery_len(&app, &token).await, before + 1);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], "upload-7");
    assert_eq!(json["data"]["url"], "https://cdn.test/u7.jpg");
    assert_eq!(json["data"]["category"], "portrait");
    assert_eq!(json["data"]["type"], "image");

    let stored = app.store.get("admin/gallery/upload-7").await.unwrap();
    assert_eq!(
        stored,
        json!({
            "title": "Headshot",
            "category": "portrait",
            "url": "https://cdn.test/u7.jpg",
            "type": "image"
        })
    );
}

async fn gallery_len(app: &common::TestApp, token: &str) -> usize {
    let response = get_auth(app.app(), "/api/v1/admin/gallery", token).await;
    body_json(response).await["data"].as_array().map_or(0, Vec::len)
}

#[tokio::test]
async fn endpoint_ids_that_are_not_record_keys_fail_without_writing() {
    for id in ["gallery/abc123", "1700000_photo.jpg"] {
        let app = build_test_app(seed_content()).await;
        app.accept_uploads(id, "https://cdn.test/shot.jpg").await;
        let token = app.token().await;

        let response =
            post_multipart_auth(app.app(), "/api/v1/admin/gallery", &token, photo_form("Shot")).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY, "id {id:?}");
        assert_eq!(body_json(response).await["code"], "UPLOAD_FAILED");

        let response = get_auth(app.app(), "/api/v1/admin/gallery", &token).await;
        let json = body_json(response).await;
        let ids: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|item| item["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["-G002", "-G001"], "id {id:?}");
    }
}

#[tokio::test]
async fn missing_title_is_rejected_before_upload() {
    let app = build_test_app(seed_content()).await;
    app.accept_uploads("never", "https://cdn.test/never.jpg").await;
    let token = app.token().await;

    let response =
        post_multipart_auth(app.app(), "/api/v1/admin/gallery", &token, photo_form("   ")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Please select a file and enter a title.");

    let requests = app.upload_server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "nothing may reach the upload endpoint");
}

#[tokio::test]
async fn missing_file_is_rejected() {
    let app = build_test_app(seed_content()).await;
    let token = app.token().await;

    let form = MultipartForm::new().text("title", "No file").text("category", "event");
    let response = post_multipart_auth(app.app(), "/api/v1/admin/gallery", &token, form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = build_test_app(seed_content()).await;
    let token = app.token().await;

    let form = MultipartForm::new()
        .text("title", "Hills")
        .text("category", "landscape")
        .file("file", "hills.jpg", "image/jpeg", b"jpeg-bytes");
    let response = post_multipart_auth(app.app(), "/api/v1/admin/gallery", &token, form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn endpoint_rejection_surfaces_its_message_and_writes_nothing() {
    let app = build_test_app(seed_content()).await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Disk full" })))
        .mount(&app.upload_server)
        .await;
    let token = app.token().await;

    let response =
        post_multipart_auth(app.app(), "/api/v1/admin/gallery", &token, photo_form("Headshot")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Disk full");
    assert_eq!(json["code"], "UPLOAD_FAILED");

    let gallery = app.store.get("admin/gallery").await.unwrap();
    assert_eq!(gallery.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_removes_record() {
    let app = build_test_app(seed_content()).await;
    let token = app.token().await;

    let response = delete_auth(app.app(), "/api/v1/admin/gallery/-G001", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let stored = app.store.get("admin/gallery/-G001").await.unwrap();
    assert_eq!(stored, Value::Null);
}

#[tokio::test]
async fn delete_missing_item_is_404() {
    let app = build_test_app(seed_content()).await;
    let token = app.token().await;

    let response = delete_auth(app.app(), "/api/v1/admin/gallery/-missing", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
