//! Integration tests for the public site endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, seed_content};
use serde_json::{json, Value};

#[tokio::test]
async fn page_reflects_stored_content() {
    let app = build_test_app(seed_content()).await;

    let response = get(app.app(), "/api/v1/site").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await["data"].clone();

    assert_eq!(page["studio"]["name"], "Lens Studio");
    assert_eq!(page["studio"]["description"], "We shoot stories.");
    assert_eq!(page["contact"]["call"], "tel:0700000001");
    assert_eq!(page["contact"]["email"], "mailto:hello@studio.test");

    let services = page["services"]["items"].as_array().unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0]["id"], "-S001");
    assert_eq!(page["services"]["active"], 0);

    assert_eq!(page["portfolio"].as_array().unwrap().len(), 1);
    assert_eq!(page["portfolio"][0]["client"], "Acme");

    assert_eq!(page["gallery"]["sample"], false);
    let gallery: Vec<&str> = page["gallery"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(gallery, ["-G002", "-G001"], "gallery is newest first");
}

#[tokio::test]
async fn empty_store_falls_back_to_defaults_and_sample_gallery() {
    let app = build_test_app(Value::Null).await;

    let response = get(app.app(), "/api/v1/site").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await["data"].clone();

    assert_eq!(page["studio"]["name"], "Dev Studio");
    assert_eq!(page["gallery"]["sample"], true);
    assert!(!page["gallery"]["items"].as_array().unwrap().is_empty());
    assert!(page["services"]["items"].as_array().unwrap().is_empty());
    assert_eq!(page["services"]["active"], Value::Null);
}

#[tokio::test]
async fn section_selection_marks_navigation() {
    let app = build_test_app(seed_content()).await;

    let response = get(app.app(), "/api/v1/site?section=gallery").await;
    let page = body_json(response).await["data"].clone();

    let active: Vec<&str> = page["navigation"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["active"] == json!(true))
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(active, ["gallery"]);
}

#[tokio::test]
async fn out_of_range_service_falls_back_to_first_tab() {
    let app = build_test_app(seed_content()).await;

    let response = get(app.app(), "/api/v1/site?service=9").await;
    let page = body_json(response).await["data"].clone();

    assert_eq!(page["services"]["active"], 0);
}

#[tokio::test]
async fn email_booking_toggle_changes_links() {
    let app = build_test_app(seed_content()).await;

    let response = get(app.app(), "/api/v1/site?booking=email").await;
    let page = body_json(response).await["data"].clone();

    assert_eq!(page["contact"]["booking_method"], "email");
    let link = page["services"]["items"][0]["booking_link"].as_str().unwrap();
    assert!(link.starts_with("mailto:hello@studio.test?subject="), "{link}");
    assert!(link.contains("Wedding%20Photography"), "{link}");
}

#[tokio::test]
async fn gallery_filter_returns_exact_category() {
    let app = build_test_app(seed_content()).await;

    let response = get(app.app(), "/api/v1/site/gallery?category=wedding").await;
    assert_eq!(response.status(), StatusCode::OK);
    let section = body_json(response).await["data"].clone();

    assert_eq!(section["filter"], "wedding");
    let items = section["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "wedding");
    assert_eq!(section["categories"][0], "all");
}

#[tokio::test]
async fn gallery_filter_with_no_matches_is_empty() {
    let app = build_test_app(seed_content()).await;

    let response = get(app.app(), "/api/v1/site/gallery?category=video").await;
    let section = body_json(response).await["data"].clone();

    assert!(section["items"].as_array().unwrap().is_empty());
    assert_eq!(section["sample"], false);
}

#[tokio::test]
async fn unknown_gallery_category_is_400() {
    let app = build_test_app(seed_content()).await;

    let response = get(app.app(), "/api/v1/site/gallery?category=landscape").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn booking_link_defaults_to_whatsapp() {
    let app = build_test_app(seed_content()).await;

    let response = get(app.app(), "/api/v1/site/booking?service=Event%20Videography").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();

    assert_eq!(data["method"], "whatsapp");
    let link = data["link"].as_str().unwrap();
    assert!(link.starts_with("https://wa.me/0700000001?text="), "{link}");
    assert!(link.contains("Event%20Videography"), "{link}");
}

#[tokio::test]
async fn unknown_booking_method_is_400() {
    let app = build_test_app(seed_content()).await;

    let response = get(app.app(), "/api/v1/site/booking?service=x&method=sms").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
