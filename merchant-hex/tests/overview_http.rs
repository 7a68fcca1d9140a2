//! HTTP-level tests for the merchant routes.
//!
//! Drives the full router (auth, rate limiting, handlers) against an
//! in-memory SQLite repository.
//!
//! This test requires the `sqlite` feature flag.

#![cfg(feature = "sqlite")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use chrono::Utc;
use http_body_util::BodyExt;
use merchant_hex::{OverviewService, inbound::HttpServer};
use merchant_repo::SqliteRepo;
use merchant_types::{Merchant, PayGroup, RawConfig};
use tower::ServiceExt;

const API_KEY: &str = "mk_live_test";

/// Seeds one merchant on user 100 whose assigned group is gone, so the
/// default group applies.
async fn seeded_repo() -> SqliteRepo {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();

    repo.insert_pay_group(
        &PayGroup::new(
            1,
            "standard",
            RawConfig::Text(r#"{"2": {"rate": 6}, "1": {"rate": 5}}"#.into()),
        )
        .as_default(),
    )
    .await
    .unwrap();

    let mut merchant = Merchant::new(1, 100, API_KEY);
    merchant.pay_group_id = Some(2);
    merchant.fee_rates = RawConfig::Text(r#"{"alipay": 3}"#.into());
    merchant.notify_url = Some("https://shop.example/notify".into());
    repo.insert_merchant(&merchant).await.unwrap();

    let now = Utc::now();
    repo.insert_order(100, 1200, true, now).await.unwrap();
    repo.insert_order(100, 800, false, now).await.unwrap();
    repo.insert_order(100, 5000, true, now - chrono::Duration::days(3))
        .await
        .unwrap();

    repo
}

fn server(repo: SqliteRepo, requests_per_minute: u32) -> axum::Router {
    HttpServer::with_rate_limit(OverviewService::new(repo), requests_per_minute).router()
}

fn get(uri: &str, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("Authorization", format!("Bearer {}", key));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_needs_no_key() {
    let app = server(seeded_repo().await, 100);

    let response = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_overview_without_key_is_unauthorized() {
    let app = server(seeded_repo().await, 100);

    let response = app
        .oneshot(get("/api/merchant/overview", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_overview_with_unknown_key_is_unauthorized() {
    let app = server(seeded_repo().await, 100);

    let response = app
        .oneshot(get("/api/merchant/overview", Some("mk_nope")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_overview_body_shape() {
    let app = server(seeded_repo().await, 100);

    let response = app
        .oneshot(get("/api/merchant/overview", Some(API_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["code"], 0);
    let data = &json["data"];
    assert_eq!(data["today"]["order_count"], 2);
    assert_eq!(data["today"]["total_money"], 1200);
    assert_eq!(data["today"]["success_count"], 1);
    assert_eq!(data["total"]["order_count"], 3);
    assert_eq!(data["total"]["total_money"], 6200);
    assert_eq!(data["total"]["success_count"], 2);
    assert_eq!(data["providerCount"], 1);
    assert_eq!(data["merchant"]["api_key"], API_KEY);
    assert_eq!(data["merchant"]["notify_url"], "https://shop.example/notify");
    assert_eq!(data["merchant"]["status"], "active");
    assert_eq!(data["pay_group_name"], "standard");

    let rates = data["rates"].as_array().unwrap();
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0]["pay_type"], "wxpay");
    assert_eq!(rates[0]["pay_type_name"], "微信支付");
    assert_eq!(rates[0]["rate"], 0.06);
    assert_eq!(rates[1]["pay_type"], "alipay");
    assert_eq!(rates[1]["rate"], 0.03);
}

#[tokio::test]
async fn test_overview_accepts_x_api_key_header() {
    let app = server(seeded_repo().await, 100);

    let request = Request::builder()
        .uri("/api/merchant/overview")
        .header("X-API-Key", API_KEY)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_overview_storage_failure_returns_failure_envelope() {
    let repo = seeded_repo().await;
    sqlx::query("DROP TABLE orders")
        .execute(repo.pool())
        .await
        .unwrap();
    let app = server(repo, 100);

    let response = app
        .oneshot(get("/api/merchant/overview", Some(API_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], -1);
    assert_eq!(json["msg"], "failed to load overview data");
}

#[tokio::test]
async fn test_pay_types_listing() {
    let app = server(seeded_repo().await, 100);

    let response = app
        .oneshot(get("/api/pay-types?device=mobile", Some(API_KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["alipay", "wxpay", "qqpay", "bank", "usdt"]);
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = server(seeded_repo().await, 100);

    let response = app
        .oneshot(get("/api-docs/openapi.json", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/api/merchant/overview"].is_object());
}

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    let app = server(seeded_repo().await, 3);

    for i in 1..=3 {
        let response = app
            .clone()
            .oneshot(get("/api/merchant/overview", Some(API_KEY)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "request {} should pass", i);
    }

    let response = app
        .clone()
        .oneshot(get("/api/merchant/overview", Some(API_KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Rate limit"));
    assert_eq!(json["retry_after_seconds"], 60);
}

#[tokio::test]
async fn test_rate_limit_buckets_are_per_key() {
    let app = server(seeded_repo().await, 1);

    let first = app
        .clone()
        .oneshot(get("/api/merchant/overview", Some(API_KEY)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    // An unknown key is rejected by auth before it reaches the limiter.
    let other = app
        .clone()
        .oneshot(get("/api/merchant/overview", Some("mk_other")))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::UNAUTHORIZED);

    let health = app.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_keys_do_not_create_rate_limit_buckets() {
    let server = HttpServer::with_rate_limit(OverviewService::new(seeded_repo().await), 100);
    let app = server.router();

    for i in 0..20 {
        let key = format!("mk_random_{}", i);
        let response = app
            .clone()
            .oneshot(get("/api/merchant/overview", Some(&key)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    assert_eq!(server.rate_limiter().tracked_keys(), 0);

    let response = app
        .clone()
        .oneshot(get("/api/merchant/overview", Some(API_KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(server.rate_limiter().tracked_keys(), 1);
}
