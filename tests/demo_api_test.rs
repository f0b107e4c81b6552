//! Demo frontend tests against live loopback sentiment services

mod common;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::*;
use sentiment_api::demo::{create_demo_router, DemoState};
use sentiment_api::utils::dataset;
use sentiment_api::DemoConfig;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn demo_router(timeout: Duration) -> Router {
    let config = DemoConfig {
        request_timeout: timeout,
        ..Default::default()
    };
    create_demo_router(Arc::new(DemoState::new(&config, &dataset::builtin())))
}

/// Service that answers every request with a fixed status and body
async fn fixed_service(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/v1/sentiment",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    format!("http://{}", spawn(app).await)
}

#[tokio::test]
async fn test_index_page_embeds_dataset() {
    let app = demo_router(Duration::from_secs(4));
    let response = send(&app, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Great course, learned a lot."));
    assert!(html.contains(r#"value="http://localhost:8000""#));
}

#[tokio::test]
async fn test_score_through_real_service() {
    let base = format!("http://{}/", spawn(service_router()).await);
    let app = demo_router(Duration::from_secs(4));

    let response = send(
        &app,
        post_json("/api/score", json!({"service_url": base, "text": "Great course"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["label"], "positive");
    assert!(body["score"].as_f64().unwrap() >= 3.0);
    assert!(body["latency_ms"].as_f64().unwrap() >= 0.0);
    assert!(body.get("warning").is_none());

    let metrics = body_json(send(&app, get("/api/metrics")).await).await;
    assert_eq!(metrics["total_requests"], 1);
    assert_eq!(metrics["success_requests"], 1);
}

#[tokio::test]
async fn test_score_validation() {
    let app = demo_router(Duration::from_secs(4));

    let response = send(&app, post_json("/api/score", json!({"service_url": "", "text": "hi"}))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(
        &app,
        post_json("/api/score", json!({"service_url": "http://localhost:8000", "text": "  "})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["detail"], "Please enter some text to score.");
}

#[tokio::test]
async fn test_non_200_is_bad_gateway() {
    let base = fixed_service(StatusCode::INTERNAL_SERVER_ERROR, json!({"oops": true})).await;
    let app = demo_router(Duration::from_secs(4));

    let response = send(&app, post_json("/api/score", json!({"service_url": base, "text": "hi"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("External service responded with HTTP 500. Expected 200."));
    assert!(detail.contains("oops"));

    let metrics = body_json(send(&app, get("/api/metrics")).await).await;
    assert_eq!(metrics["failed_requests"], 1);
}

#[tokio::test]
async fn test_missing_score_field() {
    let base = fixed_service(StatusCode::OK, json!({"sentiment": "positive"})).await;
    let app = demo_router(Duration::from_secs(4));

    let response = send(&app, post_json("/api/score", json!({"service_url": base, "text": "hi"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("without the required field 'score'"));
    assert!(detail.contains("sentiment"));
}

#[tokio::test]
async fn test_out_of_range_score_warns() {
    let base = fixed_service(StatusCode::OK, json!({"score": 7})).await;
    let app = demo_router(Duration::from_secs(4));

    let response = send(&app, post_json("/api/score", json!({"service_url": base, "text": "hi"}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["score"], 7.0);
    assert_eq!(body["label"], "positive");
    assert_eq!(body["warning"], "Score 7 is outside expected range [-5, 5].");
}

#[tokio::test]
async fn test_numeric_string_score_is_accepted() {
    let base = fixed_service(StatusCode::OK, json!({"score": "-3.5"})).await;
    let app = demo_router(Duration::from_secs(4));

    let response = send(&app, post_json("/api/score", json!({"service_url": base, "text": "hi"}))).await;
    let body = body_json(response).await;
    assert_eq!(body["score"], -3.5);
    assert_eq!(body["label"], "negative");
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let slow = Router::new().route(
        "/v1/sentiment",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"score": 1.0}))
        }),
    );
    let base = format!("http://{}", spawn(slow).await);
    let app = demo_router(Duration::from_millis(200));

    let response = send(&app, post_json("/api/score", json!({"service_url": base, "text": "hi"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Timeout after 0.2s"), "{}", detail);
}

#[tokio::test]
async fn test_batch_accuracy() {
    let base = format!("http://{}", spawn(service_router()).await);
    let app = demo_router(Duration::from_secs(4));

    let dataset = json!([
        ["Great course", "positive"],
        ["A bad course", "negative"],
        ["The lectures happened", "neutral"],
        ["Good book", "negative"],
        ["explode", "neutral"]
    ]);
    let response = send(&app, post_json("/api/batch", json!({"service_url": base, "dataset": dataset}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["n"], 5);
    assert_eq!(body["correct"], 3);
    assert!((body["accuracy"].as_f64().unwrap() - 0.6).abs() < 1e-12);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[3]["pred"], "positive");
    assert_eq!(rows[3]["ok"], false);
    assert!(rows[4]["score"].is_null());
    assert!(rows[4]["pred"].is_null());
    assert!(rows[4]["error"].as_str().unwrap().contains("HTTP 500"));

    let metrics = body_json(send(&app, get("/api/metrics")).await).await;
    assert_eq!(metrics["total_requests"], 5);
    assert_eq!(metrics["failed_requests"], 1);
}

#[tokio::test]
async fn test_batch_validates_before_calling() {
    let app = demo_router(Duration::from_secs(4));

    let response = send(
        &app,
        post_json(
            "/api/batch",
            json!({"service_url": "http://127.0.0.1:9", "dataset": [["ok", "positive"], ["lonely"]]}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["detail"],
        "Dataset must be a list of [text, gold_label] pairs."
    );

    let response = send(
        &app,
        post_json(
            "/api/batch",
            json!({"service_url": "http://127.0.0.1:9", "dataset": [["ok", "great"]]}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let metrics = body_json(send(&app, get("/api/metrics")).await).await;
    assert_eq!(metrics["total_requests"], 0);
}

#[tokio::test]
async fn test_empty_batch() {
    let app = demo_router(Duration::from_secs(4));
    let response = send(
        &app,
        post_json("/api/batch", json!({"service_url": "http://localhost:8000", "dataset": []})),
    )
    .await;

    let body = body_json(response).await;
    assert_eq!(body["n"], 0);
    assert_eq!(body["accuracy"], 0.0);
    assert_eq!(body["avg_latency_ms"], 0.0);
}
