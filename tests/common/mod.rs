//! Shared test helpers: a keyword classifier and HTTP plumbing

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use sentiment_api::api::{create_router, handlers::AppState};
use sentiment_api::models::types::ClassProbabilities;
use sentiment_api::{AppError, AppResult, SentimentClassifier};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Deterministic classifier keyed on words in the text
pub struct KeywordClassifier;

impl SentimentClassifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword-stub"
    }

    fn predict(&self, text: &str) -> AppResult<ClassProbabilities> {
        let text = text.to_lowercase();
        if text.contains("explode") {
            return Err(AppError::inference_failed("stub inference failure"));
        }
        let probs = if text.contains("bad") || text.contains("rodet") {
            ClassProbabilities {
                positive: 0.05,
                neutral: 0.15,
                negative: 0.8,
            }
        } else if text.contains("good") || text.contains("great") || text.contains("god") {
            ClassProbabilities {
                positive: 0.9,
                neutral: 0.05,
                negative: 0.05,
            }
        } else {
            ClassProbabilities {
                positive: 0.3,
                neutral: 0.6,
                negative: 0.1,
            }
        };
        Ok(probs)
    }
}

pub fn service_router() -> Router {
    create_router(Arc::new(AppState::new(Arc::new(KeywordClassifier), 2)))
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Serve a router on an ephemeral loopback port
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
