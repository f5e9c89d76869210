// API tests — driving the router directly with tower::ServiceExt::oneshot.
//
// These exercise the full request path (JSON extraction, scoring, sentiment
// merge, response shape) without binding a socket. The keyword scorer keeps
// everything deterministic and model-free.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use sift::scorer::keyword::KeywordScorer;
use sift::scorer::{Category, ScorerMode};
use sift::sentiment::SentimentAnalyzer;
use sift::web::{build_router, AppState};

/// Build a router backed by the keyword scorer.
fn keyword_app() -> axum::Router {
    build_router(AppState {
        scorer: Arc::new(KeywordScorer),
        sentiment: Arc::new(SentimentAnalyzer::new()),
        mode: ScorerMode::Keyword,
    })
}

async fn post_predict(app: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn assert_close(json: &serde_json::Value, key: &str, expected: f64) {
    let actual = json[key].as_f64().unwrap_or_else(|| panic!("{key} missing"));
    assert!(
        (actual - expected).abs() < 1e-9,
        "{key}: expected {expected}, got {actual}"
    );
}

// ============================================================
// GET /health
// ============================================================

#[tokio::test]
async fn health_reports_keyword_mode() {
    let response = keyword_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model_loaded"], false);
}

// ============================================================
// POST /predict — response shape
// ============================================================

#[tokio::test]
async fn predict_returns_all_categories_plus_ancillary_fields() {
    let (status, json) = post_predict(keyword_app(), r#"{"text": "hello there"}"#).await;

    assert_eq!(status, StatusCode::OK);
    for category in Category::ALL {
        let score = json[category.as_str()]
            .as_f64()
            .unwrap_or_else(|| panic!("missing category {category}"));
        assert!((0.0..=1.0).contains(&score), "{category} = {score}");
    }
    let sentiment = json["sentiment_score"].as_f64().unwrap();
    assert!((-1.0..=1.0).contains(&sentiment));
    assert_close(&json, "confidence", 0.85);
}

#[tokio::test]
async fn predict_missing_text_field_scores_zero() {
    let (status, json) = post_predict(keyword_app(), "{}").await;

    assert_eq!(status, StatusCode::OK);
    for category in Category::ALL {
        assert_close(&json, category.as_str(), 0.0);
    }
    assert_close(&json, "sentiment_score", 0.0);
}

#[tokio::test]
async fn predict_empty_text_scores_zero() {
    let (status, json) = post_predict(keyword_app(), r#"{"text": ""}"#).await;

    assert_eq!(status, StatusCode::OK);
    for category in Category::ALL {
        assert_close(&json, category.as_str(), 0.0);
    }
}

// ============================================================
// POST /predict — scoring behavior through the full stack
// ============================================================

#[tokio::test]
async fn predict_insulting_text_scores_expected_values() {
    let (status, json) =
        post_predict(keyword_app(), r#"{"text": "you are so stupid and dumb"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&json, "toxicity", 0.4);
    assert_close(&json, "obscene", 0.28);
    assert_close(&json, "insult", 0.0);
    assert_close(&json, "identity_attack", 0.0);
    assert_close(&json, "sexual_explicit", 0.0);
}

#[tokio::test]
async fn predict_threatening_text_scores_threat_and_severe() {
    let (status, json) = post_predict(keyword_app(), r#"{"text": "I will kill you"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&json, "threat", 0.2);
    assert_close(&json, "severe_toxicity", 0.2);
}

#[tokio::test]
async fn predict_hostile_text_has_negative_sentiment() {
    let (_, json) = post_predict(
        keyword_app(),
        r#"{"text": "I hate this, it is horrible and disgusting"}"#,
    )
    .await;

    let sentiment = json["sentiment_score"].as_f64().unwrap();
    assert!(sentiment < 0.0, "expected negative sentiment, got {sentiment}");
}

#[tokio::test]
async fn predict_is_case_insensitive() {
    let (_, upper) = post_predict(keyword_app(), r#"{"text": "STUPID"}"#).await;
    let (_, lower) = post_predict(keyword_app(), r#"{"text": "stupid"}"#).await;

    assert_eq!(upper["toxicity"], lower["toxicity"]);
    assert_close(&upper, "toxicity", 0.2);
}
