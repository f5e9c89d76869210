// Request handlers for the classification API.
//
// POST /predict — score a text across the seven toxicity categories, merge
// in the VADER sentiment compound, and attach the fixed confidence value.
// GET /health — liveness plus whether the neural model is the active scorer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::scorer::CategoryScores;
use crate::web::AppState;

/// Fixed confidence reported with every prediction. The scorers don't
/// produce a real calibration value, so this matches what consumers of the
/// original API were given.
const CONFIDENCE: f64 = 0.85;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// The text to classify. A missing field is treated as empty text,
    /// which scores zero everywhere.
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub scores: CategoryScores,
    pub sentiment_score: f64,
    pub confidence: f64,
}

/// POST /predict — classify a single text.
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> impl IntoResponse {
    let scores = match state.scorer.score_text(&request.text).await {
        Ok(scores) => scores,
        Err(e) => {
            error!(error = %e, "Scoring failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "scoring failed" })),
            )
                .into_response();
        }
    };

    let sentiment_score = state.sentiment.compound_score(&request.text);

    Json(PredictResponse {
        scores,
        sentiment_score,
        confidence: CONFIDENCE,
    })
    .into_response()
}

/// GET /health — always 200 once the server is up; `model_loaded` tells
/// deployment tooling which scoring path is active.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "model_loaded": state.mode.model_loaded(),
    }))
}
