use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shuttle_axum::axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::report::{self, AccountReport, ReportError, Tweet};
use crate::sentiment::{SentimentAnalyzer, SentimentResult};
use crate::stats::BatchStatistics;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SentimentAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: SentimentAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/batch", post(analyze_batch))
        .route("/account", post(analyze_account))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct BatchReq {
    #[serde(default)]
    texts: Vec<String>,
}

#[derive(Serialize)]
struct BatchResp {
    results: Vec<SentimentResult>,
    statistics: BatchStatistics,
}

#[derive(Deserialize)]
struct AccountReq {
    #[serde(default)]
    username: String,
    #[serde(default)]
    tweets: Vec<Tweet>,
}

/// Envelope used by `/account`, mirroring what the dashboard expects.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum AccountResp {
    Success { data: AccountReport },
    Error { message: String },
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Json<SentimentResult> {
    Json(state.analyzer.analyze(&body.text).await)
}

async fn analyze_batch(State(state): State<AppState>, Json(body): Json<BatchReq>) -> Json<BatchResp> {
    let results = state.analyzer.batch_analyze(&body.texts).await;
    let statistics = state.analyzer.get_statistics(&results);
    Json(BatchResp {
        results,
        statistics,
    })
}

async fn analyze_account(
    State(state): State<AppState>,
    Json(body): Json<AccountReq>,
) -> Response {
    match report::analyze_account(&state.analyzer, &body.username, &body.tweets).await {
        Ok(data) => Json(AccountResp::Success { data }).into_response(),
        Err(err) => {
            let status = match err {
                ReportError::MissingUsername => StatusCode::BAD_REQUEST,
                ReportError::NoTweets(_) => StatusCode::NOT_FOUND,
            };
            (
                status,
                Json(AccountResp::Error {
                    message: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
