// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /analyze
// - POST /batch   (results + statistics)
// - POST /account (success envelope, 400 and 404 errors)
// - app() built from the bundled config

use std::env;

use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use tweet_sentiment_analyzer::{app, create_router, AppState, SentimentAnalyzer};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

fn test_router() -> Router {
    create_router(AppState::new(SentimentAnalyzer::default()))
}

async fn post_json(app: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST");

    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("parse json");
    (status, v)
}

/// RAII guard that restores env vars on drop.
struct EnvSnapshot {
    saved: Vec<(String, Option<String>)>,
}
impl EnvSnapshot {
    fn set(pairs: &[(&str, Option<&str>)]) -> Self {
        let mut saved = Vec::with_capacity(pairs.len());
        for (k, v) in pairs {
            saved.push((k.to_string(), env::var(k).ok()));
            match v {
                Some(val) => env::set_var(k, val),
                None => env::remove_var(k),
            }
        }
        Self { saved }
    }
}
impl Drop for EnvSnapshot {
    fn drop(&mut self) {
        for (k, maybe_v) in self.saved.drain(..) {
            match maybe_v {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    assert_eq!(String::from_utf8(bytes.to_vec()).expect("utf8"), "ok");
}

#[tokio::test]
async fn api_analyze_returns_result_shape() {
    let (status, v) = post_json(
        test_router(),
        "/analyze",
        json!({ "text": "Pelayanan sangat bagus, saya senang" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["sentiment"], "positive");
    assert_eq!(v["method"], "lexicon");
    assert_eq!(v["language"], "id");
    assert_eq!(v["score"], 1.0);
    assert!(v["details"].get("neutral").is_some(), "missing details.neutral");
    assert_eq!(v["word_counts"]["positive_words"], 2);
}

#[tokio::test]
async fn api_analyze_blank_text_is_neutral() {
    let (status, v) = post_json(test_router(), "/analyze", json!({ "text": "" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["sentiment"], "neutral");
    assert_eq!(v["method"], "none");
    assert!(v.get("language").is_none());
}

#[tokio::test]
async fn api_batch_returns_results_and_statistics() {
    let (status, v) = post_json(
        test_router(),
        "/batch",
        json!({ "texts": ["bagus sekali", "", "tidak bagus", "biasa saja"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let results = v["results"].as_array().expect("results array");
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["sentiment"], "positive");
    assert_eq!(results[2]["sentiment"], "negative");

    let s = &v["statistics"];
    assert_eq!(s["total"], 4);
    assert_eq!(s["neutral"], 2);
    assert_eq!(s["positive_percentage"], 25.0);
    assert_eq!(s["overall_sentiment"], "NEUTRAL");
}

#[tokio::test]
async fn api_account_success_envelope() {
    let payload = json!({
        "username": " @valemis ",
        "tweets": [
            { "tweet_id": "1", "text": "Lowongan kerja baru dibuka, mantap!", "likes_count": 12 },
            { "tweet_id": "2", "text": "Pelayanan sangat bagus" },
            { "tweet_id": "3", "text": "biasa saja" }
        ]
    });
    let (status, v) = post_json(test_router(), "/account", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "success");

    let data = &v["data"];
    assert_eq!(data["username"], "valemis");
    assert_eq!(data["total_tweets"], 3);
    assert_eq!(data["sentiment_distribution"]["positive"]["count"], 2);
    assert_eq!(data["sentiment_distribution"]["positive"]["percentage"], 66.67);
    assert_eq!(data["overall_sentiment"], "POSITIVE");
    assert_eq!(data["tweets"][0]["likes_count"], 12);
    assert_eq!(data["tweets"][2]["tweet_id"], "3");
    assert!(data["analyzed_at"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn api_account_errors() {
    let (status, v) = post_json(
        test_router(),
        "/account",
        json!({ "username": "@", "tweets": [{ "text": "bagus" }] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["status"], "error");
    assert_eq!(v["message"], "Username is required");

    let (status, v) = post_json(
        test_router(),
        "/account",
        json!({ "username": "valemis", "tweets": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(v["message"], "No tweets found for @valemis");
}

#[serial_test::serial]
#[tokio::test]
async fn app_builds_from_bundled_config() {
    let _env = EnvSnapshot::set(&[
        ("SENTIMENT_CONFIG_PATH", None),
        ("SENTIMENT_METHOD", Some("lexicon")),
        ("SENTIMENT_LANGUAGE", None),
        ("PROVIDER_TEST_MODE", None),
    ]);
    let router = app().await.expect("app() should build a Router");

    let (status, v) = post_json(router, "/analyze", json!({ "text": "tidak bagus" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["sentiment"], "negative");
}

#[serial_test::serial]
#[tokio::test]
async fn app_rejects_unknown_method_override() {
    let _env = EnvSnapshot::set(&[
        ("SENTIMENT_CONFIG_PATH", None),
        ("SENTIMENT_METHOD", Some("vader")),
    ]);
    assert!(app().await.is_err());
}
