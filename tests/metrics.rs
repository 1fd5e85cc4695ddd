// tests/metrics.rs
//
// Prometheus exposition: a single test per binary, because the recorder is
// process-global and can only be installed once.

use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::Request;
use axum::Router;
use http::StatusCode;
use tower::ServiceExt;

use tweet_sentiment_analyzer::analyze::DisabledProvider;
use tweet_sentiment_analyzer::metrics::Metrics;
use tweet_sentiment_analyzer::{create_router, AppState, SentimentAnalyzer};

#[tokio::test]
async fn metrics_endpoint_exposes_analysis_and_failure_counters() {
    let metrics = Metrics::init().expect("install recorder");
    let analyzer = SentimentAnalyzer::default().with_english_provider(Arc::new(DisabledProvider));
    let app: Router = create_router(AppState::new(analyzer)).merge(metrics.router());

    for text in ["saya tidak suka", "I love this"] {
        let resp = app
            .clone()
            .oneshot(
                Request::post("/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::json!({ "text": text }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    // axum::body::to_bytes requires an explicit limit
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in [
        "sentiment_analyzed_total",
        "language=\"id\"",
        "language=\"en\"",
        "sentiment_provider_failures_total",
        "reason=\"unavailable\"",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
}
