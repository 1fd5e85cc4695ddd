//! Tweet Sentiment Service: binary entrypoint.
//! Loads configuration, builds the analyzer and serves the Axum router.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tweet_sentiment_analyzer::analyze::Lexicon;
use tweet_sentiment_analyzer::metrics::Metrics;

/// Install a local subscriber for the `sentiment` log target.
///
/// Only for local runs with `SENTIMENT_DEV_LOG=1` (debug build, or `SHUTTLE_ENV`
/// naming a local/dev environment). Deployed instances keep the runtime's own
/// subscriber, and `RUST_LOG` still overrides the default filter.
fn enable_dev_tracing() {
    let dev_flag = std::env::var("SENTIMENT_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentiment=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let (pos, neg, mods, negs) = Lexicon::indonesian().sizes();
    info!(
        target: "sentiment",
        positive = pos,
        negative = neg,
        modifiers = mods,
        negations = negs,
        "embedded Indonesian lexicon loaded"
    );

    let mut router = tweet_sentiment_analyzer::app().await.context("building sentiment service")?;

    if std::env::var("SENTIMENT_METRICS").is_ok_and(|v| v == "1") {
        let metrics = Metrics::init()?;
        router = router.merge(metrics.router());
        info!(target: "sentiment", "prometheus metrics exposed on /metrics");
    }

    Ok(router.into())
}
