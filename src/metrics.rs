use axum::{routing::get, Router};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::sentiment::SentimentResult;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "sentiment_analyzed_total",
            "Texts analyzed, by producing method and language."
        );
        describe_counter!(
            "sentiment_provider_failures_total",
            "External provider calls that failed or were unavailable."
        );
    });
}

pub(crate) fn record_result(result: &SentimentResult) {
    let language = result.language.map(|l| l.as_str()).unwrap_or("unknown");
    counter!(
        "sentiment_analyzed_total",
        "method" => result.method.as_str(),
        "language" => language
    )
    .increment(1);
}

pub(crate) fn record_provider_failure(provider: &'static str, reason: &'static str) {
    counter!(
        "sentiment_provider_failures_total",
        "provider" => provider,
        "reason" => reason
    )
    .increment(1);
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if a recorder is already installed.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
