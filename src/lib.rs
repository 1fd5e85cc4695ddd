// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod metrics;
pub mod report;
pub mod sentiment;
pub mod stats;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{detect_language, IndonesianAnalyzer, Language, LanguageMode, Method};
pub use crate::api::{create_router, AppState};
pub use crate::config::SentimentConfig;
pub use crate::report::{analyze_account, AccountReport, ReportError, Tweet};
pub use crate::sentiment::{Category, MethodTag, SentimentAnalyzer, SentimentResult};
pub use crate::stats::{BatchStatistics, OverallSentiment};

use shuttle_axum::axum::Router;

/// Build the full HTTP app from configuration (file + env overrides).
pub async fn app() -> anyhow::Result<Router> {
    let cfg = SentimentConfig::load_default()?;
    let analyzer = cfg.build_analyzer()?;
    Ok(create_router(AppState::new(analyzer)))
}
