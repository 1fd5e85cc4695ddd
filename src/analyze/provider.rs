//! General-purpose sentiment providers: the external capability consulted for
//! non-Indonesian text and by the translation/hybrid/auto policies.
//!
//! Providers are selected by configuration, never by probing. Every call goes
//! through `score_with_timeout`, which honours `is_available()` and bounds the
//! call; callers treat any `ProviderError` as "unavailable for this text".

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::text_id;
use crate::metrics;

/// Allowed drift of `pos + neu + neg` from 1.0 (providers round their shares).
pub const DISTRIBUTION_TOLERANCE: f64 = 0.01;

/// Raw provider output on the general-provider scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderScore {
    pub compound: f64,
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
    /// Text the provider actually scored (e.g. an English translation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
}

impl ProviderScore {
    pub fn new(compound: f64, pos: f64, neu: f64, neg: f64) -> Self {
        Self {
            compound,
            pos,
            neu,
            neg,
            translated_text: None,
        }
    }

    /// Map a bare polarity in [-1, 1] onto a distribution: the positive or
    /// negative share equals |polarity| and the rest is neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        let p = polarity.clamp(-1.0, 1.0);
        if p > 0.0 {
            Self::new(p, p, 1.0 - p, 0.0)
        } else if p < 0.0 {
            Self::new(p, 0.0, 1.0 - p.abs(), p.abs())
        } else {
            Self::new(0.0, 0.0, 1.0, 0.0)
        }
    }

    /// Check the score against the result invariants: compound in [-1, 1],
    /// each component in [0, 1], components summing to 1 (± `DISTRIBUTION_TOLERANCE`).
    pub fn validate(&self) -> Result<(), ProviderError> {
        let values = [self.compound, self.pos, self.neu, self.neg];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(ProviderError::BadResponse("non-finite score".into()));
        }
        if !(-1.0..=1.0).contains(&self.compound) {
            return Err(ProviderError::BadResponse(format!(
                "compound {} outside [-1, 1]",
                self.compound
            )));
        }
        if !values[1..].iter().all(|v| (0.0..=1.0).contains(v)) {
            return Err(ProviderError::BadResponse(format!(
                "distribution {{{}, {}, {}}} outside [0, 1]",
                self.pos, self.neu, self.neg
            )));
        }
        let sum = self.pos + self.neu + self.neg;
        if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(ProviderError::BadResponse(format!(
                "distribution sums to {sum}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider `{0}` is not available")]
    Unavailable(&'static str),
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
    #[error("provider transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned an unusable response: {0}")]
    BadResponse(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ProviderError::Unavailable(_) => "unavailable",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Http(_) => "http",
            ProviderError::BadResponse(_) => "bad_response",
        }
    }
}

/// Capability interface for an external sentiment scorer.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Provider name for diagnostics and result tagging.
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }

    async fn score(&self, text: &str) -> Result<ProviderScore, ProviderError>;
}

/// Convenient alias used by analyzers and config.
pub type DynProvider = Arc<dyn SentimentProvider>;

/// Availability check + timeout around a single provider call. No retries.
pub async fn score_with_timeout(
    provider: &dyn SentimentProvider,
    text: &str,
    timeout: Duration,
) -> Result<ProviderScore, ProviderError> {
    if !provider.is_available() {
        return Err(ProviderError::Unavailable(provider.name()));
    }
    match tokio::time::timeout(timeout, provider.score(text)).await {
        Ok(Ok(score)) => score.validate().map(|()| score),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(ProviderError::Timeout(timeout)),
    }
}

/// Log and count a provider failure. The raw text is never logged.
pub(crate) fn note_failure(provider: &'static str, text: &str, err: &ProviderError) {
    let id = text_id(text);
    match err {
        ProviderError::Unavailable(_) => {
            debug!(target: "sentiment", %id, provider, "provider unavailable; falling back")
        }
        _ => warn!(target: "sentiment", %id, provider, error = %err, "provider failed; falling back"),
    }
    metrics::record_provider_failure(provider, err.reason());
}

// ------------------------------------------------------------
// Concrete providers
// ------------------------------------------------------------

/// Never available; stands in for an unconfigured provider slot.
pub struct DisabledProvider;

#[async_trait]
impl SentimentProvider for DisabledProvider {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn score(&self, _text: &str) -> Result<ProviderScore, ProviderError> {
        Err(ProviderError::Unavailable(self.name()))
    }
}

/// Deterministic provider for tests/local runs.
#[derive(Clone)]
pub struct MockProvider {
    pub fixed: ProviderScore,
}

impl MockProvider {
    pub fn neutral() -> Self {
        Self {
            fixed: ProviderScore::new(0.0, 0.0, 1.0, 0.0),
        }
    }
}

#[async_trait]
impl SentimentProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn score(&self, _text: &str) -> Result<ProviderScore, ProviderError> {
        Ok(self.fixed.clone())
    }
}

/// JSON-over-HTTP scorer (e.g. a translate-then-score or English scoring service).
///
/// Request:  `POST <endpoint>` with `{"text": "...", "language": "id"|"en"}`
/// Response: `{"compound", "pos", "neu", "neg"[, "translated_text"]}` or `{"polarity"}`.
pub struct HttpProvider {
    name: &'static str,
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: &'static str,
}

impl HttpProvider {
    pub fn new(
        name: &'static str,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        language: &'static str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent("tweet-sentiment-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4).min(timeout))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            name,
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            language,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireScore {
    Full(ProviderScore),
    Polarity { polarity: f64 },
}

#[async_trait]
impl SentimentProvider for HttpProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }

    async fn score(&self, text: &str) -> Result<ProviderScore, ProviderError> {
        #[derive(Serialize)]
        struct Req<'a> {
            text: &'a str,
            language: &'a str,
        }

        let mut req = self.http.post(&self.endpoint).json(&Req {
            text,
            language: self.language,
        });
        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(ProviderError::BadResponse(format!(
                "status {}",
                resp.status()
            )));
        }
        match resp.json::<WireScore>().await? {
            WireScore::Full(score) => Ok(score),
            WireScore::Polarity { polarity } if polarity.is_finite() => {
                Ok(ProviderScore::from_polarity(polarity))
            }
            WireScore::Polarity { .. } => {
                Err(ProviderError::BadResponse("non-finite polarity".into()))
            }
        }
    }
}
