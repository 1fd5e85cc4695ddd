//! Combination policy for Indonesian text: lexicon scorer plus an optional
//! translation-based provider.
//!
//! Modes (fixed per analyzer instance):
//! - `lexicon`:     lexicon result only
//! - `translation`: provider result, lexicon result if the provider is unavailable
//! - `hybrid`:      mean of both compounds and of each distribution component
//! - `auto`:        lexicon result when |compound| > 0.3, else provider, else lexicon
//!
//! Provider failures never escape: they are logged and the lexicon result is used.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::lexicon::Lexicon;
use super::provider::{note_failure, score_with_timeout, DynProvider};
use super::scorer::LexiconAnalyzer;
use crate::sentiment::{
    round_to, Category, Distribution, MethodTag, SentimentResult, LEXICON_THRESHOLD,
};

/// Lexicon confidence above which `auto` mode skips the provider.
pub const AUTO_CONFIDENCE_GATE: f64 = 0.3;

/// Default bound for a single provider call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Auto,
    Lexicon,
    Translation,
    Hybrid,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Auto => "auto",
            Method::Lexicon => "lexicon",
            Method::Translation => "translation",
            Method::Hybrid => "hybrid",
        }
    }

    /// Sub-mode used inside the Indonesian analyzer for a globally configured method:
    /// global `auto` means `hybrid` there, everything else passes through.
    pub fn indonesian_mode(self) -> Method {
        match self {
            Method::Auto => Method::Hybrid,
            other => other,
        }
    }
}

impl FromStr for Method {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Method::Auto),
            "lexicon" => Ok(Method::Lexicon),
            "translation" => Ok(Method::Translation),
            "hybrid" => Ok(Method::Hybrid),
            other => anyhow::bail!("unsupported sentiment method: {other}"),
        }
    }
}

pub struct IndonesianAnalyzer {
    method: Method,
    lexicon: LexiconAnalyzer,
    translation: Option<DynProvider>,
    provider_timeout: Duration,
}

impl Default for IndonesianAnalyzer {
    fn default() -> Self {
        Self::new(Method::Hybrid, Lexicon::indonesian())
    }
}

impl IndonesianAnalyzer {
    pub fn new(method: Method, lexicon: Arc<Lexicon>) -> Self {
        Self {
            method,
            lexicon: LexiconAnalyzer::new(lexicon),
            translation: None,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_translation_provider(mut self, provider: DynProvider) -> Self {
        self.translation = Some(provider);
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn lexicon_analyzer(&self) -> &LexiconAnalyzer {
        &self.lexicon
    }

    pub async fn analyze(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::neutral(MethodTag::None);
        }

        // Lexicon always runs: it is cheap and the fallback for every other mode.
        let lexicon = self.lexicon.analyze(text);

        match self.method {
            Method::Lexicon => lexicon,
            Method::Translation => self.consult(text).await.unwrap_or(lexicon),
            Method::Hybrid => match self.consult(text).await {
                Some(provider) => combine(lexicon, provider),
                None => lexicon,
            },
            Method::Auto => {
                if lexicon.score.abs() > AUTO_CONFIDENCE_GATE {
                    return lexicon;
                }
                self.consult(text).await.unwrap_or(lexicon)
            }
        }
    }

    async fn consult(&self, text: &str) -> Option<SentimentResult> {
        let provider = self.translation.as_deref()?;
        match score_with_timeout(provider, text, self.provider_timeout).await {
            Ok(score) => Some(SentimentResult::from_provider(
                score,
                provider.name(),
                MethodTag::Translation,
            )),
            Err(err) => {
                note_failure(provider.name(), text, &err);
                None
            }
        }
    }
}

/// Hybrid merge: simple means, category re-derived with the lexicon thresholds.
/// Both inputs are kept on the result for audit.
pub fn combine(lexicon: SentimentResult, provider: SentimentResult) -> SentimentResult {
    let score = (lexicon.score + provider.score) / 2.0;
    let mean = |a: f64, b: f64| round_to((a + b) / 2.0, 4);

    SentimentResult {
        category: Category::from_score(score, LEXICON_THRESHOLD),
        score: round_to(score, 4),
        details: Distribution {
            positive: mean(lexicon.details.positive, provider.details.positive),
            neutral: mean(lexicon.details.neutral, provider.details.neutral),
            negative: mean(lexicon.details.negative, provider.details.negative),
        },
        method: MethodTag::Hybrid,
        provider: provider.provider.clone(),
        lexicon_result: Some(Box::new(lexicon)),
        provider_result: Some(Box::new(provider)),
        ..SentimentResult::neutral(MethodTag::Hybrid)
    }
}
