//! Sentiment result types and the top-level, language-dispatching analyzer.
//!
//! Three categorization regimes coexist and are kept apart on purpose:
//! - lexicon and hybrid results: ±0.1 (`LEXICON_THRESHOLD`)
//! - general-provider results:   ±0.05 (`PROVIDER_THRESHOLD`)
//! - corpus conclusion:          ±0.2 (see `stats`)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::analyze::hybrid::DEFAULT_PROVIDER_TIMEOUT;
use crate::analyze::provider::{note_failure, score_with_timeout, DynProvider, ProviderScore};
use crate::analyze::{text_id, IndonesianAnalyzer, Language, LanguageMode};
use crate::metrics;
use crate::stats::{self, BatchStatistics};

/// Category threshold for lexicon-only and hybrid scores (inclusive).
pub const LEXICON_THRESHOLD: f64 = 0.1;
/// Category threshold for general-provider scores (inclusive).
pub const PROVIDER_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Neutral,
    Negative,
}

impl Category {
    /// `score >= t` → positive, `score <= -t` → negative, else neutral.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            Category::Positive
        } else if score <= -threshold {
            Category::Negative
        } else {
            Category::Neutral
        }
    }
}

/// Share of positive/neutral/negative, each in [0,1], summing to ~1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl Distribution {
    pub const NEUTRAL: Distribution = Distribution {
        positive: 0.0,
        neutral: 1.0,
        negative: 0.0,
    };
}

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodTag {
    /// Blank input, nothing scored.
    None,
    Lexicon,
    /// Translation-based provider inside the Indonesian analyzer.
    Translation,
    Hybrid,
    /// General provider used directly for non-Indonesian text.
    General,
}

impl MethodTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodTag::None => "none",
            MethodTag::Lexicon => "lexicon",
            MethodTag::Translation => "translation",
            MethodTag::Hybrid => "hybrid",
            MethodTag::General => "general",
        }
    }
}

/// Raw lexicon mass per polarity, truncated to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCounts {
    pub positive_words: u64,
    pub negative_words: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(rename = "sentiment")]
    pub category: Category,
    /// Compound score in [-1, 1].
    pub score: f64,
    pub details: Distribution,
    pub method: MethodTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_counts: Option<WordCounts>,
    /// Name of the external provider that contributed, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_result: Option<Box<SentimentResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_result: Option<Box<SentimentResult>>,
}

impl SentimentResult {
    /// Neutral result: score 0.0, distribution {0, 1, 0}.
    pub fn neutral(method: MethodTag) -> Self {
        Self {
            category: Category::Neutral,
            score: 0.0,
            details: Distribution::NEUTRAL,
            method,
            language: None,
            word_counts: None,
            provider: None,
            translated_text: None,
            lexicon_result: None,
            provider_result: None,
        }
    }

    /// Wrap a provider score; categorized with the ±0.05 provider thresholds.
    pub fn from_provider(score: ProviderScore, provider: &str, method: MethodTag) -> Self {
        let compound = score.compound.clamp(-1.0, 1.0);
        Self {
            category: Category::from_score(compound, PROVIDER_THRESHOLD),
            score: compound,
            details: Distribution {
                positive: score.pos,
                neutral: score.neu,
                negative: score.neg,
            },
            method,
            provider: Some(provider.to_string()),
            translated_text: score.translated_text,
            ..Self::neutral(method)
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

/// Round to `decimals` places; exact halves go to the even neighbour.
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (x * f).round_ties_even() / f
}

/// Language-dispatching analyzer.
///
/// Indonesian text always goes through the `IndonesianAnalyzer` (whose mode comes
/// from configuration). Other text uses the English-capable provider directly, or
/// the Indonesian analyzer as a last resort when that provider is missing or fails.
pub struct SentimentAnalyzer {
    indonesian: IndonesianAnalyzer,
    english: Option<DynProvider>,
    language: LanguageMode,
    provider_timeout: Duration,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new(IndonesianAnalyzer::default())
    }
}

impl SentimentAnalyzer {
    pub fn new(indonesian: IndonesianAnalyzer) -> Self {
        Self {
            indonesian,
            english: None,
            language: LanguageMode::Auto,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_english_provider(mut self, provider: DynProvider) -> Self {
        self.english = Some(provider);
        self
    }

    pub fn with_language(mut self, mode: LanguageMode) -> Self {
        self.language = mode;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn indonesian(&self) -> &IndonesianAnalyzer {
        &self.indonesian
    }

    pub async fn analyze(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::neutral(MethodTag::None);
        }

        let language = self.language.resolve(text);
        debug!(target: "sentiment", id = %text_id(text), language = language.as_str(), "routing text");

        let result = match language {
            Language::Id => self.indonesian.analyze(text).await,
            Language::En => match self.score_english(text).await {
                Some(r) => r,
                None => self.indonesian.analyze(text).await,
            },
        }
        .with_language(language);

        metrics::record_result(&result);
        result
    }

    async fn score_english(&self, text: &str) -> Option<SentimentResult> {
        let provider = self.english.as_deref()?;
        match score_with_timeout(provider, text, self.provider_timeout).await {
            Ok(score) => Some(SentimentResult::from_provider(
                score,
                provider.name(),
                MethodTag::General,
            )),
            Err(err) => {
                note_failure(provider.name(), text, &err);
                None
            }
        }
    }

    /// Analyze each text independently; output order matches input order.
    pub async fn batch_analyze<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SentimentResult> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.analyze(text.as_ref()).await);
        }
        results
    }

    pub fn get_statistics(&self, results: &[SentimentResult]) -> BatchStatistics {
        stats::compute(results)
    }
}
