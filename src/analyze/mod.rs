// src/analyze/mod.rs
//! Scoring pipeline: lexicon store, tokenizer, lexicon scorer, language detector,
//! external providers and the Indonesian combination policy.

pub mod hybrid;
pub mod language;
pub mod lexicon;
pub mod provider;
pub mod scorer;
pub mod tokenize;

// Re-export convenient types.
pub use hybrid::{IndonesianAnalyzer, Method, AUTO_CONFIDENCE_GATE};
pub use language::{detect_language, Language, LanguageMode};
pub use lexicon::{Lexicon, LexiconError, Polarity};
pub use provider::{
    DisabledProvider, DynProvider, HttpProvider, MockProvider, ProviderError, ProviderScore,
    SentimentProvider,
};
pub use scorer::{LexiconAnalyzer, Masses};
pub use tokenize::tokenize;

/// Short, anonymized id for a text (first 6 bytes of SHA-256, hex).
/// Used in logs instead of the raw text.
pub(crate) fn text_id(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
