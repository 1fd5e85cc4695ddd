//! Lexicon store: polarity word sets, intensifier/dampener multipliers and
//! negation markers.
//!
//! The default Indonesian tables live in `config/lexicon_id.json` and are embedded
//! at compile time. They are parsed and validated once per process; any analyzer
//! can instead be handed a custom `Lexicon` (built in code or loaded from disk).
//!
//! JSON shape:
//! {
//!   "positive":  ["bagus", ...],
//!   "negative":  ["buruk", ...],
//!   "modifiers": { "sangat": 1.5, "agak": 0.5, ... },
//!   "negations": ["tidak", ...]
//! }

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static INDONESIAN: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let raw = include_str!("../../config/lexicon_id.json");
    Arc::new(Lexicon::from_json_str(raw).expect("valid Indonesian lexicon"))
});

/// Polarity class of a lexicon term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("term `{0}` is listed as both positive and negative")]
    Overlap(String),
    #[error("modifier `{word}` must have a finite multiplier > 0 (got {multiplier})")]
    InvalidMultiplier { word: String, multiplier: f64 },
    #[error("lexicon parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("reading lexicon from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    positive: Vec<String>,
    negative: Vec<String>,
    #[serde(default)]
    modifiers: HashMap<String, f64>,
    #[serde(default)]
    negations: Vec<String>,
}

/// Immutable, validated word tables.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    modifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon, rejecting overlapping polarity classes and non-positive multipliers.
    /// Terms are lower-cased so they line up with tokenizer output.
    pub fn new<P, N, M, G>(
        positive: P,
        negative: N,
        modifiers: M,
        negations: G,
    ) -> Result<Self, LexiconError>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        M: IntoIterator<Item = (String, f64)>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let lower = |s: &str| s.trim().to_lowercase();

        let positive: HashSet<String> = positive.into_iter().map(|w| lower(w.as_ref())).collect();
        let negative: HashSet<String> = negative.into_iter().map(|w| lower(w.as_ref())).collect();

        let mut overlap: Vec<&String> = positive.intersection(&negative).collect();
        overlap.sort();
        if let Some(term) = overlap.first() {
            return Err(LexiconError::Overlap((*term).clone()));
        }

        let mut checked = HashMap::new();
        for (word, multiplier) in modifiers {
            if !(multiplier.is_finite() && multiplier > 0.0) {
                return Err(LexiconError::InvalidMultiplier { word, multiplier });
            }
            checked.insert(lower(&word), multiplier);
        }

        Ok(Self {
            positive,
            negative,
            modifiers: checked,
            negations: negations.into_iter().map(|w| lower(w.as_ref())).collect(),
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = serde_json::from_str(raw)?;
        Self::new(file.positive, file.negative, file.modifiers, file.negations)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Shared default Indonesian lexicon (parsed on first use).
    pub fn indonesian() -> Arc<Lexicon> {
        INDONESIAN.clone()
    }

    #[inline]
    pub fn polarity(&self, word: &str) -> Option<Polarity> {
        if self.positive.contains(word) {
            Some(Polarity::Positive)
        } else if self.negative.contains(word) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    /// Intensifier (>1) or dampener (<1) multiplier for `word`, if it is a modifier.
    #[inline]
    pub fn multiplier(&self, word: &str) -> Option<f64> {
        self.modifiers.get(word).copied()
    }

    #[inline]
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    /// (positive, negative, modifiers, negations) table sizes, for startup logs.
    pub fn sizes(&self) -> (usize, usize, usize, usize) {
        (
            self.positive.len(),
            self.negative.len(),
            self.modifiers.len(),
            self.negations.len(),
        )
    }
}
