//! Lexicon scorer: one forward pass over the tokens, accumulating positive and
//! negative mass with intensifier/dampener and negation handling.
//!
//! At most one modifier and one negation are consumed before each candidate
//! word, in that order ("sangat tidak bagus" works, "tidak sangat bagus" does not
//! carry the negation). Stacked modifiers are not supported.

use std::sync::Arc;

use super::lexicon::{Lexicon, Polarity};
use super::tokenize::tokenize;
use crate::sentiment::{
    round_to, Category, Distribution, MethodTag, SentimentResult, WordCounts, LEXICON_THRESHOLD,
};

/// Accumulated sentiment mass for a token sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Masses {
    pub positive: f64,
    pub negative: f64,
}

impl Masses {
    pub fn total(&self) -> f64 {
        self.positive + self.negative
    }
}

#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new(Lexicon::indonesian())
    }
}

impl LexiconAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn masses<S: AsRef<str>>(&self, tokens: &[S]) -> Masses {
        let mut masses = Masses::default();
        let mut i = 0;

        while i < tokens.len() {
            let mut token = tokens[i].as_ref();

            let mut multiplier = 1.0;
            if let Some(m) = self.lexicon.multiplier(token) {
                multiplier = m;
                i += 1;
                match tokens.get(i) {
                    Some(next) => token = next.as_ref(),
                    None => break,
                }
            }

            let mut negated = false;
            if self.lexicon.is_negation(token) {
                negated = true;
                i += 1;
                match tokens.get(i) {
                    Some(next) => token = next.as_ref(),
                    None => break,
                }
            }

            let weight = 1.0 * multiplier;
            match (self.lexicon.polarity(token), negated) {
                (Some(Polarity::Positive), false) | (Some(Polarity::Negative), true) => {
                    masses.positive += weight
                }
                (Some(Polarity::Positive), true) | (Some(Polarity::Negative), false) => {
                    masses.negative += weight
                }
                (None, _) => {}
            }

            i += 1;
        }

        masses
    }

    /// Score raw text. Blank text and text without sentiment words are neutral (0.0).
    pub fn analyze(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::neutral(MethodTag::Lexicon);
        }
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentResult::neutral(MethodTag::Lexicon);
        }
        result_from_masses(self.masses(&tokens))
    }
}

/// Normalize masses into a compound score, category and distribution.
pub fn result_from_masses(masses: Masses) -> SentimentResult {
    let total = masses.total();
    if total == 0.0 {
        return SentimentResult::neutral(MethodTag::Lexicon);
    }

    let pos_pct = masses.positive / total;
    let neg_pct = masses.negative / total;
    let compound = (masses.positive - masses.negative) / total;

    let neutral = if pos_pct + neg_pct < 1.0 {
        round_to(1.0 - pos_pct - neg_pct, 4)
    } else {
        0.0
    };

    SentimentResult {
        category: Category::from_score(compound, LEXICON_THRESHOLD),
        score: round_to(compound, 4),
        details: Distribution {
            positive: round_to(pos_pct, 4),
            neutral,
            negative: round_to(neg_pct, 4),
        },
        method: MethodTag::Lexicon,
        word_counts: Some(WordCounts {
            positive_words: masses.positive as u64,
            negative_words: masses.negative as u64,
        }),
        ..SentimentResult::neutral(MethodTag::Lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        tokenize(s)
    }

    #[test]
    fn intensifier_scales_following_word() {
        let a = LexiconAnalyzer::default();
        let m = a.masses(&toks("sangat bagus"));
        assert_eq!(m, Masses { positive: 1.5, negative: 0.0 });
    }

    #[test]
    fn dampener_reduces_following_word() {
        let a = LexiconAnalyzer::default();
        let m = a.masses(&toks("agak buruk"));
        assert_eq!(m, Masses { positive: 0.0, negative: 0.5 });
    }

    #[test]
    fn modifier_then_negation_chain() {
        let a = LexiconAnalyzer::default();
        // "sangat" consumed, then "tidak" negates "bagus" with the 1.5 multiplier.
        let m = a.masses(&toks("sangat tidak bagus"));
        assert_eq!(m, Masses { positive: 0.0, negative: 1.5 });
    }

    #[test]
    fn negation_before_modifier_is_not_carried() {
        let a = LexiconAnalyzer::default();
        // "tidak" takes "sangat" as its candidate (no polarity); "bagus" is then plain positive.
        let m = a.masses(&toks("tidak sangat bagus"));
        assert_eq!(m, Masses { positive: 1.0, negative: 0.0 });
    }

    #[test]
    fn negated_negative_counts_as_positive() {
        let a = LexiconAnalyzer::default();
        let m = a.masses(&toks("tidak buruk"));
        assert_eq!(m, Masses { positive: 1.0, negative: 0.0 });
    }

    #[test]
    fn trailing_modifier_or_negation_stops_scan() {
        let a = LexiconAnalyzer::default();
        assert_eq!(a.masses(&toks("bagus sekali")).positive, 1.0);
        assert_eq!(a.masses(&toks("bagus tidak")).positive, 1.0);
        assert_eq!(a.masses(&toks("sangat")), Masses::default());
    }

    #[test]
    fn mixed_text_result_shape() {
        let a = LexiconAnalyzer::default();
        // positive 1.0 (bagus), negative 1.0 (mahal) → compound 0, neutral category.
        let r = a.analyze("Bagus tapi mahal");
        assert_eq!(r.category, Category::Neutral);
        assert_eq!(r.score, 0.0);
        assert_eq!(r.details.positive, 0.5);
        assert_eq!(r.details.negative, 0.5);
        assert_eq!(r.details.neutral, 0.0);
        let wc = r.word_counts.expect("word counts");
        assert_eq!((wc.positive_words, wc.negative_words), (1, 1));
    }

    #[test]
    fn word_counts_truncate_mass() {
        let a = LexiconAnalyzer::default();
        let r = a.analyze("sangat bagus dan agak buruk");
        let wc = r.word_counts.expect("word counts");
        assert_eq!((wc.positive_words, wc.negative_words), (1, 0));
        // (1.5 - 0.5) / 2.0
        assert_eq!(r.score, 0.5);
        assert_eq!(r.category, Category::Positive);
    }
}
