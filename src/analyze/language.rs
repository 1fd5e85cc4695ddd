//! Indonesian-vs-other language heuristic.
//!
//! Deliberately high-recall for Indonesian: a single indicator word or a single
//! Indonesian-looking prefixed word routes the whole text to the lexicon path.
//! The prefix scan runs over the whole lower-cased string, not per token.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use super::tokenize::words;

/// Share of indicator tokens above which text counts as Indonesian.
pub const INDICATOR_RATIO: f64 = 0.05;

static INDICATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // particles & conjunctions
        "yang", "adalah", "dengan", "untuk", "tidak", "ini", "itu", "dari", "di", "ke", "pada",
        "atau", "dan", "juga", "akan", "telah", "sudah", "belum", "sangat", "banget", "sekali",
        "saja", "hanya", "bisa", "dapat", "harus", "mau", "ingin",
        // company / location vocabulary
        "indonesia", "perusahaan", "karyawan", "lapangan", "kerja",
        // verbs
        "membuka", "menurun", "meningkat", "berkembang",
        // time markers
        "hari", "bulan", "tahun", "minggu",
        // common words
        "baru", "lama", "banyak", "sedikit", "besar", "kecil", "baik", "buruk", "bagus", "jelek",
        "rugi", "untung", "naik", "turun", "bubar", "tutup", "buka",
        // domain terms
        "kinerja", "harga", "saham", "phk", "cuaca", "cerah",
    ]
    .into_iter()
    .collect()
});

static PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(me|ber|pe|ter|ke|se)[a-z]{3,}\b").expect("prefix regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Indonesian.
    Id,
    /// Everything else (default bucket).
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Id => "id",
            Language::En => "en",
        }
    }
}

/// Whether to detect the language per text or force one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    #[default]
    Auto,
    Id,
    En,
}

impl LanguageMode {
    pub fn resolve(&self, text: &str) -> Language {
        match self {
            LanguageMode::Auto => detect_language(text),
            LanguageMode::Id => Language::Id,
            LanguageMode::En => Language::En,
        }
    }
}

impl FromStr for LanguageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(LanguageMode::Auto),
            "id" => Ok(LanguageMode::Id),
            "en" => Ok(LanguageMode::En),
            other => anyhow::bail!("unsupported language mode: {other}"),
        }
    }
}

/// Classify `text` as Indonesian (`Id`) or not (`En`).
pub fn detect_language(text: &str) -> Language {
    let lower = text.to_lowercase();
    let tokens = words(&lower);
    if tokens.is_empty() {
        return Language::En;
    }

    let id_count = tokens
        .iter()
        .filter(|t| INDICATORS.contains(t.as_str()))
        .count();
    let prefix_matches = PREFIX_RE.find_iter(&lower).count();

    let ratio = id_count as f64 / tokens.len() as f64;
    if ratio > INDICATOR_RATIO || id_count >= 1 || prefix_matches >= 1 {
        Language::Id
    } else {
        Language::En
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_words_mark_indonesian() {
        assert_eq!(detect_language("saya tidak suka"), Language::Id);
        assert_eq!(detect_language("Harga SAHAM naik"), Language::Id);
    }

    #[test]
    fn plain_english_is_en() {
        assert_eq!(detect_language("I love this"), Language::En);
        assert_eq!(detect_language("What a great day"), Language::En);
    }

    #[test]
    fn single_prefixed_word_is_enough() {
        // "berjalan" matches ber + 5 letters; no indicator words present.
        assert_eq!(detect_language("great berjalan"), Language::Id);
        // English words trip the prefix scan too ("terrible" = ter + rible).
        assert_eq!(detect_language("terrible service"), Language::Id);
    }

    #[test]
    fn blank_or_symbol_only_defaults_to_en() {
        assert_eq!(detect_language(""), Language::En);
        assert_eq!(detect_language("!!! ???"), Language::En);
    }

    #[test]
    fn forced_modes_skip_detection() {
        assert_eq!(LanguageMode::Id.resolve("I love this"), Language::Id);
        assert_eq!(LanguageMode::En.resolve("saya tidak suka"), Language::En);
        assert_eq!(LanguageMode::Auto.resolve("saya tidak suka"), Language::Id);
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("AUTO".parse::<LanguageMode>().unwrap(), LanguageMode::Auto);
        assert_eq!(" id ".parse::<LanguageMode>().unwrap(), LanguageMode::Id);
        assert!("fr".parse::<LanguageMode>().is_err());
    }
}
