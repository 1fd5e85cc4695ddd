//! Tweet text normalization and word tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

// `www.` keeps its unescaped dot: any character after "www" starts a URL run.
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www.\S+").expect("url regex"));
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("mention regex"));
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word regex"));

/// Lower-case, drop URLs and @mentions, strip `#` but keep the hashtag word.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let no_urls = URL_RE.replace_all(&lower, "");
    let no_mentions = MENTION_RE.replace_all(&no_urls, "");
    no_mentions.replace('#', "")
}

/// Maximal runs of word characters (Unicode letters, digits, underscore).
pub fn words(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// `normalize` followed by `words`.
pub fn tokenize(text: &str) -> Vec<String> {
    words(&normalize(text))
}
