//! # Batch statistics
//! Folds per-text results into counts, percentages, an average score and an
//! overall, corpus-level conclusion.
//!
//! The conclusion uses its own, coarser threshold (average > 0.2 / < -0.2),
//! separate from the per-text categorization thresholds.

use serde::{Deserialize, Serialize};

use crate::sentiment::{round_to, Category, SentimentResult};

/// Average-score threshold for a positive/negative corpus conclusion (exclusive).
pub const CONCLUSION_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallSentiment {
    Positive,
    Neutral,
    Negative,
}

impl OverallSentiment {
    pub fn from_average(average: f64) -> Self {
        if average > CONCLUSION_THRESHOLD {
            OverallSentiment::Positive
        } else if average < -CONCLUSION_THRESHOLD {
            OverallSentiment::Negative
        } else {
            OverallSentiment::Neutral
        }
    }

    /// Conclusion sentence about an account's posting tendency.
    pub fn conclusion(&self, username: &str) -> String {
        let tone = match self {
            OverallSentiment::Positive => "positif",
            OverallSentiment::Negative => "negatif",
            OverallSentiment::Neutral => "netral/seimbang",
        };
        format!("Account @{username} cenderung posting tweets dengan sentimen {tone}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Percentages rounded to 2 decimals.
    pub positive_percentage: f64,
    pub neutral_percentage: f64,
    pub negative_percentage: f64,
    /// Mean compound score rounded to 4 decimals.
    pub average_score: f64,
    /// Derived from the unrounded average.
    pub overall_sentiment: OverallSentiment,
}

impl BatchStatistics {
    pub fn empty() -> Self {
        Self {
            total: 0,
            positive: 0,
            neutral: 0,
            negative: 0,
            positive_percentage: 0.0,
            neutral_percentage: 0.0,
            negative_percentage: 0.0,
            average_score: 0.0,
            overall_sentiment: OverallSentiment::Neutral,
        }
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Positive => self.positive,
            Category::Neutral => self.neutral,
            Category::Negative => self.negative,
        }
    }

    pub fn conclusion(&self, username: &str) -> String {
        self.overall_sentiment.conclusion(username)
    }
}

/// Share of `count` in `total`, as a percentage (0.0 for an empty total).
pub fn percentage(count: usize, total: usize, decimals: i32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, decimals)
}

pub fn compute(results: &[SentimentResult]) -> BatchStatistics {
    if results.is_empty() {
        return BatchStatistics::empty();
    }

    let total = results.len();
    let (mut positive, mut neutral, mut negative) = (0usize, 0usize, 0usize);
    let mut sum = 0.0f64;
    for r in results {
        match r.category {
            Category::Positive => positive += 1,
            Category::Neutral => neutral += 1,
            Category::Negative => negative += 1,
        }
        sum += r.score;
    }
    let average = sum / total as f64;

    BatchStatistics {
        total,
        positive,
        neutral,
        negative,
        positive_percentage: percentage(positive, total, 2),
        neutral_percentage: percentage(neutral, total, 2),
        negative_percentage: percentage(negative, total, 2),
        average_score: round_to(average, 4),
        overall_sentiment: OverallSentiment::from_average(average),
    }
}
