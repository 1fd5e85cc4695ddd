//! Account-level report over tweets fetched by an external scraper.
//!
//! Each tweet is analyzed in order; the report carries per-category counts and
//! percentages, the average score, the overall sentiment and a conclusion line.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyze::Language;
use crate::sentiment::{round_to, Category, Distribution, SentimentAnalyzer};
use crate::stats::{self, OverallSentiment};

/// A tweet as delivered by the acquisition service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub tweet_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub retweets_count: u64,
    #[serde(default)]
    pub replies_count: u64,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("Username is required")]
    MissingUsername,
    #[error("No tweets found for @{0}")]
    NoTweets(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetSentiment {
    pub tweet_id: Option<String>,
    pub text: String,
    pub created_at: Option<String>,
    pub likes_count: u64,
    pub retweets_count: u64,
    pub replies_count: u64,
    pub url: String,
    pub sentiment: Category,
    /// Rounded to 3 decimals.
    pub score: f64,
    pub language: Option<Language>,
    /// Each component rounded to 3 decimals.
    pub details: Distribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: CategoryShare,
    pub neutral: CategoryShare,
    pub negative: CategoryShare,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountReport {
    pub username: String,
    pub analyzed_at: String,
    pub total_tweets: usize,
    pub sentiment_distribution: SentimentDistribution,
    /// Rounded to 3 decimals.
    pub average_score: f64,
    pub overall_sentiment: OverallSentiment,
    pub conclusion: String,
    pub tweets: Vec<TweetSentiment>,
}

/// Trim and drop every `@` from a user-supplied handle.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().replace('@', "")
}

pub async fn analyze_account(
    analyzer: &SentimentAnalyzer,
    username: &str,
    tweets: &[Tweet],
) -> Result<AccountReport, ReportError> {
    let username = normalize_username(username);
    if username.is_empty() {
        return Err(ReportError::MissingUsername);
    }
    if tweets.is_empty() {
        return Err(ReportError::NoTweets(username));
    }

    let texts: Vec<&str> = tweets.iter().map(|t| t.text.as_str()).collect();
    let results = analyzer.batch_analyze(&texts).await;
    let summary = stats::compute(&results);

    let rows = tweets
        .iter()
        .zip(results.iter())
        .map(|(t, r)| TweetSentiment {
            tweet_id: t.tweet_id.clone(),
            text: t.text.clone(),
            created_at: t.created_at.clone(),
            likes_count: t.likes_count,
            retweets_count: t.retweets_count,
            replies_count: t.replies_count,
            url: t.url.clone(),
            sentiment: r.category,
            score: round_to(r.score, 3),
            language: r.language,
            details: Distribution {
                positive: round_to(r.details.positive, 3),
                neutral: round_to(r.details.neutral, 3),
                negative: round_to(r.details.negative, 3),
            },
        })
        .collect::<Vec<_>>();

    let total = summary.total;
    let share = |count: usize| CategoryShare {
        count,
        percentage: stats::percentage(count, total, 2),
    };
    let average = results.iter().map(|r| r.score).sum::<f64>() / total as f64;

    info!(target: "sentiment", tweets = total, overall = ?summary.overall_sentiment, "account analyzed");

    Ok(AccountReport {
        conclusion: summary.conclusion(&username),
        username,
        analyzed_at: Utc::now().to_rfc3339(),
        total_tweets: total,
        sentiment_distribution: SentimentDistribution {
            positive: share(summary.positive),
            neutral: share(summary.neutral),
            negative: share(summary.negative),
        },
        average_score: round_to(average, 3),
        overall_sentiment: summary.overall_sentiment,
        tweets: rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tweet(id: &str, text: &str) -> Tweet {
        Tweet {
            tweet_id: Some(id.to_string()),
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn username_is_trimmed_and_unprefixed() {
        assert_eq!(normalize_username("  @valemis "), "valemis");
        assert_eq!(normalize_username("@"), "");
    }

    #[tokio::test]
    async fn missing_username_and_empty_timeline_are_errors() {
        let a = SentimentAnalyzer::default();
        let err = analyze_account(&a, " @ ", &[tweet("1", "bagus")])
            .await
            .unwrap_err();
        assert_eq!(err, ReportError::MissingUsername);

        let err = analyze_account(&a, "valemis", &[]).await.unwrap_err();
        assert_eq!(err, ReportError::NoTweets("valemis".into()));
        assert_eq!(err.to_string(), "No tweets found for @valemis");
    }

    #[tokio::test]
    async fn report_keeps_tweet_order_and_concludes() {
        let a = SentimentAnalyzer::default();
        let tweets = [
            tweet("1", "Kinerja perusahaan sangat bagus"),
            tweet("2", "Lowongan kerja baru dibuka, mantap!"),
            tweet("3", "biasa saja"),
        ];
        let report = analyze_account(&a, "@valemis", &tweets).await.unwrap();

        assert_eq!(report.username, "valemis");
        assert_eq!(report.total_tweets, 3);
        let ids: Vec<_> = report
            .tweets
            .iter()
            .map(|t| t.tweet_id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        let d = &report.sentiment_distribution;
        assert_eq!(d.positive.count + d.neutral.count + d.negative.count, 3);
        assert_eq!(report.overall_sentiment, OverallSentiment::Positive);
        assert_eq!(
            report.conclusion,
            "Account @valemis cenderung posting tweets dengan sentimen positif"
        );
    }
}
