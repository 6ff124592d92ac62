//! Headline sentiment collaborator.
//!
//! One [`SentimentScorer`] capability with swappable strategies (hand
//! built lexicon, remote inference API) selected by configuration, plus
//! the batch analyzer that filters headlines for relevance and produces
//! the summary merged into the response envelope. The projection engine
//! never reads any of this.

use std::sync::Arc;
use std::time::Duration;

use statement_core::numeric::round3;
use statement_core::{
    NewsHeadline, ScoredHeadline, SentimentCategory, SentimentScorer, SentimentSummary,
};

pub mod cache;
pub mod lexicon;
pub mod relevance;
pub mod remote;

pub use cache::ScoreCache;
pub use lexicon::LexiconScorer;
pub use relevance::RelevanceMatcher;
pub use remote::RemoteScorer;

/// At most this many relevant headlines are scored per request.
const RECENT_NEWS_CAP: usize = 10;

const DEFAULT_REMOTE_URL: &str = "http://localhost:8003";
const DEFAULT_CACHE_CAPACITY: usize = 256;
const REMOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the configured scorer strategy. `SENTIMENT_SCORER=remote`
/// selects the inference API (`SENTIMENT_API_URL`,
/// `SENTIMENT_CACHE_CAPACITY`); anything else is the lexicon.
pub fn scorer_from_env() -> Arc<dyn SentimentScorer> {
    match std::env::var("SENTIMENT_SCORER").ok().as_deref() {
        Some("remote") => {
            let base_url = std::env::var("SENTIMENT_API_URL")
                .unwrap_or_else(|_| DEFAULT_REMOTE_URL.to_string());
            let capacity = std::env::var("SENTIMENT_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_CAPACITY);
            tracing::info!(%base_url, capacity, "using remote sentiment scorer");
            Arc::new(RemoteScorer::new(base_url, REMOTE_TIMEOUT, capacity))
        }
        _ => Arc::new(LexiconScorer::new()),
    }
}

/// Scores a batch of headlines for one symbol and aggregates them into
/// a [`SentimentSummary`].
pub struct SentimentAnalyzer {
    scorer: Arc<dyn SentimentScorer>,
}

impl SentimentAnalyzer {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    pub async fn analyze_news(
        &self,
        symbol: &str,
        company_name: Option<&str>,
        headlines: &[NewsHeadline],
    ) -> SentimentSummary {
        if headlines.is_empty() {
            return SentimentSummary::empty();
        }

        let matcher = RelevanceMatcher::new(symbol, company_name);
        let mut recent_news = Vec::new();
        let mut sentiments = Vec::new();

        for headline in headlines {
            if !matcher.is_relevant(&headline.title) {
                continue;
            }
            if recent_news.len() >= RECENT_NEWS_CAP {
                break;
            }

            let score = match self.scorer.score_headline(&headline.title).await {
                Ok(score) => score,
                Err(e) => {
                    tracing::warn!(title = %headline.title, error = %e, "headline scoring failed");
                    continue;
                }
            };

            sentiments.push(score.sentiment);
            recent_news.push(ScoredHeadline {
                title: headline.title.clone(),
                date: headline.published.format("%Y-%m-%d").to_string(),
                sentiment: score.sentiment,
                contributions: score.contributions,
            });
        }

        let average = if sentiments.is_empty() {
            0.0
        } else {
            round3(sentiments.iter().sum::<f64>() / sentiments.len() as f64)
        };

        SentimentSummary {
            average_sentiment: average,
            sentiment_category: SentimentCategory::from_score(average),
            news_count: headlines.len(),
            recent_news,
        }
    }
}
