use async_trait::async_trait;

use crate::{EngineResult, HeadlineScore, NewsHeadline, RawStatement};

/// Trait for statement/news retrieval collaborators. The engine treats
/// the returned statement as an opaque, already-fetched column structure
/// and performs no I/O itself.
#[async_trait]
pub trait StatementProvider: Send + Sync {
    async fn fetch_quarterly_statement(&self, symbol: &str) -> EngineResult<RawStatement>;

    async fn fetch_news(&self, symbol: &str, limit: u32) -> EngineResult<Vec<NewsHeadline>>;
}

/// Trait for headline sentiment strategies (lexicon, remote inference).
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn score_headline(&self, headline: &str) -> EngineResult<HeadlineScore>;
}
