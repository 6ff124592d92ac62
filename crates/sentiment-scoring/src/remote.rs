use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use statement_core::numeric::round3;
use statement_core::{Contribution, EngineError, EngineResult, HeadlineScore, SentimentScorer};

use crate::cache::ScoreCache;

#[derive(Debug, Serialize)]
struct PredictRequest {
    texts: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<Prediction>,
}

/// Remote inference-API strategy. Scores come from a hosted model's
/// `/predict` endpoint; single-headline scores are memoized in a bounded
/// cache since the remote call is the expensive path.
pub struct RemoteScorer {
    client: reqwest::Client,
    base_url: String,
    cache: ScoreCache,
}

impl RemoteScorer {
    pub fn new(base_url: String, timeout: Duration, cache_capacity: usize) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url,
            cache: ScoreCache::new(cache_capacity),
        }
    }

    async fn predict(&self, headline: &str) -> EngineResult<HeadlineScore> {
        let request = PredictRequest {
            texts: vec![headline.to_string()],
        };

        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EngineError::Provider(format!(
                "sentiment service returned HTTP {}",
                response.status()
            )));
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Provider(e.to_string()))?;

        let prediction = parsed.predictions.into_iter().next().ok_or_else(|| {
            EngineError::Provider("sentiment service returned no predictions".to_string())
        })?;

        let sign = match prediction.label.as_str() {
            "positive" => 1.0,
            "negative" => -1.0,
            _ => 0.0,
        };
        let sentiment = round3((prediction.score * sign).clamp(-1.0, 1.0));

        Ok(HeadlineScore {
            sentiment,
            contributions: vec![Contribution {
                term: prediction.label,
                weight: sentiment,
            }],
        })
    }
}

#[async_trait]
impl SentimentScorer for RemoteScorer {
    async fn score_headline(&self, headline: &str) -> EngineResult<HeadlineScore> {
        if let Some(hit) = self.cache.get(headline) {
            return Ok(hit);
        }
        let score = self.predict(headline).await?;
        self.cache.insert(headline, score.clone());
        Ok(score)
    }
}
