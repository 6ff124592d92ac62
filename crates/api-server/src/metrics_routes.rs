//! Metrics API Route
//!
//! One read endpoint: normalized financial trend, profitability
//! projection, and headline sentiment for a ticker symbol.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use projection_engine::{MetricsExtractor, ProfitabilityProjector, TrendAggregator};
use serde::Serialize;
use statement_core::{AggregatedMetric, ProjectionResult, SentimentSummary};

use crate::{AppError, AppState};

/// Combined response envelope. Sentiment is an independent collaborator
/// merged in here; the projection fields never depend on it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub input_metrics: AggregatedMetric,
    pub profitability: ProjectionResult,
    pub sentiment: SentimentSummary,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/metrics/:ticker", get(get_metrics))
}

async fn get_metrics(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<MetricsResponse>, AppError> {
    let symbol = ticker.trim().to_uppercase();

    let statement = state.provider.fetch_quarterly_statement(&symbol).await?;
    let metrics = MetricsExtractor::default().extract(&statement)?;
    let input_metrics = TrendAggregator::aggregate(&metrics);
    let profitability = ProfitabilityProjector::project(&input_metrics);

    // A news outage should not mask a valid projection; sentiment
    // degrades to the neutral empty summary instead.
    let sentiment = match state.provider.fetch_news(&symbol, state.news_limit).await {
        Ok(news) => state.analyzer.analyze_news(&symbol, None, &news).await,
        Err(e) => {
            tracing::warn!(%symbol, error = %e, "news fetch failed, sentiment degraded");
            SentimentSummary::empty()
        }
    };

    Ok(Json(MetricsResponse {
        input_metrics,
        profitability,
        sentiment,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{NaiveDate, TimeZone, Utc};
    use sentiment_scoring::{LexiconScorer, SentimentAnalyzer};
    use statement_core::{
        EngineError, EngineResult, NewsHeadline, QuarterColumn, RawStatement, StatementProvider,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FixtureProvider {
        quarters: usize,
        news_fails: bool,
    }

    #[async_trait]
    impl StatementProvider for FixtureProvider {
        async fn fetch_quarterly_statement(&self, symbol: &str) -> EngineResult<RawStatement> {
            if symbol == "NOPE" {
                return Err(EngineError::DataUnavailable {
                    symbol: symbol.to_string(),
                });
            }
            let quarters = (0..self.quarters)
                .map(|i| {
                    let mut column =
                        QuarterColumn::new(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
                    let revenue = 500e6 - 40e6 * i as f64;
                    column.line_items.insert("Total Revenue".into(), revenue);
                    column
                        .line_items
                        .insert("Gross Profit".into(), revenue * 0.5);
                    column
                        .line_items
                        .insert("Research Development".into(), 20e6);
                    column
                        .line_items
                        .insert("Selling General Administrative".into(), 40e6);
                    column
                })
                .collect();
            Ok(RawStatement {
                symbol: symbol.to_string(),
                quarters,
            })
        }

        async fn fetch_news(&self, _symbol: &str, _limit: u32) -> EngineResult<Vec<NewsHeadline>> {
            if self.news_fails {
                return Err(EngineError::Provider("search endpoint down".into()));
            }
            Ok(vec![NewsHeadline {
                title: "ACME shares surge to record high".into(),
                published: Utc.with_ymd_and_hms(2024, 11, 5, 12, 0, 0).unwrap(),
            }])
        }
    }

    fn app(quarters: usize, news_fails: bool) -> axum::Router {
        build_router(crate::AppState {
            provider: Arc::new(FixtureProvider {
                quarters,
                news_fails,
            }),
            analyzer: Arc::new(SentimentAnalyzer::new(Arc::new(LexiconScorer::new()))),
            news_limit: 25,
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn combined_envelope_round_trip() {
        let response = app(4, false)
            .oneshot(
                Request::builder()
                    .uri("/api/metrics/acme")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        assert!(json["inputMetrics"]["revenueM"].is_number());
        assert!(json["inputMetrics"]["opExpensesM"].is_number());
        // Margin 50%, expenses 60M on ~460M revenue: profitable now.
        assert_eq!(json["profitability"]["quartersToBreakEven"], 0);
        assert!(json["profitability"]["projectedProfitM"].as_f64().unwrap() > 0.0);
        assert_eq!(json["sentiment"]["newsCount"], 1);
        assert!(json["sentiment"]["averageSentiment"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn short_history_is_a_plain_text_400() {
        let response = app(3, false)
            .oneshot(
                Request::builder()
                    .uri("/api/metrics/acme")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let message = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(message.contains("insufficient quarterly history"));
    }

    #[tokio::test]
    async fn unknown_symbol_is_a_400() {
        let response = app(4, false)
            .oneshot(
                Request::builder()
                    .uri("/api/metrics/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn news_outage_degrades_sentiment_only() {
        let response = app(4, true)
            .oneshot(
                Request::builder()
                    .uri("/api/metrics/acme")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["sentiment"]["newsCount"], 0);
        assert_eq!(json["sentiment"]["sentimentCategory"], "Neutral");
        assert!(json["profitability"]["projectedRevenueM"].is_number());
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app(4, false)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
