//! HTTP boundary: one read endpoint returning the combined financial
//! trend, profitability projection, and headline sentiment for a ticker.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use sentiment_scoring::SentimentAnalyzer;
use statement_core::{EngineError, StatementProvider};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use yahoo_client::YahooClient;

pub mod metrics_routes;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_NEWS_LIMIT: u32 = 25;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub news_limit: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            news_limit: std::env::var("NEWS_FETCH_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_NEWS_LIMIT),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn StatementProvider>,
    pub analyzer: Arc<SentimentAnalyzer>,
    pub news_limit: u32,
}

/// Engine errors collapsed to a human-readable message and a client
/// error status. Only a retrieval-collaborator transport failure may
/// surface as a 5xx.
pub struct AppError(pub EngineError);

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            EngineError::Provider(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, self.0.to_string()).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(metrics_routes::routes())
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let state = AppState {
        provider: Arc::new(YahooClient::new()),
        analyzer: Arc::new(SentimentAnalyzer::new(sentiment_scoring::scorer_from_env())),
        news_limit: config.news_limit,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "api server listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
