//! Statement and news retrieval over the Yahoo Finance HTTP API.
//!
//! The engine treats the returned [`RawStatement`] as an opaque ordered
//! column structure; all vendor-specific field naming is mapped here,
//! into the line-item names the extractor's alias lists know about.

use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde_json::Value;
use statement_core::{
    EngineError, EngineResult, NewsHeadline, QuarterColumn, RawStatement, StatementProvider,
};
use std::time::Duration;

use async_trait::async_trait;

const BASE_URL: &str = "https://query1.finance.yahoo.com";

// Yahoo rejects requests without a browser-looking user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Vendor field -> line-item name as the extractor expects it. Absent
/// fields are omitted from the column, never zero-filled.
const LINE_ITEM_FIELDS: &[(&str, &str)] = &[
    ("totalRevenue", "Total Revenue"),
    ("costOfRevenue", "Cost Of Revenue"),
    ("grossProfit", "Gross Profit"),
    ("researchDevelopment", "Research Development"),
    ("sellingGeneralAdministrative", "Selling General Administrative"),
    ("totalOperatingExpenses", "Operating Expense"),
];

#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> EngineResult<Value> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| EngineError::Provider(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            // Yahoo answers unknown symbols with a 404 error envelope.
            return response
                .json()
                .await
                .map_err(|e| EngineError::Provider(e.to_string()));
        }
        if !status.is_success() {
            return Err(EngineError::Provider(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| EngineError::Provider(e.to_string()))
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatementProvider for YahooClient {
    async fn fetch_quarterly_statement(&self, symbol: &str) -> EngineResult<RawStatement> {
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol);
        let body = self
            .get_json(&url, &[("modules", "incomeStatementHistoryQuarterly")])
            .await?;
        statement_from_response(symbol, &body)
    }

    async fn fetch_news(&self, symbol: &str, limit: u32) -> EngineResult<Vec<NewsHeadline>> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let count = limit.to_string();
        let body = self
            .get_json(
                &url,
                &[("q", symbol), ("newsCount", &count), ("quotesCount", "0")],
            )
            .await?;
        Ok(news_from_response(&body))
    }
}

/// Map a quoteSummary response body into ordered quarter columns
/// (Yahoo reports newest first, which is the order the engine expects).
fn statement_from_response(symbol: &str, body: &Value) -> EngineResult<RawStatement> {
    let summary = &body["quoteSummary"];

    if !summary["error"].is_null() {
        tracing::debug!(symbol, error = %summary["error"], "quoteSummary error envelope");
        return Err(EngineError::DataUnavailable {
            symbol: symbol.to_string(),
        });
    }

    let statements = summary["result"][0]["incomeStatementHistoryQuarterly"]
        ["incomeStatementHistory"]
        .as_array();

    let quarters: Vec<QuarterColumn> = statements
        .map(|entries| entries.iter().filter_map(column_from_statement).collect())
        .unwrap_or_default();

    if quarters.is_empty() {
        return Err(EngineError::DataUnavailable {
            symbol: symbol.to_string(),
        });
    }

    Ok(RawStatement {
        symbol: symbol.to_string(),
        quarters,
    })
}

fn column_from_statement(entry: &Value) -> Option<QuarterColumn> {
    let period_end = entry["endDate"]["raw"]
        .as_i64()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.date_naive())
        .or_else(|| {
            entry["endDate"]["fmt"]
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        })?;

    let mut column = QuarterColumn::new(period_end);
    for &(vendor_field, line_item) in LINE_ITEM_FIELDS {
        if let Some(raw) = entry[vendor_field]["raw"].as_f64() {
            column.line_items.insert(line_item.to_string(), raw);
        }
    }
    Some(column)
}

fn news_from_response(body: &Value) -> Vec<NewsHeadline> {
    body["news"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let title = item["title"].as_str()?.to_string();
                    let published = item["providerPublishTime"]
                        .as_i64()
                        .and_then(|ts| DateTime::from_timestamp(ts, 0))?;
                    Some(NewsHeadline { title, published })
                })
                .collect()
        })
        .unwrap_or_default()
}
