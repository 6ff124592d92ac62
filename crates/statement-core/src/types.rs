use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One reporting period's full set of line-item values, keyed by the
/// vendor's line-item name, in raw currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarterColumn {
    pub period_end: NaiveDate,
    pub line_items: HashMap<String, f64>,
}

impl QuarterColumn {
    pub fn new(period_end: NaiveDate) -> Self {
        Self {
            period_end,
            line_items: HashMap::new(),
        }
    }
}

/// Quarterly income statement as delivered by the data provider:
/// ordered quarter columns, newest first. Read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStatement {
    pub symbol: String,
    pub quarters: Vec<QuarterColumn>,
}

impl RawStatement {
    pub fn quarter_count(&self) -> usize {
        self.quarters.len()
    }

    /// Raw value of a line item in the given quarter (0 = newest).
    pub fn line_item(&self, quarter: usize, name: &str) -> Option<f64> {
        self.quarters
            .get(quarter)?
            .line_items
            .get(name)
            .copied()
    }

    /// Resolve a line item by trying each alias in order; the first name
    /// present in the quarter wins.
    pub fn resolve(&self, quarter: usize, aliases: &[&str]) -> Option<f64> {
        aliases
            .iter()
            .find_map(|name| self.line_item(quarter, name))
    }
}

/// Normalized metrics for one quarter, derived by comparing it to the
/// immediately preceding quarter. Monetary fields are in millions,
/// rounded to 1 decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyMetric {
    pub revenue_m: f64,
    pub gross_margin_pct: f64,
    pub op_expenses_m: f64,
    pub revenue_growth_pct: f64,
    pub expense_growth_pct: f64,
}

/// Same shape as [`QuarterlyMetric`], but each field is the arithmetic
/// mean over the trailing window. This is the projection input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetric {
    pub revenue_m: f64,
    pub gross_margin_pct: f64,
    pub op_expenses_m: f64,
    pub revenue_growth_pct: f64,
    pub expense_growth_pct: f64,
}

pub const NOT_PROFITABLE_SENTINEL: &str =
    "Not projected to be profitable within 10 years";
pub const NOT_APPLICABLE_SENTINEL: &str = "N/A";

/// Quarters until break-even. Serializes as a plain number, or as a
/// sentinel string in the same field, so callers see a tagged union of
/// {number, string}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuartersToBreakEven {
    Quarters(u32),
    /// Projection not applicable (no usable expense base).
    NotApplicable,
    /// No quarter within the search horizon was profitable.
    BeyondHorizon,
}

impl Serialize for QuartersToBreakEven {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QuartersToBreakEven::Quarters(q) => serializer.serialize_u32(*q),
            QuartersToBreakEven::NotApplicable => {
                serializer.serialize_str(NOT_APPLICABLE_SENTINEL)
            }
            QuartersToBreakEven::BeyondHorizon => {
                serializer.serialize_str(NOT_PROFITABLE_SENTINEL)
            }
        }
    }
}

/// Years until break-even, rounded to 1 decimal, or "N/A".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YearsToBreakEven {
    Years(f64),
    NotApplicable,
}

impl Serialize for YearsToBreakEven {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            YearsToBreakEven::Years(y) => serializer.serialize_f64(*y),
            YearsToBreakEven::NotApplicable => {
                serializer.serialize_str(NOT_APPLICABLE_SENTINEL)
            }
        }
    }
}

/// Outcome of the compounding-growth break-even search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub quarters_to_break_even: QuartersToBreakEven,
    pub years_to_break_even: YearsToBreakEven,
    pub projected_revenue_m: f64,
    pub projected_gross_profit_m: f64,
    pub projected_expenses_m: f64,
    pub projected_profit_m: f64,
}

/// A news headline as delivered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsHeadline {
    pub title: String,
    pub published: DateTime<Utc>,
}

/// A single lexicon term (or wire label) and its signed weight toward a
/// headline's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub term: String,
    pub weight: f64,
}

/// Score for one headline in [-1, 1], with the terms that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineScore {
    pub sentiment: f64,
    pub contributions: Vec<Contribution>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentCategory {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Negative")]
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
}

impl SentimentCategory {
    /// Categorize an average sentiment score in [-1, 1].
    pub fn from_score(score: f64) -> Self {
        if score >= 0.5 {
            SentimentCategory::VeryPositive
        } else if score >= 0.1 {
            SentimentCategory::Positive
        } else if score <= -0.5 {
            SentimentCategory::VeryNegative
        } else if score <= -0.1 {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }
}

/// One scored headline in the response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredHeadline {
    pub title: String,
    /// Publication date, YYYY-MM-DD.
    pub date: String,
    pub sentiment: f64,
    pub contributions: Vec<Contribution>,
}

/// Aggregated headline sentiment, merged into the response envelope but
/// never consumed by the projection engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    pub average_sentiment: f64,
    pub sentiment_category: SentimentCategory,
    pub news_count: usize,
    pub recent_news: Vec<ScoredHeadline>,
}

impl SentimentSummary {
    /// Neutral summary for symbols with no (usable) news.
    pub fn empty() -> Self {
        Self {
            average_sentiment: 0.0,
            sentiment_category: SentimentCategory::Neutral,
            news_count: 0,
            recent_news: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn break_even_serializes_as_number_or_sentinel() {
        assert_eq!(
            serde_json::to_value(QuartersToBreakEven::Quarters(3)).unwrap(),
            json!(3)
        );
        assert_eq!(
            serde_json::to_value(QuartersToBreakEven::NotApplicable).unwrap(),
            json!("N/A")
        );
        assert_eq!(
            serde_json::to_value(QuartersToBreakEven::BeyondHorizon).unwrap(),
            json!("Not projected to be profitable within 10 years")
        );
        assert_eq!(
            serde_json::to_value(YearsToBreakEven::Years(0.8)).unwrap(),
            json!(0.8)
        );
    }

    #[test]
    fn metric_fields_use_contract_names() {
        let metric = QuarterlyMetric {
            revenue_m: 500.0,
            gross_margin_pct: 40.0,
            op_expenses_m: 60.0,
            revenue_growth_pct: 25.0,
            expense_growth_pct: 0.0,
        };
        let value = serde_json::to_value(metric).unwrap();
        assert_eq!(value["revenueM"], json!(500.0));
        assert_eq!(value["opExpensesM"], json!(60.0));
        assert_eq!(value["grossMarginPct"], json!(40.0));
    }

    #[test]
    fn alias_resolution_is_ordered() {
        let mut column = QuarterColumn::new(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
        column.line_items.insert("Revenue".to_string(), 5e8);
        let stmt = RawStatement {
            symbol: "TEST".to_string(),
            quarters: vec![column],
        };
        assert_eq!(stmt.resolve(0, &["Total Revenue", "Revenue"]), Some(5e8));
        assert_eq!(stmt.resolve(0, &["Total Revenue"]), None);
    }

    #[test]
    fn sentiment_category_thresholds() {
        assert_eq!(SentimentCategory::from_score(0.6), SentimentCategory::VeryPositive);
        assert_eq!(SentimentCategory::from_score(0.2), SentimentCategory::Positive);
        assert_eq!(SentimentCategory::from_score(0.0), SentimentCategory::Neutral);
        assert_eq!(SentimentCategory::from_score(-0.2), SentimentCategory::Negative);
        assert_eq!(SentimentCategory::from_score(-0.7), SentimentCategory::VeryNegative);
    }
}
