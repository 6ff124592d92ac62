use statement_core::numeric::round1;
use statement_core::{AggregatedMetric, QuarterlyMetric};

/// Reduces a trailing window of per-quarter metrics into one aggregated
/// metric: the unweighted arithmetic mean of each field, rounded to 1
/// decimal. A multi-quarter average damps single-quarter volatility
/// while the growth fields still carry directional trend.
pub struct TrendAggregator;

impl TrendAggregator {
    pub fn aggregate(metrics: &[QuarterlyMetric]) -> AggregatedMetric {
        if metrics.is_empty() {
            // Extractor guarantees a full window; empty input has no trend.
            return AggregatedMetric::default();
        }

        let n = metrics.len() as f64;
        let mean = |field: fn(&QuarterlyMetric) -> f64| {
            round1(metrics.iter().map(field).sum::<f64>() / n)
        };

        AggregatedMetric {
            revenue_m: mean(|m| m.revenue_m),
            gross_margin_pct: mean(|m| m.gross_margin_pct),
            op_expenses_m: mean(|m| m.op_expenses_m),
            revenue_growth_pct: mean(|m| m.revenue_growth_pct),
            expense_growth_pct: mean(|m| m.expense_growth_pct),
        }
    }
}
