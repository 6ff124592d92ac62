//! Financial normalization and profitability projection.
//!
//! Raw statement -> [`MetricsExtractor`] (per adjacent quarter pair) ->
//! [`TrendAggregator`] (window average) -> [`ProfitabilityProjector`]
//! (compounding-growth break-even search).

pub mod aggregator;
pub mod extractor;
pub mod projector;

pub use aggregator::TrendAggregator;
pub use extractor::{MetricsExtractor, TRAILING_WINDOW};
pub use projector::{ProfitabilityProjector, HORIZON_QUARTERS};
