use std::fmt;

use thiserror::Error;

/// A required income-statement field, used to report exactly which line
/// item could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementField {
    Revenue,
    OperatingExpenses,
    GrossMargin,
}

impl fmt::Display for StatementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementField::Revenue => "revenue",
            StatementField::OperatingExpenses => "operating_expenses",
            StatementField::GrossMargin => "gross_margin",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    /// A required line item could not be resolved under any known alias
    /// for one or more required quarters.
    #[error("required line item missing: {field}")]
    MissingData { field: StatementField },

    /// Fewer quarter columns than the trailing window needs.
    #[error("insufficient quarterly history: need {required} quarters, got {available}")]
    InsufficientHistory { required: usize, available: usize },

    /// The retrieval collaborator has nothing for the requested symbol.
    #[error("no financial data available for {symbol}")]
    DataUnavailable { symbol: String },

    /// Transport or decoding failure in the retrieval collaborator.
    #[error("provider request failed: {0}")]
    Provider(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
