use statement_core::numeric::{clean, growth_rate, round1};
use statement_core::{EngineError, EngineResult, QuarterlyMetric, RawStatement, StatementField};

/// Trailing window of quarter-over-quarter comparisons in the reference
/// configuration.
pub const TRAILING_WINDOW: usize = 3;

/// Raw statement values are in currency units; metrics are in millions.
const MILLIONS: f64 = 1e6;

/// Ordered alias list for the revenue line; the first name reported for
/// both quarters of a pair wins.
const REVENUE_ALIASES: &[&str] = &["Total Revenue", "Revenue"];

/// Single aggregate operating-expense line some vendors report directly.
const OPERATING_EXPENSE_AGGREGATE: &str = "Operating Expense";

/// Component lines summed when no aggregate is reported. Absent members
/// are omitted, not zero-filled.
const OPERATING_EXPENSE_COMPONENTS: &[&str] =
    &["Research Development", "Selling General Administrative"];

const GROSS_PROFIT: &str = "Gross Profit";
const COST_OF_REVENUE: &str = "Cost Of Revenue";

/// Resolves raw per-quarter statement rows into normalized per-quarter
/// metrics, handling vendor naming variance.
pub struct MetricsExtractor {
    window: usize,
}

impl MetricsExtractor {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Derive one [`QuarterlyMetric`] per adjacent quarter pair in the
    /// trailing window, newest first. Requires `window + 1` quarter
    /// columns; fewer is a hard failure, never a partial average.
    pub fn extract(&self, statement: &RawStatement) -> EngineResult<Vec<QuarterlyMetric>> {
        let required = self.window + 1;
        let available = statement.quarter_count();
        if available < required {
            return Err(EngineError::InsufficientHistory {
                required,
                available,
            });
        }

        (0..self.window)
            .map(|i| self.extract_pair(statement, i))
            .collect()
    }

    /// Compare quarter `current` to quarter `current + 1`.
    fn extract_pair(
        &self,
        statement: &RawStatement,
        current: usize,
    ) -> EngineResult<QuarterlyMetric> {
        let previous = current + 1;

        let (revenue_raw, previous_revenue_raw) =
            resolve_revenue_pair(statement, current, previous)?;
        let revenue_m = clean(revenue_raw / MILLIONS);
        let previous_revenue_m = clean(previous_revenue_raw / MILLIONS);

        let (op_expenses_m, previous_op_expenses_m) =
            resolve_operating_expenses(statement, current, previous);
        if op_expenses_m == 0.0 {
            // A true zero cannot be distinguished from missing data;
            // both are rejected.
            return Err(EngineError::MissingData {
                field: StatementField::OperatingExpenses,
            });
        }

        let gross_margin_pct = resolve_gross_margin(statement, current, revenue_raw)?;

        let revenue_growth_pct = growth_rate(revenue_m, Some(previous_revenue_m));
        let expense_growth_pct = growth_rate(op_expenses_m, Some(previous_op_expenses_m));

        Ok(QuarterlyMetric {
            revenue_m: round1(revenue_m),
            gross_margin_pct: round1(gross_margin_pct),
            op_expenses_m: round1(op_expenses_m),
            revenue_growth_pct: round1(revenue_growth_pct),
            expense_growth_pct: round1(expense_growth_pct),
        })
    }
}

impl Default for MetricsExtractor {
    fn default() -> Self {
        Self::new(TRAILING_WINDOW)
    }
}

/// First revenue alias reported for both quarters of the pair, raw values.
fn resolve_revenue_pair(
    statement: &RawStatement,
    current: usize,
    previous: usize,
) -> EngineResult<(f64, f64)> {
    for alias in REVENUE_ALIASES {
        if let (Some(cur), Some(prev)) = (
            statement.line_item(current, alias),
            statement.line_item(previous, alias),
        ) {
            return Ok((cur, prev));
        }
    }
    Err(EngineError::MissingData {
        field: StatementField::Revenue,
    })
}

/// Absolute operating expenses in millions for both quarters. Prefers
/// the aggregate line; otherwise sums whichever component lines each
/// quarter reports.
fn resolve_operating_expenses(
    statement: &RawStatement,
    current: usize,
    previous: usize,
) -> (f64, f64) {
    if statement.line_item(current, OPERATING_EXPENSE_AGGREGATE).is_some() {
        let cur = statement
            .line_item(current, OPERATING_EXPENSE_AGGREGATE)
            .map(|v| clean(v / MILLIONS).abs())
            .unwrap_or(0.0);
        let prev = statement
            .line_item(previous, OPERATING_EXPENSE_AGGREGATE)
            .map(|v| clean(v / MILLIONS).abs())
            .unwrap_or(0.0);
        return (cur, prev);
    }

    let sum_components = |quarter: usize| {
        OPERATING_EXPENSE_COMPONENTS
            .iter()
            .filter_map(|name| statement.line_item(quarter, name))
            .map(|v| clean(v / MILLIONS).abs())
            .sum::<f64>()
    };
    (sum_components(current), sum_components(previous))
}

/// Gross margin percent for the current quarter only, re-derived from
/// gross profit / revenue. Falls back to revenue minus cost of revenue
/// when no gross-profit line is reported.
fn resolve_gross_margin(
    statement: &RawStatement,
    current: usize,
    revenue_raw: f64,
) -> EngineResult<f64> {
    let gross_profit = match statement.line_item(current, GROSS_PROFIT) {
        Some(gp) => gp,
        None => match statement.line_item(current, COST_OF_REVENUE) {
            Some(cost) => revenue_raw - cost.abs(),
            None => {
                return Err(EngineError::MissingData {
                    field: StatementField::GrossMargin,
                })
            }
        },
    };
    Ok(clean((gross_profit / revenue_raw) * 100.0))
}
