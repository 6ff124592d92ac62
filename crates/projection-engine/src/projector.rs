use statement_core::numeric::{round1, sanitize};
use statement_core::{
    AggregatedMetric, ProjectionResult, QuartersToBreakEven, YearsToBreakEven,
};

/// Maximum number of quarters searched before declaring "not profitable
/// within range" (ten years).
pub const HORIZON_QUARTERS: u32 = 40;

const QUARTERS_PER_YEAR: f64 = 4.0;

/// Runs the compounding-growth break-even search:
///
/// `P(t) = R0 * (1 + g)^t * m  -  E0 * (1 + e)^t`
///
/// where `g` and `e` are per-quarter rates derived from the aggregated
/// annual-equivalent growth percentages. Never fails on numeric input;
/// all terminal states are ordinary returns.
pub struct ProfitabilityProjector;

impl ProfitabilityProjector {
    pub fn project(aggregate: &AggregatedMetric) -> ProjectionResult {
        let r0 = aggregate.revenue_m;
        let e0 = aggregate.op_expenses_m;
        let margin = aggregate.gross_margin_pct / 100.0;

        // Annual-equivalent growth compounding evenly across four
        // quarters. Modeling choice, not a derived fact.
        let quarterly = |annual_pct: f64| (1.0 + annual_pct / 100.0).powf(0.25) - 1.0;
        let g = quarterly(aggregate.revenue_growth_pct);
        let e = quarterly(aggregate.expense_growth_pct);

        // Rejected upstream as missing data, but defensively handled.
        if e0 == 0.0 {
            return ProjectionResult {
                quarters_to_break_even: QuartersToBreakEven::NotApplicable,
                years_to_break_even: YearsToBreakEven::NotApplicable,
                projected_revenue_m: round1(sanitize(r0)),
                projected_gross_profit_m: 0.0,
                projected_expenses_m: 0.0,
                projected_profit_m: 0.0,
            };
        }

        // The current quarter may already be the answer; no growth is
        // applied in that case.
        let initial_profit = r0 * margin - e0;
        if initial_profit > 0.0 {
            return ProjectionResult {
                quarters_to_break_even: QuartersToBreakEven::Quarters(0),
                years_to_break_even: YearsToBreakEven::Years(0.0),
                projected_revenue_m: round1(sanitize(r0)),
                projected_gross_profit_m: round1(sanitize(r0 * margin)),
                projected_expenses_m: round1(sanitize(e0)),
                projected_profit_m: round1(sanitize(initial_profit)),
            };
        }

        let profit_at = |t: u32| {
            let revenue = r0 * (1.0 + g).powi(t as i32);
            let expenses = e0 * (1.0 + e).powi(t as i32);
            (revenue, revenue * margin, expenses)
        };

        let mut t = 0u32;
        while t < HORIZON_QUARTERS {
            let (_, gross_profit, expenses) = profit_at(t);
            // Strict: profit of exactly 0 is not profitable.
            if gross_profit - expenses > 0.0 {
                break;
            }
            t += 1;
        }

        // On failure the figures are still evaluated at the horizon
        // boundary, a concrete "where things stand at 10 years" snapshot.
        let (revenue, gross_profit, expenses) = profit_at(t);
        let profit = gross_profit - expenses;

        let (quarters, years) = if t >= HORIZON_QUARTERS {
            (
                QuartersToBreakEven::BeyondHorizon,
                YearsToBreakEven::NotApplicable,
            )
        } else {
            (
                QuartersToBreakEven::Quarters(t),
                YearsToBreakEven::Years(round1(t as f64 / QUARTERS_PER_YEAR)),
            )
        };

        ProjectionResult {
            quarters_to_break_even: quarters,
            years_to_break_even: years,
            projected_revenue_m: round1(sanitize(revenue)),
            projected_gross_profit_m: round1(sanitize(gross_profit)),
            projected_expenses_m: round1(sanitize(expenses)),
            projected_profit_m: round1(sanitize(profit)),
        }
    }
}
