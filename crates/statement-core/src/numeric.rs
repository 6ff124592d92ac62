//! Value cleaning for statement data.
//!
//! Every monetary value crossing the statement boundary passes through
//! [`sanitize`] before any arithmetic, so NaN/Inf from the vendor feed
//! never propagates into growth-rate division or power operations.

/// Returns 0 for NaN and ±infinity, otherwise the value unchanged.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Sanitize and normalize rounding to 2 decimals.
pub fn clean(value: f64) -> f64 {
    round2(sanitize(value))
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Period-over-period growth in percent. Defined as 0 whenever the
/// previous value is missing or zero, never a division error.
pub fn growth_rate(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        None => 0.0,
        Some(prev) if prev == 0.0 => 0.0,
        Some(prev) => sanitize(((current / prev) - 1.0) * 100.0),
    }
}
