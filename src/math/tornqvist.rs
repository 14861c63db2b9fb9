//! Discrete Divisia helpers: log growth, within-year shares and Tornqvist
//! (two-period mean) weights.
//!
//! All functions are total. Undefined results (first year, non-positive
//! index) are `None`, not NaN, so they can never leak into a sum.

/// `ln(current) - ln(previous)`; `None` unless both levels are positive and finite.
pub fn log_growth(previous: Option<f64>, current: f64) -> Option<f64> {
    let previous = previous?;
    if previous > 0.0 && current > 0.0 && previous.is_finite() && current.is_finite() {
        Some(current.ln() - previous.ln())
    } else {
        None
    }
}

/// `value / total`, with an all-zero year giving a zero share.
pub fn share(value: f64, total: f64) -> f64 {
    if total == 0.0 { 0.0 } else { value / total }
}

/// Two-period mean `(current + previous) / 2`; `None` without a previous period.
pub fn tornqvist(previous: Option<f64>, current: f64) -> Option<f64> {
    previous.map(|p| 0.5 * (p + current))
}

/// Shares of every element of `values` in their sum.
pub fn shares(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    values.iter().map(|v| share(*v, total)).collect()
}
