//! Display formatting for rule metrics.
//!
//! Support and confidence are shown as percentages, lift as a plain ratio.
//! Missing metrics (NaN) render as `n/a`.

/// `value * 100` with `decimals` places and a trailing `%`.
pub fn percent(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "n/a".to_string();
    }
    format!("{:.*}%", decimals, value * 100.0)
}

/// Lift with two decimal places.
pub fn lift(value: f64) -> String {
    if value.is_nan() {
        return "n/a".to_string();
    }
    format!("{value:.2}")
}
