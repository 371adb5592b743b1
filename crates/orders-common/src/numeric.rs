//! Rounding and ratio helpers shared by the report builders.
//!
//! Rounding is half away from zero (`f64::round`) everywhere, so the same
//! input always renders the same two-decimal output.

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// `part / total * 100`, rounded to two decimals. Zero when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}
