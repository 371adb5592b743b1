//! Descriptive statistics over the non-null values of a column.

/// Arithmetic mean; `None` for no values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the mean of the two middle values for an even count.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Mean of integer values.
pub fn mean_i64(values: &[i64]) -> Option<f64> {
    let floats: Vec<f64> = values.iter().map(|&value| value as f64).collect();
    mean(&floats)
}

/// Median of integer values.
pub fn median_i64(values: &[i64]) -> Option<f64> {
    let floats: Vec<f64> = values.iter().map(|&value| value as f64).collect();
    median(&floats)
}

/// The `Some` values of a column.
pub fn present<T: Copy>(values: &[Option<T>]) -> Vec<T> {
    values.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_median() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[5.0, 10.0]), Some(7.5));
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median_i64(&[-2, 8]), Some(3.0));
        assert_eq!(mean_i64(&[]), None);
    }

    #[test]
    fn present_skips_nulls() {
        assert_eq!(present(&[Some(5), None, Some(10)]), vec![5, 10]);
    }
}
