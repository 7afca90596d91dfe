use argminmax::ArgMinMax;

#[inline]
pub(crate) fn get_max(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    let max_index: usize = vec.argmax();
    Some(vec[max_index])
}

#[inline]
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Relative deviation of `value` from `reference`: (value - reference) / reference.
/// Zero reference gives 0.0 rather than inf/NaN.
#[inline]
pub fn relative_delta(value: f64, reference: f64) -> f64 {
    if reference.abs() <= f64::EPSILON {
        return 0.0;
    }
    (value - reference) / reference
}

/// Round half away from zero to `decimals` places.
#[inline]
pub fn round_to(val: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (val * factor).round() / factor
}

/// Integer with thousands separators, e.g. 1234567 -> "1,234,567".
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Numerically stable logistic function.
#[inline]
pub fn expit(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// ln(exp(a) + exp(b)) without overflow.
#[inline]
pub fn log_sum_exp(a: f64, b: f64) -> f64 {
    let m = a.max(b);
    if m == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    m + ((a - m).exp() + (b - m).exp()).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-45_000), "-45,000");
    }

    #[test]
    fn relative_delta_handles_zero_mean() {
        assert_eq!(relative_delta(5.0, 0.0), 0.0);
        assert!((relative_delta(150.0, 100.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn expit_is_symmetric_and_bounded() {
        assert!((expit(0.0) - 0.5).abs() < 1e-12);
        assert!((expit(3.0) + expit(-3.0) - 1.0).abs() < 1e-12);
        assert!(expit(800.0) <= 1.0);
        assert!(expit(-800.0) >= 0.0);
    }

    #[test]
    fn log_sum_exp_matches_naive() {
        let naive = (2.0f64.exp() + 3.0f64.exp()).ln();
        assert!((log_sum_exp(2.0, 3.0) - naive).abs() < 1e-12);
        assert_eq!(log_sum_exp(1.0, f64::NEG_INFINITY), 1.0);
    }

    #[test]
    fn max_of_empty_is_none() {
        assert_eq!(get_max(&[]), None);
        assert_eq!(get_max(&[0.2, 0.9, 0.4]), Some(0.9));
    }
}
