//! Small numeric helpers shared by the trainer, scorer and analyzers.

/// Pearson correlation between two equally long binary columns.
///
/// Returns `None` when either column has zero variance (or the slice is empty),
/// since the coefficient is undefined there.
pub fn pearson_binary(xs: &[bool], ys: &[bool]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return None;
    }
    let nf = n as f64;
    let as_f = |b: bool| if b { 1.0 } else { 0.0 };

    let mean_x = xs[..n].iter().map(|&b| as_f(b)).sum::<f64>() / nf;
    let mean_y = ys[..n].iter().map(|&b| as_f(b)).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = as_f(x) - mean_x;
        let dy = as_f(y) - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Round to one decimal place.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Clamp to [0.0, 1.0].
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Clamp to a percentage in [0.0, 100.0].
pub fn clamp_pct(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_columns_correlate_perfectly() {
        let x = [true, false, false, true, false];
        let r = pearson_binary(&x, &x).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_columns_anticorrelate() {
        let x = [true, false, false, true];
        let y = [false, true, true, false];
        let r = pearson_binary(&x, &y).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_is_undefined() {
        let x = [true, true, true];
        let y = [true, false, false];
        assert!(pearson_binary(&x, &y).is_none());
        assert!(pearson_binary(&y, &x).is_none());
        assert!(pearson_binary(&[], &[]).is_none());
    }

    #[test]
    fn rounding_and_clamping() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(clamp01(1.4), 1.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp_pct(-3.0), 0.0);
        assert_eq!(clamp_pct(130.0), 100.0);
    }
}
