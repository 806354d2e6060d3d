pub fn mean(v: &[f64]) -> Option<f64> {
    if v.is_empty() {
        return None;
    }
    Some(v.iter().sum::<f64>() / v.len() as f64)
}

pub fn rmse(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() != y_hat.len() || y.is_empty() {
        return None;
    }

    let sum_sq: f64 = y.iter().zip(y_hat.iter()).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();

    Some((sum_sq / y.len() as f64).sqrt())
}

/// Coefficient of determination `1 - SS_res / SS_tot`.
///
/// When `y` has no variance the ratio is undefined. A fit that reproduces the
/// constant exactly scores 1, anything else scores 0.
pub fn r2_from_predictions(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() != y_hat.len() || y.len() < 2 {
        return None;
    }

    let ss_res: f64 = y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();

    // the mean of a constant is not always exact, so test the values themselves
    if is_constant(y) {
        return Some(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    let y_mean = mean(y)?;
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();

    Some(1.0 - ss_res / ss_tot)
}

pub fn is_constant(v: &[f64]) -> bool {
    v.first().is_some_and(|first| v.iter().all(|vi| vi == first))
}

pub fn adjusted_r2(r2: f64, n: usize, k: usize) -> f64 {
    if n <= k + 1 {
        return r2; // Not enough data to adjust
    }
    1.0 - (1.0 - r2) * (n as f64 - 1.0) / (n as f64 - k as f64 - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r2_perfect() {
        let y = [1., 2., 3., 4.];
        assert_eq!(r2_from_predictions(&y, &y), Some(1.));
    }

    #[test]
    fn test_r2_mean_prediction_is_zero() {
        let y = [1., 2., 3., 4.];
        let y_hat = [2.5; 4];
        assert_eq!(r2_from_predictions(&y, &y_hat), Some(0.));
    }

    #[test]
    fn test_r2_constant_y() {
        let y = [5., 5., 5.];
        assert_eq!(r2_from_predictions(&y, &y), Some(1.));
        assert_eq!(r2_from_predictions(&y, &[5., 5., 6.]), Some(0.));
    }

    #[test]
    fn test_r2_constant_y_inexact_mean() {
        for y in [vec![0.1; 7], vec![3.3; 3], vec![0.7; 10], vec![1.1; 7]] {
            assert_eq!(r2_from_predictions(&y, &y), Some(1.), "y = {:?}", y);
        }
    }

    #[test]
    fn test_r2_length() {
        assert_eq!(r2_from_predictions(&[1., 2.], &[1.]), None);
        assert_eq!(r2_from_predictions(&[1.], &[1.]), None);
    }

    #[test]
    fn test_rmse() {
        assert_eq!(rmse(&[1., 2.], &[1., 2.]), Some(0.));
        assert_eq!(rmse(&[0., 0.], &[3., 3.]), Some(3.));
        assert_eq!(rmse(&[], &[]), None);
    }

    #[test]
    fn test_adjusted_r2_not_above_r2() {
        let adj = adjusted_r2(0.9, 10, 1);
        assert!(adj <= 0.9);
        assert_eq!(adjusted_r2(0.9, 2, 1), 0.9);
    }
}
