use crate::data::Dataset;
use crate::fit::fiterror::FitError;
use crate::stats::{adjusted_r2, mean, r2_from_predictions, rmse, LinReg};

use log::{debug, warn};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use std::fmt;

pub const MIN_FIT_POINTS: usize = 2;

/// Ordinary least squares line through a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    /// Coefficient of determination, always within `[0, 1]`.
    pub r_squared: f64,
    /// `model.calculate(x[i])` for every sample, index aligned with `x`.
    pub predictions: Vec<f64>,
    pub model: LinReg,
    pub adjusted_r2: f64,
    pub rmse: f64,
    /// Residual standard error, needs at least three points.
    pub sigma: Option<f64>,
    /// Two sided p-value of the slope. `None` when the slope has no standard
    /// error, which is the case for a perfect fit.
    pub p_value: Option<f64>,
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, r2: {:.4}, adj r2: {:.4}, rmse: {:.4}, n: {}",
            self.model,
            self.r_squared,
            self.adjusted_r2,
            self.rmse,
            self.predictions.len()
        )
    }
}

impl FitResult {
    pub fn slope(&self) -> f64 {
        self.model.slope
    }
    pub fn intercept(&self) -> f64 {
        self.model.intercept
    }
}

pub fn fit(data: &Dataset) -> Result<FitResult, FitError> {
    let (x, y) = (data.x(), data.y());
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch { len_x: x.len(), len_y: y.len() });
    }
    if x.len() < MIN_FIT_POINTS {
        return Err(FitError::InsufficientData { len: x.len(), needed: MIN_FIT_POINTS });
    }

    let model = LinReg::train(x, y).ok_or(FitError::DegenerateFit)?;
    let predictions = model.predict_all(x);

    let raw_r2 = r2_from_predictions(y, &predictions)
        .ok_or(FitError::StatError("failed to compute r2"))?;
    if !raw_r2.is_finite() {
        return Err(FitError::StatError("non-finite r2"));
    }
    // rounding can push a near perfect or near flat fit just outside the range
    let r_squared = raw_r2.clamp(0.0, 1.0);
    if r_squared != raw_r2 {
        warn!("clamped r2 from {raw_r2} to {r_squared}");
    }

    let n = x.len();
    let rmse = rmse(y, &predictions).ok_or(FitError::StatError("failed to compute rmse"))?;
    let adjusted_r2 = adjusted_r2(r_squared, n, 1);
    let (sigma, p_value) = slope_significance(x, y, &predictions, &model)?;

    debug!("fitted {} points: {}", n, model);

    Ok(FitResult { r_squared, predictions, model, adjusted_r2, rmse, sigma, p_value })
}

fn slope_significance(
    x: &[f64],
    y: &[f64],
    y_hat: &[f64],
    model: &LinReg,
) -> Result<(Option<f64>, Option<f64>), FitError> {
    let n = x.len() as f64;
    if x.len() <= MIN_FIT_POINTS {
        return Ok((None, None));
    }

    let rss: f64 = y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();
    let sigma = (rss / (n - 2.0)).sqrt();
    if !sigma.is_finite() {
        return Err(FitError::StatError("non-finite sigma"));
    }

    let x_mean = mean(x).ok_or(FitError::StatError("empty x"))?;
    let ss_xx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
    let se_slope = sigma / ss_xx.sqrt();
    if !se_slope.is_finite() || se_slope <= 0.0 {
        return Ok((Some(sigma), None));
    }

    let t_stat = model.slope / se_slope;
    if !t_stat.is_finite() {
        return Ok((Some(sigma), None));
    }
    let dist = StudentsT::new(0.0, 1.0, n - 2.0)
        .map_err(|_| FitError::StatError("failed to construct StudentsT"))?;
    let p_value = 2.0 * (1.0 - dist.cdf(t_stat.abs()));

    Ok((Some(sigma), Some(p_value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate, GeneratorConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line(n: usize) -> Dataset {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        Dataset::new(x.clone(), x).unwrap()
    }

    #[test]
    fn test_perfect_fit() {
        let res = fit(&line(10)).expect("fit failed");

        assert_eq!(res.r_squared, 1.0);
        assert_eq!(res.predictions.len(), 10);
        for (i, p) in res.predictions.iter().enumerate() {
            assert!((p - i as f64).abs() < 1e-9);
        }
        assert!((res.slope() - 1.0).abs() < 1e-12);
        assert!(res.intercept().abs() < 1e-12);
        assert_eq!(res.p_value, None);
    }

    #[test]
    fn test_noisy_fit_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let data = generate(10.0, &GeneratorConfig::default(), &mut rng).unwrap();
        let res = fit(&data).expect("fit failed");

        dbg!(res.r_squared, res.slope(), res.p_value);
        assert!(res.r_squared >= 0.0 && res.r_squared <= 1.0);
        assert_eq!(res.predictions.len(), data.len());
        assert!(res.adjusted_r2 <= res.r_squared);
        // y = x * (1 + noise) with noise centred on 1
        assert!((res.slope() - 2.0).abs() < 0.3);
        let p = res.p_value.unwrap();
        assert!((0.0..=1.0).contains(&p));
        assert!(res.sigma.unwrap() > 0.0);
    }

    #[test]
    fn test_fit_is_pure() {
        let mut rng = StdRng::seed_from_u64(5);
        let data = generate(4.0, &GeneratorConfig::with_samples(200), &mut rng).unwrap();

        assert_eq!(fit(&data).unwrap(), fit(&data).unwrap());
    }

    #[test]
    fn test_single_point_is_insufficient() {
        let data = Dataset::new(vec![0.], vec![1.]).unwrap();

        assert_eq!(fit(&data), Err(FitError::InsufficientData { len: 1, needed: 2 }));
    }

    #[test]
    fn test_empty_is_insufficient() {
        let data = Dataset::new(vec![], vec![]).unwrap();

        assert!(matches!(fit(&data), Err(FitError::InsufficientData { len: 0, .. })));
    }

    #[test]
    fn test_two_points() {
        let data = Dataset::new(vec![0., 1.], vec![1., 3.]).unwrap();
        let res = fit(&data).unwrap();

        assert_eq!(res.r_squared, 1.0);
        assert_eq!(res.sigma, None);
        assert_eq!(res.p_value, None);
    }

    #[test]
    fn test_constant_y_scores_one() {
        let data = Dataset::new(vec![0., 1., 2., 3.], vec![7.; 4]).unwrap();
        let res = fit(&data).unwrap();

        assert_eq!(res.r_squared, 1.0);
        assert_eq!(res.predictions, vec![7.; 4]);
    }

    #[test]
    fn test_constant_y_with_inexact_mean_scores_one() {
        for (c, n) in [(0.1, 7), (3.3, 3), (0.7, 10), (1.1, 7)] {
            let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let data = Dataset::new(x, vec![c; n]).unwrap();
            let res = fit(&data).unwrap();

            assert_eq!(res.r_squared, 1.0, "c = {c}, n = {n}");
            assert_eq!(res.predictions, vec![c; n]);
        }
    }

    #[test]
    fn test_constant_x_is_degenerate() {
        let data = Dataset::new(vec![2.; 4], vec![1., 2., 3., 4.]).unwrap();

        assert_eq!(fit(&data), Err(FitError::DegenerateFit));
    }
}
