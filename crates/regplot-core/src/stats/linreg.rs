use crate::stats::stats::is_constant;

use serde::Serialize;
use std::fmt;

/// Straight line `y = intercept + slope * x`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LinReg {
    pub intercept: f64,
    pub slope: f64,
}

impl fmt::Display for LinReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "y = {:.6} * x + {:.6}", self.slope, self.intercept)
    }
}

impl LinReg {
    pub fn calculate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Closed-form least squares fit.
    ///
    /// Returns `None` when the inputs differ in length, hold fewer than two
    /// points or when `x` has no variance, since the slope is undefined then.
    pub fn train(x: &[f64], y: &[f64]) -> Option<Self> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }

        let n = x.len() as f64;
        let avg_x: f64 = x.iter().sum::<f64>() / n;
        let avg_y: f64 = y.iter().sum::<f64>() / n;

        let (ss_xx, ss_xy) = x.iter().zip(y).fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - avg_x;
            (sxx + dx * dx, sxy + dx * (yi - avg_y))
        });

        if !ss_xx.is_finite() || ss_xx <= f64::EPSILON {
            return None;
        }
        // keep a flat series exactly flat instead of fitting rounding noise
        if is_constant(y) {
            return Some(Self { intercept: y[0], slope: 0. });
        }

        let slope = ss_xy / ss_xx;
        let intercept = avg_y - slope * avg_x;

        Some(Self { intercept, slope })
    }

    pub fn predict_all(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.calculate(xi)).collect()
    }
}
