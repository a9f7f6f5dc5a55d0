use crate::fit::fiterror::{check_points, FitError, FitResult};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Goodness of fit of predictions against the observed target.
///
/// `r2` and `adjusted_r2` are `None` when the target is constant, which
/// includes a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    pub r2: Option<f64>,
    pub adjusted_r2: Option<f64>,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MAE: {:.6}, MSE: {:.6}, RMSE: {:.6}", self.mae, self.mse, self.rmse)?;
        match (self.r2, self.adjusted_r2) {
            (Some(r2), Some(adj)) => write!(f, ", R2: {r2:.6}, adj. R2: {adj:.6}"),
            _ => write!(f, ", R2: n/a (constant target)"),
        }
    }
}

impl Metrics {
    /// Single-feature model, so adjusted R2 uses one predictor.
    pub fn evaluate(y: &[f64], y_hat: &[f64]) -> FitResult<Self> {
        let mse_val = mse(y, y_hat)?;
        let r2_val = match r2(y, y_hat) {
            Ok(value) => Some(value),
            Err(FitError::ZeroVariance) => None,
            Err(e) => return Err(e),
        };
        Ok(Self {
            mae: mae(y, y_hat)?,
            mse: mse_val,
            rmse: mse_val.sqrt(),
            r2: r2_val,
            adjusted_r2: r2_val.map(|v| adjusted_r2(v, y.len(), 1)),
        })
    }
}

pub fn residuals(y: &[f64], y_hat: &[f64]) -> FitResult<Vec<f64>> {
    check_points(y, y_hat, 0)?;
    Ok(y.iter().zip(y_hat).map(|(&yi, &yhi)| yi - yhi).collect())
}

pub fn mae(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    check_points(y, y_hat, 1)?;
    let sum_abs: f64 = y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).abs()).sum();
    Ok(sum_abs / y.len() as f64)
}

pub fn mse(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    Ok(rss(y, y_hat)? / y.len() as f64)
}

pub fn rmse(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    Ok(mse(y, y_hat)?.sqrt())
}

/// Residual sum of squares.
pub fn rss(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    check_points(y, y_hat, 1)?;
    Ok(y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum())
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Never above 1, negative when the predictions are worse than the mean.
/// A constant target has `SS_tot == 0` and gives `ZeroVariance`.
pub fn r2(y: &[f64], y_hat: &[f64]) -> FitResult<f64> {
    let ss_res = rss(y, y_hat)?;

    let y_mean = y.iter().sum::<f64>() / y.len() as f64;
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Err(FitError::ZeroVariance);
    }

    Ok(1.0 - ss_res / ss_tot)
}

pub fn adjusted_r2(r2: f64, n: usize, k: usize) -> f64 {
    if n <= k + 1 {
        return r2; // Not enough data to adjust
    }
    1.0 - (1.0 - r2) * (n as f64 - 1.0) / (n as f64 - k as f64 - 1.0)
}

/// Signed Pearson correlation coefficient.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().any(|v| !v.is_finite()) || y.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        num += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    let denom = (denom_x * denom_y).sqrt();
    if denom == 0.0 {
        None
    } else {
        Some(num / denom)
    }
}
