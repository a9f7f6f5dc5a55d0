use crate::fit::fiterror::{check_points, FitError, FitResult};
use crate::fit::fitkind::FitKind;
use crate::fit::fitmodel::FitModel;
use crate::fit::params::Params;
use crate::stats::linreg::LinReg;
use crate::stats::metrics::rss;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use std::fmt;

/// Closed-form fit with the usual inference on the coefficients.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OlsSummary {
    pub intercept: f64,
    pub slope: f64,
    /// Residual standard error, `sqrt(RSS / (n - 2))`
    pub sigma: f64,
    pub se_slope: f64,
    pub se_intercept: f64,
    pub t_stat: f64,
    /// Two-sided, H0: slope == 0
    pub p_value: f64,
    pub n: usize,
}

impl fmt::Display for OlsSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "slope: {:.6} (se {:.6}, t {:.3}, p {:.4e}), intercept: {:.6} (se {:.6}), sigma: {:.6}, n: {}",
            self.slope,
            self.se_slope,
            self.t_stat,
            self.p_value,
            self.intercept,
            self.se_intercept,
            self.sigma,
            self.n
        )
    }
}

impl FitModel for OlsSummary {
    fn kind(&self) -> FitKind {
        FitKind::Ols
    }
    fn params(&self) -> Params {
        Params::new(self.intercept, self.slope)
    }
}

impl OlsSummary {
    pub fn from_data(x: &[f64], y: &[f64]) -> FitResult<Self> {
        check_points(x, y, 3)?;

        let model = LinReg::train(x, y)?;
        let n = x.len() as f64;

        let y_hat = model.predict_all(x);
        let rss_val = rss(y, &y_hat)?;

        let x_mean = x.iter().sum::<f64>() / n;
        let ss_xx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();

        let sigma = (rss_val / (n - 2.0)).sqrt();
        if !sigma.is_finite() {
            return Err(FitError::StatError("non-finite residual standard error"));
        }

        let se_slope = sigma / ss_xx.sqrt();
        let se_intercept = sigma * (1.0 / n + x_mean.powi(2) / ss_xx).sqrt();

        // perfect fit: sigma == 0, the slope is known exactly
        let (t_stat, p_value) = if se_slope == 0.0 {
            let t = if model.slope == 0.0 { 0.0 } else { f64::INFINITY.copysign(model.slope) };
            let p = if model.slope == 0.0 { 1.0 } else { 0.0 };
            (t, p)
        } else {
            let t = model.slope / se_slope;
            let dist = StudentsT::new(0.0, 1.0, n - 2.0)
                .map_err(|_| FitError::StatError("failed to construct StudentsT"))?;
            (t, 2.0 * (1.0 - dist.cdf(t.abs())))
        };

        Ok(Self {
            intercept: model.intercept,
            slope: model.slope,
            sigma,
            se_slope,
            se_intercept,
            t_stat,
            p_value,
            n: x.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_fit_has_zero_p_value() {
        let x = [0., 1., 2., 3., 4.];
        let y = [1., 3., 5., 7., 9.];
        let summary = OlsSummary::from_data(&x, &y).unwrap();
        assert_eq!(summary.sigma, 0.0);
        assert_eq!(summary.p_value, 0.0);
        assert!((summary.slope - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_standard_errors() {
        // slope 1/2, intercept 1/3, residuals [1/6, -1/3, 1/6]
        let x = [1., 2., 3.];
        let y = [1., 1., 2.];
        let summary = OlsSummary::from_data(&x, &y).unwrap();

        assert!((summary.slope - 0.5).abs() < 1e-12);
        assert!((summary.intercept - 1.0 / 3.0).abs() < 1e-12);
        // RSS = 1/6 on one degree of freedom
        let sigma = (1.0f64 / 6.0).sqrt();
        assert!((summary.sigma - sigma).abs() < 1e-12);
        assert!((summary.se_slope - sigma / 2f64.sqrt()).abs() < 1e-12);
        assert!(summary.p_value > 0.0 && summary.p_value < 1.0);
    }

    #[test]
    fn test_flat_noise_is_not_significant() {
        let x = [1., 2., 3., 4., 5., 6.];
        let y = [1., -1., 1., -1., 1., -1.];
        let summary = OlsSummary::from_data(&x, &y).unwrap();
        assert!(summary.p_value > 0.05);
    }

    #[test]
    fn test_needs_three_points() {
        assert!(matches!(
            OlsSummary::from_data(&[1., 2.], &[1., 2.]),
            Err(FitError::NotEnoughPoints { len: 2, needed: 3 })
        ));
    }
}
