use crate::fit::fiterror::{check_points, FitError, FitResult};
use crate::fit::fitkind::FitKind;
use crate::fit::fitmodel::FitModel;
use crate::fit::normal::has_spread;
use crate::fit::params::Params;

/// Least squares line from centered sums, `slope = Sxy / Sxx`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinReg {
    pub intercept: f64,
    pub slope: f64,
}

impl FitModel for LinReg {
    fn kind(&self) -> FitKind {
        FitKind::Ols
    }
    fn params(&self) -> Params {
        Params::new(self.intercept, self.slope)
    }
}

impl LinReg {
    pub fn train(x: &[f64], y: &[f64]) -> FitResult<Self> {
        check_points(x, y, 2)?;
        // no variance in x, no meaningful regression
        if !has_spread(x) {
            return Err(FitError::DegenerateX);
        }

        let n = x.len() as f64;
        let avg_x: f64 = x.iter().sum::<f64>() / n;
        let avg_y: f64 = y.iter().sum::<f64>() / n;

        let ss_xx: f64 = x.iter().map(|xi| (xi - avg_x).powi(2)).sum();
        let ss_xy: f64 = x.iter().zip(y).map(|(xi, yi)| (xi - avg_x) * (yi - avg_y)).sum();
        let slope = ss_xy / ss_xx;
        let intercept = avg_y - slope * avg_x;

        Ok(Self { intercept, slope })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linreg_exact() {
        let x = [0., 1., 2., 3., 4.];
        let y = [1., 3., 5., 7., 9.];
        let model = LinReg::train(&x, &y).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-12);
        assert!((model.intercept - 1.0).abs() < 1e-12);
        assert!((model.predict(5.0) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_linreg_negative_slope() {
        let x = [1., 2., 3., 4., 5.];
        let y = [5., 4., 3., 2., 1.];
        let model = LinReg::train(&x, &y).unwrap();
        assert!((model.slope + 1.0).abs() < 1e-12);
        assert!((model.intercept - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_linreg_small_scale_x() {
        let x = [1e-9, 2e-9, 3e-9, 4e-9];
        let y = [1., 2., 3., 4.];
        let model = LinReg::train(&x, &y).unwrap();
        assert!((model.slope / 1e9 - 1.0).abs() < 1e-9, "slope {}", model.slope);
        assert!(model.intercept.abs() < 1e-6, "intercept {}", model.intercept);
    }

    #[test]
    fn test_linreg_degenerate() {
        assert!(matches!(LinReg::train(&[3., 3., 3.], &[1., 2., 3.]), Err(FitError::DegenerateX)));
        assert!(matches!(
            LinReg::train(&[3.], &[1.]),
            Err(FitError::NotEnoughPoints { len: 1, needed: 2 })
        ));
    }
}
