use crate::fit::design::{column, design_matrix};
use crate::fit::fiterror::{check_points, FitError, FitResult};
use crate::fit::fitkind::FitKind;
use crate::fit::fitmodel::FitModel;
use crate::fit::params::Params;

use log::debug;

/// Closed-form least squares, `theta = (X^T X)^-1 X^T y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalEquationFit {
    pub params: Params,
}

impl FitModel for NormalEquationFit {
    fn kind(&self) -> FitKind {
        FitKind::NormalEquation
    }
    fn params(&self) -> Params {
        self.params
    }
}

/// Solves the normal equation with an LU decomposition of `X^T X` instead of
/// forming the inverse. Fails with `DegenerateX` when `X^T X` is singular,
/// i.e. every `x` is the same value.
pub fn normal_equation(x: &[f64], y: &[f64]) -> FitResult<NormalEquationFit> {
    check_points(x, y, 1)?;
    if !has_spread(x) {
        return Err(FitError::DegenerateX);
    }

    let design = design_matrix(x);
    let xtx = design.tr_mul(&design);
    let xty = design.tr_mul(&column(y));

    let theta = xtx.lu().solve(&xty).ok_or(FitError::DegenerateX)?;
    let params = Params::from_theta(&theta);
    if !params.is_finite() {
        return Err(FitError::DegenerateX);
    }

    debug!("normal equation solved: n={} {}", x.len(), params);
    Ok(NormalEquationFit { params })
}

/// True when `x` has a finite spread around its mean that is not lost in
/// rounding. The threshold scales with `sum(x^2)`, so small-magnitude `x`
/// still counts as spread.
pub(crate) fn has_spread(x: &[f64]) -> bool {
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let ss_xx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
    let scale: f64 = x.iter().map(|xi| xi * xi).sum();
    ss_xx.is_finite() && ss_xx > f64::EPSILON * scale
}
