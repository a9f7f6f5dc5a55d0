use crate::fit::fitkind::FitKind;
use crate::fit::params::Params;

use std::fmt;

/// A fitted single-feature line, regardless of how it was solved.
pub trait FitModel {
    fn kind(&self) -> FitKind;
    fn params(&self) -> Params;
    fn intercept(&self) -> f64 {
        self.params().intercept
    }
    fn slope(&self) -> f64 {
        self.params().slope
    }
    fn predict(&self, x: f64) -> f64 {
        self.params().calculate(x)
    }
    fn predict_all(&self, x: &[f64]) -> Vec<f64> {
        let params = self.params();
        x.iter().map(|&xi| params.calculate(xi)).collect()
    }
    /// Per-iteration training cost, only iterative solvers have one.
    fn cost_history(&self) -> Option<&[f64]> {
        None
    }
}

impl fmt::Display for dyn FitModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {}", self.kind(), self.params())
    }
}
