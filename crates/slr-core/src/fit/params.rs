use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of a fitted line, `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub intercept: f64,
    pub slope: f64,
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "intercept: {:.6}, slope: {:.6}", self.intercept, self.slope)
    }
}

impl Params {
    pub fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Reads `[intercept, slope]` out of a theta vector.
    pub fn from_theta(theta: &DVector<f64>) -> Self {
        Self { intercept: theta[0], slope: theta[1] }
    }

    pub fn calculate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.slope.is_finite()
    }
}
