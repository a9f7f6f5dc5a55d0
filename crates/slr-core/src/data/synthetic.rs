use crate::data::dataset::Dataset;
use crate::fit::fiterror::{FitError, FitResult};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Noisy samples of `y = slope * x + intercept` over an evenly spaced `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticLine {
    pub slope: f64,
    pub intercept: f64,
    /// Standard deviation of the gaussian noise added to every `y`.
    pub noise_std: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub n: usize,
}

impl Default for SyntheticLine {
    fn default() -> Self {
        Self { slope: 3.0, intercept: 4.0, noise_std: 1.0, x_min: 0.0, x_max: 2.0, n: 100 }
    }
}

impl SyntheticLine {
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> FitResult<Dataset> {
        if self.n == 0 {
            return Err(FitError::InvalidConfig("sample count must be at least 1".to_string()));
        }
        if !self.x_min.is_finite() || !self.x_max.is_finite() || self.x_max < self.x_min {
            return Err(FitError::InvalidConfig(format!(
                "invalid x range [{}, {}]",
                self.x_min, self.x_max
            )));
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "noise standard deviation must be finite and non-negative, got {}",
                self.noise_std
            )));
        }
        let noise = Normal::new(0.0, self.noise_std)
            .map_err(|e| FitError::InvalidConfig(format!("noise distribution: {e}")))?;

        let x = linspace(self.x_min, self.x_max, self.n);
        let y = x.iter().map(|&xi| self.slope * xi + self.intercept + noise.sample(rng)).collect();

        Dataset::new(x, y)
    }
}

/// `n` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| if i == n - 1 { end } else { start + step * i as f64 }).collect()
        },
    }
}
