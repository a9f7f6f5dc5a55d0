use crate::fit::design::{column, design_matrix};
use crate::fit::fiterror::{check_points, FitError, FitResult};
use crate::fit::fitkind::FitKind;
use crate::fit::fitmodel::FitModel;
use crate::fit::params::Params;

use log::{debug, trace};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_ITERATIONS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDescentConfig {
    pub learning_rate: f64,
    pub n_iterations: usize,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self { learning_rate: DEFAULT_LEARNING_RATE, n_iterations: DEFAULT_ITERATIONS }
    }
}

impl GradientDescentConfig {
    pub fn new(learning_rate: f64, n_iterations: usize) -> Self {
        Self { learning_rate, n_iterations }
    }

    /// The engine itself accepts any values; callers that want a hard
    /// failure on nonsense hyperparameters run this first.
    pub fn validate(&self) -> FitResult<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "learning rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if self.n_iterations == 0 {
            return Err(FitError::InvalidConfig("iteration count must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Result of a batch gradient descent run.
#[derive(Debug, Clone)]
pub struct GradientFit {
    /// `[intercept, slope]`
    pub theta: DVector<f64>,
    pub cost_history: Vec<f64>,
}

impl FitModel for GradientFit {
    fn kind(&self) -> FitKind {
        FitKind::GradientDescent
    }
    fn params(&self) -> Params {
        Params::from_theta(&self.theta)
    }
    fn cost_history(&self) -> Option<&[f64]> {
        Some(&self.cost_history)
    }
}

/// Full-batch gradient descent on the mean squared error.
///
/// Theta starts at zero and is updated exactly `config.n_iterations` times:
/// no early stopping, no convergence check. One MSE value is recorded per
/// iteration, measured before that iteration's update.
///
/// Returns `DivergedTraining` if theta is no longer finite once the loop ends.
pub fn gradient_descent(
    x: &[f64],
    y: &[f64],
    config: &GradientDescentConfig,
) -> FitResult<GradientFit> {
    check_points(x, y, 1)?;

    let n = x.len() as f64;
    let design = design_matrix(x);
    let target = column(y);
    let mut theta = DVector::<f64>::zeros(2);
    let mut cost_history = Vec::with_capacity(config.n_iterations);
    let mut first_non_finite: Option<usize> = None;
    let trace_every = (config.n_iterations / 10).max(1);

    for iteration in 0..config.n_iterations {
        let y_pred = &design * &theta;
        let error = y_pred - &target;
        let cost = error.norm_squared() / n;
        if !cost.is_finite() && first_non_finite.is_none() {
            first_non_finite = Some(iteration);
        }
        if iteration % trace_every == 0 {
            trace!("iteration {iteration}: cost {cost}");
        }
        cost_history.push(cost);

        let gradient = design.tr_mul(&error) * (2.0 / n);
        theta -= gradient * config.learning_rate;
    }

    let fit = GradientFit { theta, cost_history };
    let params = fit.params();
    if !params.is_finite() {
        let iteration = first_non_finite.unwrap_or(config.n_iterations);
        debug!("gradient descent diverged at iteration {iteration} (lr {})", config.learning_rate);
        return Err(FitError::DivergedTraining { iteration });
    }

    debug!(
        "gradient descent finished: n={} iterations={} lr={} {} final cost {:?}",
        x.len(),
        config.n_iterations,
        config.learning_rate,
        params,
        fit.cost_history.last()
    );
    Ok(fit)
}

/// Stateful wrapper around [`gradient_descent`] keeping the last fit.
#[derive(Debug, Clone, Default)]
pub struct LinearFitEngine {
    config: GradientDescentConfig,
    fitted: Option<GradientFit>,
}

impl LinearFitEngine {
    pub fn new(learning_rate: f64, n_iterations: usize) -> Self {
        Self::from_config(GradientDescentConfig::new(learning_rate, n_iterations))
    }

    pub fn from_config(config: GradientDescentConfig) -> Self {
        Self { config, fitted: None }
    }

    /// Trains from scratch. Any previous theta and cost history are dropped
    /// first, so a failed fit leaves the engine unfitted.
    pub fn fit(&mut self, x: &[f64], y: &[f64]) -> FitResult<()> {
        self.fitted = None;
        self.fitted = Some(gradient_descent(x, y, &self.config)?);
        Ok(())
    }

    /// One prediction per input value. `NotFitted` before a successful fit.
    pub fn predict(&self, x: &[f64]) -> FitResult<Vec<f64>> {
        let fit = self.fitted.as_ref().ok_or(FitError::NotFitted)?;
        let y_pred = design_matrix(x) * &fit.theta;
        Ok(y_pred.iter().copied().collect())
    }

    pub fn get_params(&self) -> FitResult<Params> {
        self.fitted.as_ref().map(|fit| fit.params()).ok_or(FitError::NotFitted)
    }

    /// Per-iteration MSE of the last fit.
    pub fn cost_history(&self) -> FitResult<&[f64]> {
        self.fitted.as_ref().map(|fit| fit.cost_history.as_slice()).ok_or(FitError::NotFitted)
    }

    /// Hands over theta and the cost history, `None` if never fitted.
    pub fn into_fit(self) -> Option<GradientFit> {
        self.fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: [f64; 5] = [0., 1., 2., 3., 4.];
    const Y: [f64; 5] = [1., 3., 5., 7., 9.]; // y = 2x + 1

    #[test]
    fn test_cost_history_length() {
        let mut engine = LinearFitEngine::new(0.01, 137);
        engine.fit(&X, &Y).unwrap();
        assert_eq!(engine.cost_history().unwrap().len(), 137);
    }

    #[test]
    fn test_converges_on_exact_line() {
        let mut engine = LinearFitEngine::new(0.05, 5000);
        engine.fit(&X, &Y).unwrap();
        let params = engine.get_params().unwrap();

        assert!((params.intercept - 1.0).abs() < 1e-2, "intercept {}", params.intercept);
        assert!((params.slope - 2.0).abs() < 1e-2, "slope {}", params.slope);

        let pred = engine.predict(&[5.0]).unwrap();
        assert!((pred[0] - 11.0).abs() < 1e-2);
    }

    #[test]
    fn test_cost_non_increasing_for_small_step() {
        let fit = gradient_descent(&X, &Y, &GradientDescentConfig::new(0.05, 500)).unwrap();
        for pair in fit.cost_history.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-12, "cost went up: {} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_first_cost_is_mean_square_of_target() {
        // theta starts at zero, so the first recorded cost is mean(y^2)
        let fit = gradient_descent(&X, &Y, &GradientDescentConfig::new(0.01, 3)).unwrap();
        let expected = Y.iter().map(|v| v * v).sum::<f64>() / Y.len() as f64;
        assert!((fit.cost_history[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_single_step_matches_hand_computed_gradient() {
        // gradient at theta = 0 is (2/n) * X^T (-y) = [-2 * mean(y), -2 * mean(x * y)]
        let fit = gradient_descent(&X, &Y, &GradientDescentConfig::new(0.1, 1)).unwrap();
        let mean_y = 5.0;
        let mean_xy = (0. + 3. + 10. + 21. + 36.) / 5.0;
        assert!((fit.theta[0] - 0.1 * 2.0 * mean_y).abs() < 1e-12);
        assert!((fit.theta[1] - 0.1 * 2.0 * mean_xy).abs() < 1e-12);
    }

    #[test]
    fn test_predict_before_fit() {
        let engine = LinearFitEngine::new(0.01, 10);
        assert!(matches!(engine.predict(&[1.0]), Err(FitError::NotFitted)));
        assert!(matches!(engine.get_params(), Err(FitError::NotFitted)));
        assert!(matches!(engine.cost_history(), Err(FitError::NotFitted)));
    }

    #[test]
    fn test_get_params_matches_theta() {
        let mut engine = LinearFitEngine::new(0.01, 50);
        engine.fit(&X, &Y).unwrap();
        let params = engine.get_params().unwrap();
        let theta = engine.into_fit().unwrap().theta;
        assert_eq!(params.intercept, theta[0]);
        assert_eq!(params.slope, theta[1]);
    }

    #[test]
    fn test_predict_is_idempotent_and_any_length() {
        let mut engine = LinearFitEngine::new(0.05, 200);
        engine.fit(&X, &Y).unwrap();
        let input = [10.0, -3.0, 0.5, 7.0, 1.0, 2.0, 3.0];
        let first = engine.predict(&input).unwrap();
        let second = engine.predict(&input).unwrap();
        assert_eq!(first.len(), input.len());
        assert_eq!(first, second);
        assert!(engine.predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let mut engine = LinearFitEngine::new(0.01, 10);
        let err = engine.fit(&X, &Y[..4]).unwrap_err();
        assert!(matches!(err, FitError::DimensionMismatch { len_x: 5, len_y: 4 }));
    }

    #[test]
    fn test_empty_input() {
        let err = gradient_descent(&[], &[], &GradientDescentConfig::default()).unwrap_err();
        assert!(matches!(err, FitError::NotEnoughPoints { len: 0, needed: 1 }));
    }

    #[test]
    fn test_divergence_is_reported_and_engine_unfitted() {
        let mut engine = LinearFitEngine::new(0.05, 100);
        engine.fit(&X, &Y).unwrap();

        let mut wild = LinearFitEngine::new(10.0, 2000);
        let err = wild.fit(&X, &Y).unwrap_err();
        assert!(matches!(err, FitError::DivergedTraining { .. }));
        assert!(matches!(wild.get_params(), Err(FitError::NotFitted)));

        // a failed refit still discards the previous fit
        let mut engine = LinearFitEngine::from_config(GradientDescentConfig::new(10.0, 2000));
        assert!(engine.fit(&X, &Y).is_err());
        assert!(engine.into_fit().is_none());
    }

    #[test]
    fn test_refit_resets_state() {
        let mut engine = LinearFitEngine::new(0.05, 300);
        engine.fit(&X, &Y).unwrap();
        let first = engine.get_params().unwrap();

        let y2: Vec<f64> = X.iter().map(|x| -x + 4.0).collect();
        engine.fit(&X, &y2).unwrap();
        let second = engine.get_params().unwrap();

        assert_eq!(engine.cost_history().unwrap().len(), 300);
        assert!(second.slope < 0.0);
        assert_ne!(first, second);
    }

    #[test]
    fn test_unvalidated_zero_iterations_keeps_zero_theta() {
        let fit = gradient_descent(&X, &Y, &GradientDescentConfig::new(0.01, 0)).unwrap();
        assert!(fit.cost_history.is_empty());
        assert_eq!(fit.params(), Params::new(0.0, 0.0));
    }

    #[test]
    fn test_validate() {
        assert!(GradientDescentConfig::new(0.01, 10).validate().is_ok());
        assert!(GradientDescentConfig::new(0.0, 10).validate().is_err());
        assert!(GradientDescentConfig::new(-1.0, 10).validate().is_err());
        assert!(GradientDescentConfig::new(f64::NAN, 10).validate().is_err());
        assert!(GradientDescentConfig::new(0.01, 0).validate().is_err());
    }
}
