//! Simple linear regression: batch gradient descent, closed-form solvers and
//! the metrics used to compare them.
//!
//! ```
//! use slr_core::fit::LinearFitEngine;
//!
//! let x = [0.0, 1.0, 2.0, 3.0, 4.0];
//! let y = [1.0, 3.0, 5.0, 7.0, 9.0];
//!
//! let mut engine = LinearFitEngine::new(0.05, 5000);
//! engine.fit(&x, &y).unwrap();
//! let params = engine.get_params().unwrap();
//! assert!((params.slope - 2.0).abs() < 1e-2);
//! assert!((engine.predict(&[5.0]).unwrap()[0] - 11.0).abs() < 1e-2);
//! ```

pub mod cmd;
pub mod data;
pub mod fit;
pub mod report;
pub mod stats;

pub use fit::{FitError, FitResult};
