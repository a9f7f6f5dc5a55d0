pub mod design;
pub mod fiterror;
pub mod fitkind;
pub mod fitmodel;
pub mod gradient;
pub mod normal;
pub mod params;

pub use fiterror::{FitError, FitResult};
pub use fitkind::FitKind;
pub use fitmodel::FitModel;
pub use gradient::{gradient_descent, GradientDescentConfig, GradientFit, LinearFitEngine};
pub use normal::{normal_equation, NormalEquationFit};
pub use params::Params;
