pub mod dataset;
pub mod synthetic;

pub use dataset::Dataset;
pub use synthetic::{linspace, seeded_rng, SyntheticLine};
