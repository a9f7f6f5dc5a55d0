#[derive(thiserror::Error, Debug)]
pub enum FitError {
    #[error("x and y have different lengths: {len_x} vs {len_y}")]
    DimensionMismatch { len_x: usize, len_y: usize },
    #[error("not enough points: got {len}, need at least {needed}")]
    NotEnoughPoints { len: usize, needed: usize },
    #[error("model has not been fitted yet")]
    NotFitted,
    #[error("training diverged at iteration {iteration}: parameters are no longer finite")]
    DivergedTraining { iteration: usize },
    #[error("degenerate x: no variance in x")]
    DegenerateX,
    #[error("target has zero variance, r2 is undefined")]
    ZeroVariance,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("column '{0}' not found in header")]
    MissingColumn(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("statistical error: {0}")]
    StatError(&'static str),
}

pub type FitResult<T> = Result<T, FitError>;

/// Fails with `DimensionMismatch` unless both sequences have the same length.
pub fn check_paired(x: &[f64], y: &[f64]) -> FitResult<()> {
    if x.len() != y.len() {
        return Err(FitError::DimensionMismatch { len_x: x.len(), len_y: y.len() });
    }
    Ok(())
}

/// Paired check plus a minimum length.
pub fn check_points(x: &[f64], y: &[f64], needed: usize) -> FitResult<()> {
    check_paired(x, y)?;
    if x.len() < needed {
        return Err(FitError::NotEnoughPoints { len: x.len(), needed });
    }
    Ok(())
}
