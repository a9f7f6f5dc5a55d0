use nalgebra::{DMatrix, DVector};

/// Builds the `n x 2` design matrix `[1, x_i]` used by both gradient descent
/// and the normal equation.
pub fn design_matrix(x: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), 2, |row, col| if col == 0 { 1.0 } else { x[row] })
}

pub fn column(values: &[f64]) -> DVector<f64> {
    DVector::from_column_slice(values)
}
