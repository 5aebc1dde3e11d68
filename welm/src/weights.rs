use nalgebra::{DMatrix, DVector};

/// Build a diagonal sample weight matrix from per sample confidences
pub fn diagonal_weights(sample_weights: &[f64]) -> DMatrix<f64> {
    DMatrix::from_diagonal(&DVector::from_column_slice(sample_weights))
}
