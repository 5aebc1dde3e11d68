//! Accuracy metrics comparing predicted and target coordinates

use common::{Error, Result};
use nalgebra::DMatrix;

/// Planar coordinates
pub const DEFAULT_DIMENSIONS: usize = 2;

/// Distances are reported in the unit of the targets
pub const DEFAULT_CONVERSION_FACTOR: f64 = 1.0;

/// Mean over all output columns of the per column mean squared error
pub fn rmse(predictions: &DMatrix<f64>, targets: &DMatrix<f64>) -> Result<f64> {
    check_pair(predictions, targets)?;

    let diff = predictions - targets;
    let column_errors = diff
        .column_iter()
        .map(|col| col.iter().map(|v| v * v).sum::<f64>() / col.len() as f64);

    Ok(column_errors.sum::<f64>() / diff.ncols() as f64)
}

/// Euclidean distance between each predicted and target point.
///
/// Both matrices are read row by row and regrouped into points of
/// `dimensions` coordinates. Every distance is divided by `conversion_factor`.
pub fn euclidean_distances(
    predictions: &DMatrix<f64>,
    targets: &DMatrix<f64>,
    dimensions: usize,
    conversion_factor: f64,
) -> Result<Vec<f64>> {
    check_pair(predictions, targets)?;
    if dimensions == 0 || predictions.len() % dimensions != 0 {
        return Err(Error::InvalidShape {
            context: "euclidean distance points",
            expected: format!("a multiple of {} values", dimensions),
            found: format!("{} values", predictions.len()),
        });
    }
    if !conversion_factor.is_finite() || conversion_factor <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "conversion factor must be positive and finite, got {}",
            conversion_factor
        )));
    }

    // transposing the column major storage yields the values in row order
    let predictions = predictions.transpose();
    let targets = targets.transpose();

    Ok(predictions
        .as_slice()
        .chunks_exact(dimensions)
        .zip(targets.as_slice().chunks_exact(dimensions))
        .map(|(p, t)| {
            let sq_dist: f64 = p.iter().zip(t).map(|(p, t)| (p - t) * (p - t)).sum();
            sq_dist.sqrt() / conversion_factor
        })
        .collect())
}

/// Mean of the euclidean distances between predicted and target points
pub fn average_euclidean_distance(
    predictions: &DMatrix<f64>,
    targets: &DMatrix<f64>,
    dimensions: usize,
    conversion_factor: f64,
) -> Result<f64> {
    let distances = euclidean_distances(predictions, targets, dimensions, conversion_factor)?;

    Ok(distances.iter().sum::<f64>() / distances.len() as f64)
}

fn check_pair(predictions: &DMatrix<f64>, targets: &DMatrix<f64>) -> Result<()> {
    if predictions.shape() != targets.shape() {
        return Err(Error::shape("predictions", targets.shape(), predictions.shape()));
    }
    if predictions.is_empty() {
        return Err(Error::shape("predictions", (1, 1), predictions.shape()));
    }

    Ok(())
}
