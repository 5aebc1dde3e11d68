use common::{Error, Result};
use nalgebra::{DMatrix, SVD};

/// Solves `a * x = b` in the least squares sense
pub trait LeastSquaresSolver: Clone {
    /// Find `x` minimizing `||a * x - b||`.
    /// Must not require `a` to be invertible.
    fn solve(&self, a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>>;
}

/// Minimum norm least squares through the singular value decomposition.
///
/// Singular values below `eps * max(rows, cols) * sigma_max` are treated as zero,
/// so singular and badly conditioned systems still produce a solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvdSolver;

impl LeastSquaresSolver for SvdSolver {
    fn solve(&self, a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        if a.is_empty() || a.nrows() != b.nrows() {
            return Err(Error::shape(
                "least squares right hand side",
                (a.nrows(), b.ncols()),
                b.shape(),
            ));
        }
        if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
            return Err(Error::NumericalFailure(
                "linear system contains non-finite entries".to_string(),
            ));
        }

        let svd = SVD::try_new(a.clone(), true, true, f64::EPSILON, 0).ok_or_else(|| {
            Error::NumericalFailure("singular value decomposition did not converge".to_string())
        })?;
        let cutoff = f64::EPSILON * a.nrows().max(a.ncols()) as f64 * svd.singular_values.max();
        trace!("singular values: {}, cutoff: {}", svd.singular_values, cutoff);

        let x = svd.solve(b, cutoff).map_err(|e| Error::NumericalFailure(e.to_string()))?;
        if x.iter().any(|v| !v.is_finite()) {
            return Err(Error::NumericalFailure("solution is not finite".to_string()));
        }

        Ok(x)
    }
}
