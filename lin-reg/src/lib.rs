#[macro_use]
extern crate log;

use common::Result;
use nalgebra::DMatrix;

mod regime;
mod solver;
mod tikhonov_regularization;

pub use regime::Regime;
pub use solver::{LeastSquaresSolver, SvdSolver};
pub use tikhonov_regularization::WeightedTikhonovRegularization;

/// Generic way of performing weighted linear regression and fitting the readout matrix
pub trait LinReg: Clone {
    /// Fit a readout matrix, mapping the design to the targets
    ///
    /// # Parameters
    /// design: Hidden layer output, one row per sample
    /// targets: Target data with one row per sample and one column per output dimension
    /// weights: Square sample weight matrix, with one row and column per sample
    fn fit_readout(
        &self,
        design: &DMatrix<f64>,
        targets: &DMatrix<f64>,
        weights: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>>;

    /// The formulation `fit_readout` uses for a design of the given shape
    #[inline(always)]
    fn regime_for(&self, num_samples: usize, num_hidden: usize) -> Regime {
        Regime::select(num_samples, num_hidden)
    }
}
