//! Weighted Extreme Learning Machine regression.
//!
//! A single hidden layer network whose input weights and biases are drawn at
//! random once and then kept fixed. Only the output weights are fitted, in
//! closed form, by weighted ridge regression.

#[macro_use]
extern crate log;

pub mod metrics;
mod params;
mod regressor;
mod weights;

pub use common::{Activation, Error, Result};
pub use lin_reg::Regime;
pub use params::Params;
pub use regressor::WelmRegressor;
pub use weights::diagonal_weights;
