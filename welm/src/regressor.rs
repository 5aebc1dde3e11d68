use common::{Activation, Error, Result};
use lin_reg::{LinReg, Regime, WeightedTikhonovRegularization};
use nalgebra::{DMatrix, DVector};
use nanorand::{Rng, WyRand};

use crate::{
    metrics::{self, DEFAULT_CONVERSION_FACTOR, DEFAULT_DIMENSIONS},
    Params,
};

/// The Weighted Extreme Learning Machine regressor.
///
/// Trained once on construction and immutable afterwards.
#[derive(Debug, Clone)]
pub struct WelmRegressor {
    params: Params,
    /// L x N, uniform in [-1, 1)
    input_weights: DMatrix<f64>,
    /// L, uniform in [0, 1)
    biases: DVector<f64>,
    /// M x L
    hidden_matrix: DMatrix<f64>,
    /// L x D
    output_weights: DMatrix<f64>,
    /// M x D
    trained_output: DMatrix<f64>,
    targets: DMatrix<f64>,
    regime: Regime,
}

impl WelmRegressor {
    /// Train a new regressor, with random initiallization of the hidden layer.
    /// Uses `params.seed` if given, otherwise a randomly seeded generator.
    ///
    /// # Arguments
    /// inputs: M x N, one fingerprint per row
    /// targets: M x D, one location per row
    /// weights: Optional M x M sample weight matrix, defaults to the identity
    pub fn new(
        params: Params,
        inputs: &DMatrix<f64>,
        targets: &DMatrix<f64>,
        weights: Option<&DMatrix<f64>>,
    ) -> Result<Self> {
        let mut rng = match params.seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };

        Self::with_rng(params, inputs, targets, weights, &mut rng)
    }

    /// Train a new regressor, drawing the hidden layer from the given generator
    pub fn with_rng(
        params: Params,
        inputs: &DMatrix<f64>,
        targets: &DMatrix<f64>,
        weights: Option<&DMatrix<f64>>,
        rng: &mut WyRand,
    ) -> Result<Self> {
        let (m, n) = inputs.shape();
        let l = params.hidden_size;
        if m == 0 || n == 0 {
            return Err(Error::shape("training inputs", (1, 1), inputs.shape()));
        }
        if targets.nrows() != m || targets.ncols() == 0 {
            return Err(Error::shape("targets", (m, targets.ncols().max(1)), targets.shape()));
        }
        if l == 0 {
            return Err(Error::shape("hidden layer", (m, 1), (m, l)));
        }
        let weights = match weights {
            Some(w) if w.shape() != (m, m) => {
                return Err(Error::shape("weight matrix", (m, m), w.shape()));
            }
            Some(w) => w.clone(),
            None => DMatrix::identity(m, m),
        };

        let input_weights = DMatrix::from_fn(l, n, |_, _| rng.generate::<f64>() * 2.0 - 1.0);
        let biases = DVector::from_fn(l, |_, _| rng.generate::<f64>());
        trace!("input_weights: {}\nbiases: {}", input_weights, biases);

        let hidden_matrix = hidden_layer_output(inputs, &input_weights, &biases, params.activation);

        let regressor = WeightedTikhonovRegularization::new(params.regularization_c);
        let regime = regressor.regime_for(m, l);
        let output_weights = regressor.fit_readout(&hidden_matrix, targets, &weights)?;
        let trained_output = &hidden_matrix * &output_weights;
        debug!(
            "trained {} regime with {} samples, {} inputs, {} hidden neurons, {} outputs",
            regime,
            m,
            n,
            l,
            targets.ncols()
        );

        Ok(Self {
            params,
            input_weights,
            biases,
            hidden_matrix,
            output_weights,
            trained_output,
            targets: targets.clone(),
            regime,
        })
    }

    /// Predict the outputs for each row of `inputs`
    pub fn project(&self, inputs: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        if inputs.ncols() != self.num_inputs() {
            return Err(Error::shape(
                "query inputs",
                (inputs.nrows(), self.num_inputs()),
                inputs.shape(),
            ));
        }
        let hidden =
            hidden_layer_output(inputs, &self.input_weights, &self.biases, self.params.activation);

        Ok(hidden * &self.output_weights)
    }

    /// RMSE of the fit on the training data
    pub fn trained_accuracy(&self) -> Result<f64> {
        metrics::rmse(&self.trained_output, &self.targets)
    }

    /// Average euclidean distance between the fit and the training targets
    pub fn trained_average_distance(&self) -> Result<f64> {
        metrics::average_euclidean_distance(
            &self.trained_output,
            &self.targets,
            DEFAULT_DIMENSIONS,
            DEFAULT_CONVERSION_FACTOR,
        )
    }

    #[inline(always)]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[inline(always)]
    pub fn input_weights(&self) -> &DMatrix<f64> {
        &self.input_weights
    }

    #[inline(always)]
    pub fn biases(&self) -> &DVector<f64> {
        &self.biases
    }

    /// Hidden layer output of the training inputs
    #[inline(always)]
    pub fn hidden_matrix(&self) -> &DMatrix<f64> {
        &self.hidden_matrix
    }

    #[inline(always)]
    pub fn output_weights(&self) -> &DMatrix<f64> {
        &self.output_weights
    }

    /// Predictions for the training inputs
    #[inline(always)]
    pub fn trained_output(&self) -> &DMatrix<f64> {
        &self.trained_output
    }

    /// The formulation the output weights were solved with
    #[inline(always)]
    pub fn regime(&self) -> Regime {
        self.regime
    }

    #[inline(always)]
    pub fn num_inputs(&self) -> usize {
        self.input_weights.ncols()
    }

    #[inline(always)]
    pub fn num_outputs(&self) -> usize {
        self.output_weights.ncols()
    }
}

/// H[i, j] = g(input_weights[j, :] . inputs[i, :] + biases[j])
fn hidden_layer_output(
    inputs: &DMatrix<f64>,
    input_weights: &DMatrix<f64>,
    biases: &DVector<f64>,
    activation: Activation,
) -> DMatrix<f64> {
    let mut h = inputs * input_weights.transpose();
    for (mut col, b) in h.column_iter_mut().zip(biases.iter()) {
        col.add_scalar_mut(*b);
    }
    activation.activate(h.as_mut_slice());

    h
}
