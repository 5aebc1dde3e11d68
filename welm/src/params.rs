use common::Activation;

/// The parameters of the Weighted Extreme Learning Machine
#[derive(Debug, Clone)]
pub struct Params {
    /// Number of neurons in the hidden layer (L)
    pub hidden_size: usize,
    /// Ridge hyperparameter C, the identity scaled by 1 / C is added to the
    /// system being solved. Larger values mean weaker regularization
    pub regularization_c: f64,
    /// Activation function of the hidden layer
    pub activation: Activation,
    /// Optional seed for Rng
    pub seed: Option<u64>,
}
