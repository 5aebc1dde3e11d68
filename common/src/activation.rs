use std::{fmt, str::FromStr};

use nalgebra::DMatrix;

use crate::Error;

/// The possible activation functions of the hidden layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
    /// clip(1 - |x|, 0, 1)
    Triangular,
    /// clip(|x|, 0, 1)
    InverseTriangular,
    /// 1 / (1 + e^-x)
    Sigmoid,
    /// 1 if x > 0, else 0
    HardLimit,
    /// clip(x, 0, 1)
    SoftLimit,
    /// The sine function
    Sine,
    /// The hyperbolic tangent
    Tanh,
}

impl Activation {
    /// Every activation function in the catalog
    pub const ALL: [Activation; 7] = [
        Activation::Triangular,
        Activation::InverseTriangular,
        Activation::Sigmoid,
        Activation::HardLimit,
        Activation::SoftLimit,
        Activation::Sine,
        Activation::Tanh,
    ];

    /// Evaluate the activation function for a single value.
    ///
    /// The sigmoid is split at zero so that `exp` is only ever called with a
    /// non-positive argument. It never overflows and saturates to exactly 0.0
    /// or 1.0 for large magnitudes.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Activation::Triangular => (1.0 - x.abs()).clamp(0.0, 1.0),
            Activation::InverseTriangular => x.abs().clamp(0.0, 1.0),
            Activation::Sigmoid => {
                if x >= 0.0 {
                    1.0 / (1.0 + (-x).exp())
                } else {
                    let e = x.exp();
                    e / (1.0 + e)
                }
            }
            Activation::HardLimit => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::SoftLimit => x.clamp(0.0, 1.0),
            Activation::Sine => x.sin(),
            Activation::Tanh => x.tanh(),
        }
    }

    /// Perform the activation function over all elements
    pub fn activate(&self, vals: &mut [f64]) {
        for v in vals {
            *v = self.eval(*v);
        }
    }

    /// Apply the activation elementwise, returning a matrix of the same shape
    pub fn apply(&self, m: &DMatrix<f64>) -> DMatrix<f64> {
        m.map(|v| self.eval(v))
    }

    /// Short name, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Triangular => "tribas",
            Activation::InverseTriangular => "inv_tribas",
            Activation::Sigmoid => "sigmoid",
            Activation::HardLimit => "hardlim",
            Activation::SoftLimit => "softlim",
            Activation::Sine => "sin",
            Activation::Tanh => "tanh",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activation::ALL
            .iter()
            .find(|a| a.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownActivation(s.to_string()))
    }
}
