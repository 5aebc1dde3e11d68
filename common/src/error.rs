use thiserror::Error;

/// Convenience alias used throughout the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when fitting or querying a model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Row or column counts that do not line up
    #[error("invalid shape for {context}: expected {expected}, found {found}")]
    InvalidShape {
        /// What was being checked
        context: &'static str,
        /// The shape that was required
        expected: String,
        /// The shape that was supplied
        found: String,
    },

    /// The least squares solver could not produce a finite solution
    #[error("numerical failure: {0}")]
    NumericalFailure(String),

    /// A scalar parameter outside of its valid range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Activation name not part of the catalog
    #[error("unknown activation function: {0}")]
    UnknownActivation(String),
}

impl Error {
    /// Shorthand for building an `InvalidShape` error from two `(rows, cols)` pairs
    pub fn shape(
        context: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Self {
        Error::InvalidShape {
            context,
            expected: format!("({}, {})", expected.0, expected.1),
            found: format!("({}, {})", found.0, found.1),
        }
    }
}
