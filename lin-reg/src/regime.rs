use std::fmt;

/// Which of the two equivalent ridge formulations gets solved.
///
/// Both give the same output weights, they only differ in the size of the
/// linear system: `Wide` solves in sample space (M x M), `Tall` in hidden
/// feature space (L x L).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Fewer training samples than hidden neurons
    Wide,
    /// At least as many training samples as hidden neurons
    Tall,
}

impl Regime {
    /// Pick the smaller system for M samples and L hidden neurons
    #[inline(always)]
    pub fn select(num_samples: usize, num_hidden: usize) -> Self {
        if num_samples < num_hidden {
            Regime::Wide
        } else {
            Regime::Tall
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Wide => f.write_str("wide"),
            Regime::Tall => f.write_str("tall"),
        }
    }
}
