use common::{Error, Result};
use nalgebra::DMatrix;

use super::{LeastSquaresSolver, LinReg, Regime, SvdSolver};

/// Weighted Tikhonov regularization aka weighted ridge regression.
/// Each sample contributes to the fit according to the weight matrix, and the
/// ridge term `I / C` keeps the system solvable even when the design is
/// rank deficient.
#[derive(Debug, Clone)]
pub struct WeightedTikhonovRegularization<S = SvdSolver> {
    /// Hyperparameter C. Larger values mean weaker regularization
    pub regularization_c: f64,
    /// Solves the regularized linear system
    pub solver: S,
}

impl WeightedTikhonovRegularization {
    /// Create a new regressor using the SVD based least squares solver
    pub fn new(regularization_c: f64) -> Self {
        Self {
            regularization_c,
            solver: SvdSolver,
        }
    }
}

impl<S: LeastSquaresSolver> WeightedTikhonovRegularization<S> {
    /// Create a new regressor with a custom least squares solver
    pub fn with_solver(regularization_c: f64, solver: S) -> Self {
        Self {
            regularization_c,
            solver,
        }
    }

    /// Fit the readout using the given formulation, regardless of the design's shape.
    ///
    /// Wide:  beta = H^T * solve(W * H * H^T + I_M / C, W * T)
    /// Tall:  beta = solve(H^T * W * H + I_L / C, H^T * W * T)
    pub fn fit_with_regime(
        &self,
        regime: Regime,
        design: &DMatrix<f64>,
        targets: &DMatrix<f64>,
        weights: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>> {
        check_shapes(design, targets, weights)?;
        if !self.regularization_c.is_finite() || self.regularization_c <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "regularization constant C must be positive and finite, got {}",
                self.regularization_c
            )));
        }
        let inv_c = 1.0 / self.regularization_c;

        debug!(
            "fitting readout in {} regime: design: ({}, {}), targets: ({}, {})",
            regime,
            design.nrows(),
            design.ncols(),
            targets.nrows(),
            targets.ncols()
        );

        match regime {
            Regime::Wide => {
                let m = design.nrows();
                let system =
                    weights * design * design.transpose() + DMatrix::<f64>::identity(m, m) * inv_c;
                let rhs = weights * targets;

                let p = self.solver.solve(&system, &rhs)?;

                Ok(design.transpose() * p)
            }
            Regime::Tall => {
                let l = design.ncols();
                let ht_w = design.transpose() * weights;
                let system = &ht_w * design + DMatrix::<f64>::identity(l, l) * inv_c;
                let rhs = ht_w * targets;

                self.solver.solve(&system, &rhs)
            }
        }
    }
}

impl<S: LeastSquaresSolver> LinReg for WeightedTikhonovRegularization<S> {
    fn fit_readout(
        &self,
        design: &DMatrix<f64>,
        targets: &DMatrix<f64>,
        weights: &DMatrix<f64>,
    ) -> Result<DMatrix<f64>> {
        let regime = self.regime_for(design.nrows(), design.ncols());
        self.fit_with_regime(regime, design, targets, weights)
    }
}

fn check_shapes(
    design: &DMatrix<f64>,
    targets: &DMatrix<f64>,
    weights: &DMatrix<f64>,
) -> Result<()> {
    let m = design.nrows();
    if m == 0 || design.ncols() == 0 {
        return Err(Error::shape("design matrix", (1, 1), design.shape()));
    }
    if targets.nrows() != m || targets.ncols() == 0 {
        return Err(Error::shape("targets", (m, targets.ncols().max(1)), targets.shape()));
    }
    if weights.shape() != (m, m) {
        return Err(Error::shape("weight matrix", (m, m), weights.shape()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use round::round;

    use super::*;

    /// Records every system it is asked to solve
    #[derive(Debug, Clone, Default)]
    struct RecordingSolver {
        calls: RefCell<Vec<(DMatrix<f64>, DMatrix<f64>)>>,
    }

    impl LeastSquaresSolver for RecordingSolver {
        fn solve(&self, a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>> {
            self.calls.borrow_mut().push((a.clone(), b.clone()));
            SvdSolver.solve(a, b)
        }
    }

    fn design() -> DMatrix<f64> {
        // Note the first column being just ones
        DMatrix::from_row_slice(
            4,
            3,
            &[1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 2.0, 1.0, 1.0, 3.0, 2.0],
        )
    }

    fn targets() -> DMatrix<f64> {
        DMatrix::from_row_slice(4, 1, &[1.0, 2.0, 3.0, 4.0])
    }

    /// Deterministic, well spread values without needing a random generator
    fn pseudo_random(rows: usize, cols: usize, phase: f64) -> DMatrix<f64> {
        DMatrix::from_fn(rows, cols, |i, j| ((i * cols + j) as f64 * 1.7 + phase).sin())
    }

    #[test]
    fn tikhonov_regularization() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let design = design();
        let targets = targets();
        let weights = DMatrix::<f64>::identity(4, 4);
        info!("design: {}, targets: {}", design, targets);

        let regressor = WeightedTikhonovRegularization::new(1e12);
        let mut readout_matrix = regressor.fit_readout(&design, &targets, &weights).unwrap();
        info!("readout_matrix: {}", readout_matrix);

        // round readout
        readout_matrix.iter_mut().for_each(|v| *v = round(*v, 1));

        assert_eq!(readout_matrix, DMatrix::from_row_slice(3, 1, &[1.0, 1.0, 0.0]))
    }

    #[test]
    fn tikhonov_regularization_shifted() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let design = design() * 100.0;
        let targets = targets() * 100.0;
        let weights = DMatrix::<f64>::identity(4, 4);

        let regressor = WeightedTikhonovRegularization::new(1e12);
        let mut readout_matrix = regressor.fit_readout(&design, &targets, &weights).unwrap();
        info!("readout_matrix: {}", readout_matrix);

        readout_matrix.iter_mut().for_each(|v| *v = round(*v, 1));

        assert_eq!(readout_matrix, DMatrix::from_row_slice(3, 1, &[1.0, 1.0, 0.0]))
    }

    /// Extract the last row of the design and perform a readout from it
    #[test]
    fn readout_from_state() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let design = design();
        let targets = targets();
        let weights = DMatrix::<f64>::identity(4, 4);

        let regressor = WeightedTikhonovRegularization::new(1e12);
        let readout = regressor.fit_readout(&design, &targets, &weights).unwrap();

        let state = design.rows(3, 1).into_owned();
        let o = state * readout;
        info!("o: {}", o);

        assert_eq!(round(o[(0, 0)], 6), 4.0);
    }

    #[test]
    fn zero_weight_ignores_outlier() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let mut design = design().insert_row(4, 1.0);
        design[(4, 1)] = 4.0;
        design[(4, 2)] = 3.0;
        let targets = targets().insert_row(4, 100.0);
        let weights = DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![
            1.0, 1.0, 1.0, 1.0, 0.0,
        ]));

        let regressor = WeightedTikhonovRegularization::new(1e12);
        let mut readout_matrix = regressor.fit_readout(&design, &targets, &weights).unwrap();
        readout_matrix.iter_mut().for_each(|v| *v = round(*v, 1));

        assert_eq!(readout_matrix, DMatrix::from_row_slice(3, 1, &[1.0, 1.0, 0.0]));

        // with uniform weights the outlier drags the fit away
        let unweighted = regressor
            .fit_readout(&design, &targets, &DMatrix::<f64>::identity(5, 5))
            .unwrap();
        assert!((unweighted[(1, 0)] - 1.0).abs() > 0.1);
    }

    #[test]
    fn wide_regime_interpolates() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // 2 samples, 3 hidden neurons
        let design = DMatrix::from_row_slice(2, 3, &[1.0, 0.5, -0.5, 1.0, -1.0, 2.0]);
        let targets = DMatrix::from_row_slice(2, 2, &[3.0, -1.0, 0.5, 2.0]);
        let weights = DMatrix::<f64>::identity(2, 2);

        let regressor = WeightedTikhonovRegularization::new(1e10);
        assert_eq!(regressor.regime_for(2, 3), Regime::Wide);

        let readout = regressor.fit_readout(&design, &targets, &weights).unwrap();
        assert_eq!(readout.shape(), (3, 2));

        let mut fitted = design * readout;
        fitted.iter_mut().for_each(|v| *v = round(*v, 4));
        assert_eq!(fitted, targets);
    }

    #[test]
    fn regimes_are_equivalent() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // both a tall and a wide design, each solved both ways
        for (m, l) in [(8, 5), (5, 8), (6, 6)] {
            let design = pseudo_random(m, l, 0.3);
            let targets = pseudo_random(m, 2, 1.1);
            let weights = DMatrix::from_diagonal(&nalgebra::DVector::from_fn(m, |i, _| {
                0.5 + i as f64 / m as f64
            }));

            let regressor = WeightedTikhonovRegularization::new(2.0);
            let wide = regressor.fit_with_regime(Regime::Wide, &design, &targets, &weights).unwrap();
            let tall = regressor.fit_with_regime(Regime::Tall, &design, &targets, &weights).unwrap();
            debug!("wide: {}, tall: {}", wide, tall);

            assert_eq!(wide.shape(), (l, 2));
            assert_eq!(tall.shape(), (l, 2));
            let max_diff = (wide - tall).abs().max();
            assert!(max_diff < 1e-9, "max_diff: {}", max_diff);
        }
    }

    #[test]
    fn equal_sizes_solve_in_feature_space() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let design = pseudo_random(4, 4, 0.7);
        let targets = pseudo_random(4, 2, 2.0);
        let weights = DMatrix::<f64>::identity(4, 4);

        let regressor = WeightedTikhonovRegularization::with_solver(1.0, RecordingSolver::default());
        let _ = regressor.fit_readout(&design, &targets, &weights).unwrap();

        let calls = regressor.solver.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (system, rhs) = &calls[0];
        let expected_system =
            design.transpose() * &design + DMatrix::<f64>::identity(4, 4);
        assert!((system - expected_system).abs().max() < 1e-12);
        assert!((rhs - design.transpose() * &targets).abs().max() < 1e-12);
    }

    #[test]
    fn fewer_samples_solve_in_sample_space() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let design = pseudo_random(3, 7, 0.7);
        let targets = pseudo_random(3, 2, 2.0);
        let weights = DMatrix::<f64>::identity(3, 3);

        let regressor = WeightedTikhonovRegularization::with_solver(1.0, RecordingSolver::default());
        let readout = regressor.fit_readout(&design, &targets, &weights).unwrap();
        assert_eq!(readout.shape(), (7, 2));

        let calls = regressor.solver.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.shape(), (3, 3));
        assert_eq!(calls[0].1, targets);
    }

    #[test]
    fn invalid_shapes() {
        let regressor = WeightedTikhonovRegularization::new(1.0);
        let design = design();

        let short_targets = DMatrix::from_element(3, 1, 1.0);
        assert!(matches!(
            regressor.fit_readout(&design, &short_targets, &DMatrix::identity(4, 4)),
            Err(Error::InvalidShape { .. })
        ));

        let non_square = DMatrix::from_element(4, 3, 1.0);
        assert!(matches!(
            regressor.fit_readout(&design, &targets(), &non_square),
            Err(Error::InvalidShape { .. })
        ));

        let wrong_size = DMatrix::<f64>::identity(5, 5);
        assert!(matches!(
            regressor.fit_readout(&design, &targets(), &wrong_size),
            Err(Error::InvalidShape { .. })
        ));
    }

    #[test]
    fn invalid_regularization() {
        let weights = DMatrix::<f64>::identity(4, 4);
        for c in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let regressor = WeightedTikhonovRegularization::new(c);
            assert!(matches!(
                regressor.fit_readout(&design(), &targets(), &weights),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn non_finite_design() {
        let mut design = design();
        design[(2, 1)] = f64::NAN;

        let regressor = WeightedTikhonovRegularization::new(1.0);
        assert!(matches!(
            regressor.fit_readout(&design, &targets(), &DMatrix::identity(4, 4)),
            Err(Error::NumericalFailure(_))
        ));
    }
}
