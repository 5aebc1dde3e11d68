use crate::Series;

/// Collects surveyed locations alongside the locations predicted for them
#[derive(Debug, Clone, Default)]
pub struct PlotGather {
    train_targets: Series,
    train_predictions: Series,
    test_targets: Series,
    test_predictions: Series,
}

impl PlotGather {
    #[inline(always)]
    pub fn push_train(&mut self, target: (f64, f64), prediction: (f64, f64)) {
        self.train_targets.push(target);
        self.train_predictions.push(prediction);
    }

    #[inline(always)]
    pub fn push_test(&mut self, target: (f64, f64), prediction: (f64, f64)) {
        self.test_targets.push(target);
        self.test_predictions.push(prediction);
    }

    #[inline(always)]
    pub fn train_targets(&self) -> &Series {
        &self.train_targets
    }

    #[inline(always)]
    pub fn train_predictions(&self) -> &Series {
        &self.train_predictions
    }

    #[inline(always)]
    pub fn test_targets(&self) -> &Series {
        &self.test_targets
    }

    #[inline(always)]
    pub fn test_predictions(&self) -> &Series {
        &self.test_predictions
    }

    /// Smallest rectangle containing every gathered point, as (x range, y range)
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self
            .train_targets
            .iter()
            .chain(&self.train_predictions)
            .chain(&self.test_targets)
            .chain(&self.test_predictions)
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let &(x0, y0) = points.next()?;
        Some(points.fold(((x0, x0), (y0, y0)), |((x_min, x_max), (y_min, y_max)), &(x, y)| {
            ((x_min.min(x), x_max.max(x)), (y_min.min(y), y_max.max(y)))
        }))
    }
}
