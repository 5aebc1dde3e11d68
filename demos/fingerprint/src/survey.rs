//! Synthetic received signal strength survey of an indoor floor

use nalgebra::DMatrix;
use nanorand::{Rng, WyRand};

/// Side length of the square floor in meters
pub const FLOOR_SIZE: f64 = 20.0;

/// Substituted for access points that were not heard at all
pub const MISSING_SIGNAL: f64 = -100.0;

/// Access point positions in meters
const ACCESS_POINTS: [(f64, f64); 6] = [
    (0.0, 0.0),
    (20.0, 0.0),
    (0.0, 20.0),
    (20.0, 20.0),
    (10.0, 10.0),
    (5.0, 15.0),
];

/// Received power at 1m in dBm
const TX_POWER: f64 = -40.0;
const PATH_LOSS_EXPONENT: f64 = 2.7;
/// Standard deviation of the shadowing noise in dB
const SHADOWING_DB: f64 = 4.0;
/// Readings weaker than this are not reported by the receiver
const DETECTION_THRESHOLD: f64 = -85.0;

/// One walk through the floor
#[derive(Debug, Clone)]
pub struct Survey {
    /// Signal strength in dBm, one row per location, one column per access point.
    /// Access points that were not heard are NaN.
    pub rssi: DMatrix<f64>,
    /// Surveyed x, y coordinates in meters
    pub locations: DMatrix<f64>,
}

impl Survey {
    /// Survey a regular grid, `step` meters apart
    pub fn grid(step: f64, rng: &mut WyRand) -> Self {
        let n = (FLOOR_SIZE / step) as usize + 1;
        let points: Vec<(f64, f64)> = (0..n * n)
            .map(|i| ((i / n) as f64 * step, (i % n) as f64 * step))
            .collect();

        Self::at(&points, rng)
    }

    /// Survey uniformly random locations
    pub fn random(num_points: usize, rng: &mut WyRand) -> Self {
        let points: Vec<(f64, f64)> = (0..num_points)
            .map(|_| (rng.generate::<f64>() * FLOOR_SIZE, rng.generate::<f64>() * FLOOR_SIZE))
            .collect();

        Self::at(&points, rng)
    }

    fn at(points: &[(f64, f64)], rng: &mut WyRand) -> Self {
        let locations = DMatrix::from_fn(points.len(), 2, |i, j| {
            if j == 0 {
                points[i].0
            } else {
                points[i].1
            }
        });
        let rssi = DMatrix::from_fn(points.len(), ACCESS_POINTS.len(), |i, j| {
            let (x, y) = points[i];
            let (ax, ay) = ACCESS_POINTS[j];
            let d = ((x - ax).powi(2) + (y - ay).powi(2)).sqrt().max(1.0);
            let rssi = TX_POWER - 10.0 * PATH_LOSS_EXPONENT * d.log10() + gaussian(rng) * SHADOWING_DB;
            if rssi < DETECTION_THRESHOLD {
                f64::NAN
            } else {
                rssi
            }
        });

        Self { rssi, locations }
    }

    /// Fraction of access points heard at each location
    pub fn confidences(&self) -> Vec<f64> {
        self.rssi
            .row_iter()
            .map(|row| row.iter().filter(|v| !v.is_nan()).count() as f64 / row.len() as f64)
            .collect()
    }

    /// Replace missing readings with `MISSING_SIGNAL` and scale into [0, 1]
    pub fn features(&self) -> DMatrix<f64> {
        let mut features = self.rssi.clone();
        fill_missing(&mut features, MISSING_SIGNAL);
        features.apply(|v| *v = ((*v - MISSING_SIGNAL) / (TX_POWER - MISSING_SIGNAL)).max(0.0));

        features
    }
}

/// Substitute `sentinel` for every NaN
pub fn fill_missing(m: &mut DMatrix<f64>, sentinel: f64) {
    m.iter_mut().filter(|v| v.is_nan()).for_each(|v| *v = sentinel);
}

/// Approximately standard normal, sum of 12 uniforms
fn gaussian(rng: &mut WyRand) -> f64 {
    (0..12).map(|_| rng.generate::<f64>()).sum::<f64>() - 6.0
}
