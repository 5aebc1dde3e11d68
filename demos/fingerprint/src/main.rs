#[macro_use]
extern crate log;

use std::{error::Error, time::Instant};

use dialoguer::{theme::ColorfulTheme, Select};
use nanorand::WyRand;
use welm::{
    diagonal_weights,
    metrics::{self, DEFAULT_CONVERSION_FACTOR, DEFAULT_DIMENSIONS},
    Activation, Params, WelmRegressor,
};
use welm_plot::{plot_locations, PlotGather};

mod survey;

use survey::Survey;

const GRID_STEP: f64 = 1.0;
const NUM_TEST_POINTS: usize = 200;
const HIDDEN_SIZE: usize = 300;
const REGULARIZATION_C: f64 = 100.0;
const SEED: Option<u64> = Some(0);

pub(crate) fn main() {
    pretty_env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut rng = WyRand::new_seed(SEED.unwrap_or_default());
    let train = Survey::grid(GRID_STEP, &mut rng);
    let test = Survey::random(NUM_TEST_POINTS, &mut rng);
    info!("got {} training and {} test locations", train.locations.nrows(), test.locations.nrows());

    let activations: Vec<&str> = Activation::ALL.iter().map(|a| a.name()).collect();
    let e = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select hidden layer activation")
        .items(&activations)
        .default(2)
        .interact()?;
    let activation = Activation::ALL[e];

    let params = Params {
        hidden_size: HIDDEN_SIZE,
        regularization_c: REGULARIZATION_C,
        activation,
        seed: SEED,
    };
    let inputs = train.features();
    let weights = diagonal_weights(&train.confidences());

    let t0 = Instant::now();
    let welm = WelmRegressor::new(params, &inputs, &train.locations, Some(&weights))?;
    info!("training done in {}ms, {} regime", t0.elapsed().as_millis(), welm.regime());
    info!(
        "trained rmse: {:.4}, trained aed: {:.4}m",
        welm.trained_accuracy()?,
        welm.trained_average_distance()?
    );

    let predictions = welm.project(&test.features())?;
    let distances = metrics::euclidean_distances(
        &predictions,
        &test.locations,
        DEFAULT_DIMENSIONS,
        DEFAULT_CONVERSION_FACTOR,
    )?;
    info!(
        "test rmse: {:.4}, test aed: {:.4}m",
        metrics::rmse(&predictions, &test.locations)?,
        metrics::average_euclidean_distance(
            &predictions,
            &test.locations,
            DEFAULT_DIMENSIONS,
            DEFAULT_CONVERSION_FACTOR
        )?
    );
    let mut sorted = distances.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    info!(
        "test error median: {:.4}m, p90: {:.4}m, max: {:.4}m",
        percentile(&sorted, 0.5),
        percentile(&sorted, 0.9),
        percentile(&sorted, 1.0)
    );

    let mut gather = PlotGather::default();
    for (t, p) in train.locations.row_iter().zip(welm.trained_output().row_iter()) {
        gather.push_train((t[0], t[1]), (p[0], p[1]));
    }
    for (t, p) in test.locations.row_iter().zip(predictions.row_iter()) {
        gather.push_test((t[0], t[1]), (p[0], p[1]));
    }
    std::fs::create_dir_all("img")?;
    plot_locations(&gather, &format!("img/fingerprint_{}.png", activation), (1440, 1440))?;

    Ok(())
}

/// `q` quantile of already sorted values
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    sorted[idx]
}
