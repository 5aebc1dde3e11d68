use std::error::Error;

use plotters::prelude::*;

use crate::PlotGather;

/// Scatter plot of surveyed vs. predicted locations.
/// Each test prediction is joined to its surveyed location by a line.
pub fn plot_locations(
    gather: &PlotGather,
    filename: &str,
    dims: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    info!(
        "n_train: {}, n_test: {}",
        gather.train_targets().len(),
        gather.test_targets().len()
    );

    let ((x_min, x_max), (y_min, y_max)) =
        gather.bounds().ok_or("nothing to plot, no finite locations gathered")?;
    let pad = 0.05 * (x_max - x_min).max(y_max - y_min).max(1.0);
    info!("x: [{}, {}], y: [{}, {}]", x_min, x_max, y_min, y_max);

    let root_area = BitMapBackend::new(filename, dims).into_drawing_area();
    root_area.fill(&WHITE)?;
    let root_area = root_area.titled(filename, ("sans-serif", 20).into_font())?;

    let mut cc0 = ChartBuilder::on(&root_area)
        .margin(5)
        .set_all_label_area_size(50)
        .caption("locations", ("sans-serif", 30).into_font().with_color(&BLACK))
        .build_cartesian_2d((x_min - pad)..(x_max + pad), (y_min - pad)..(y_max + pad))?;
    cc0.configure_mesh()
        .x_labels(20)
        .y_labels(20)
        .x_label_formatter(&|v| format!("{:.1}", v))
        .y_label_formatter(&|v| format!("{:.1}", v))
        .draw()?;

    cc0.draw_series(
        gather
            .test_targets()
            .iter()
            .zip(gather.test_predictions())
            .map(|(t, p)| PathElement::new(vec![*t, *p], &GREEN.mix(0.4))),
    )?;
    cc0.draw_series(gather.train_targets().iter().map(|p| Circle::new(*p, 3, BLACK.filled())))?
        .label("surveyed")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLACK.filled()));
    cc0.draw_series(gather.train_predictions().iter().map(|p| Circle::new(*p, 3, &RED)))?
        .label("train_preds")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, &RED));
    cc0.draw_series(gather.test_predictions().iter().map(|p| Cross::new(*p, 4, &GREEN)))?
        .label("test_preds")
        .legend(|(x, y)| Cross::new((x + 10, y), 4, &GREEN));
    cc0.configure_series_labels().border_style(&BLACK).draw()?;

    root_area.present()?;
    info!("successfully plotted to {}", filename);

    Ok(())
}
