#[macro_use]
extern crate log;

mod plot;
mod plot_gather;

pub use plot::plot_locations;
pub use plot_gather::PlotGather;

/// Points in the plane
pub type Series = Vec<(f64, f64)>;
