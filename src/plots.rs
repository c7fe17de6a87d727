//! The two teaching illustrations: a shaded area under a normal curve, and a population
//! against the sampling distribution of its mean.

pub mod area;
pub mod sampling;

pub use area::{
    unknown_area_plot, unknown_area_plot_with_summary, AreaPlotOptions, ShadeMode, ShadeRegion,
    ShadeSummary,
};
pub use sampling::{sampling_curves, sampling_dist_plot, SamplingCurves, SamplingPlotOptions};

use crate::error::{PlotError, Result};
use crate::figure::FigSize;

pub const DEFAULT_FIGSIZE: FigSize = (10., 6.);

fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlotError::invalid_parameter(name, value))
    }
}
