use crate::error::Result;
use crate::figure::{Axis, Color, Corner, FigSize, Figure, LinePlot, LineStyle, Spine};
use crate::numerics::distribution::gaussian::Gaussian;
use crate::numerics::distribution::Distribution;
use crate::numerics::sample_curve::SampleCurve;

pub const POPULATION_LABEL: &str = "population";
pub const SAMPLE_MEAN_LABEL: &str = "sample mean";

#[derive(Clone, PartialEq, Debug)]
pub struct SamplingPlotOptions {
    pub mean: f64,
    pub stddev: f64,
    pub sample_size: u32,
    pub figsize: FigSize,
    /// Stretch the sampling distribution so its peak matches the population's.
    pub scaled: bool,
}

#[derive(Clone, PartialEq, Debug)]
pub struct SamplingCurves {
    pub population: SampleCurve,
    /// Density of the sample mean on the population's x-values, rescaled if requested.
    pub sample_mean: SampleCurve,
    pub sampling_distribution: Gaussian,
}

impl Default for SamplingPlotOptions {
    fn default() -> Self {
        Self {
            mean: 0.,
            stddev: 1.,
            sample_size: 30,
            figsize: super::DEFAULT_FIGSIZE,
            scaled: false,
        }
    }
}

/// Evaluate both curves of [`sampling_dist_plot`] without drawing them.
///
/// The sampling distribution is evaluated on the population's domain so both share the
/// x-axis, even though for large samples most of it is then close to zero. When `scaled`,
/// the peak is matched in log space, so a density too narrow to register on the grid still
/// comes out as a spike of the population's height.
///
/// # Errors
/// [`crate::error::PlotError::InvalidParameter`] if `stddev` is not positive, `sample_size`
/// is zero, or `mean` is not finite.
pub fn sampling_curves(options: &SamplingPlotOptions) -> Result<SamplingCurves> {
    let population = Gaussian::new(options.mean, options.stddev)?;
    let sampling_distribution = population.sampling_distribution(options.sample_size)?;

    let population_curve = SampleCurve::over_extent(&population)?;
    let xs = population_curve.xs.clone();
    let sample_mean = if options.scaled {
        SampleCurve::evaluate_with_peak(&sampling_distribution, xs, population_curve.max())
    } else {
        SampleCurve::evaluate_at(&sampling_distribution, xs)
    };

    Ok(SamplingCurves {
        population: population_curve,
        sample_mean,
        sampling_distribution,
    })
}

impl SamplingCurves {
    /// Draw the curves: both densities with a legend, and a dashed marker at the mean.
    #[must_use]
    pub fn figure(&self, figsize: FigSize) -> Figure {
        let mut figure = Figure::new(figsize);
        figure
            .plot(
                LinePlot::from_curve(&self.population)
                    .color(Color::TAB_BLUE)
                    .width(2.)
                    .label(POPULATION_LABEL),
            )
            .plot(
                LinePlot::from_curve(&self.sample_mean)
                    .color(Color::TAB_ORANGE)
                    .width(2.)
                    .label(SAMPLE_MEAN_LABEL),
            )
            .vline(
                self.sampling_distribution.mean(),
                0.,
                self.sample_mean.max(),
                Color::BLACK,
                LineStyle::Dashed,
            )
            .hide_spines(&[Spine::Top, Spine::Right, Spine::Left])
            .hide_ticks(Axis::Y)
            .legend(Corner::UpperRight);
        figure
    }
}

/// Plot the population density together with the distribution of the mean of
/// `sample_size` draws, marking the mean with a dashed line.
///
/// # Errors
/// See [`sampling_curves`].
pub fn sampling_dist_plot(options: &SamplingPlotOptions) -> Result<Figure> {
    let curves = sampling_curves(options)?;
    tracing::debug!(
        mean = options.mean,
        stddev = options.stddev,
        n = options.sample_size,
        scaled = options.scaled,
        "sampling distribution plot"
    );
    Ok(curves.figure(options.figsize))
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::plots::DEFAULT_FIGSIZE;
    use crate::error::PlotError;

    #[test]
    fn scaled_peaks_match() {
        let curves = sampling_curves(&SamplingPlotOptions {
            mean: 50.,
            stddev: 10.,
            sample_size: 25,
            scaled: true,
            ..SamplingPlotOptions::default()
        })
        .unwrap();
        approx::assert_relative_eq!(
            curves.sample_mean.max(),
            curves.population.max(),
            max_relative = 1e-12
        );
        assert_eq!(curves.sample_mean.xs, curves.population.xs);
    }

    #[test]
    fn scaled_peaks_match_for_huge_samples() {
        for sample_size in [1_000_000_000, u32::MAX] {
            let curves = sampling_curves(&SamplingPlotOptions {
                sample_size,
                scaled: true,
                ..SamplingPlotOptions::default()
            })
            .unwrap();
            let peak = curves.population.max();
            approx::assert_relative_eq!(curves.sample_mean.max(), peak, max_relative = 1e-9);
            // Only the samples next to the mean stand out.
            assert!(curves.sample_mean.ys.iter().filter(|&&y| y > 0.5 * peak).count() <= 2);

            let figure = curves.figure(DEFAULT_FIGSIZE);
            let marker = figure.lines().last().unwrap();
            approx::assert_relative_eq!(marker.points[1][1], peak, max_relative = 1e-9);
        }
    }

    #[test]
    fn unscaled_sampling_distribution_is_taller() {
        let curves = sampling_curves(&SamplingPlotOptions {
            sample_size: 4,
            ..SamplingPlotOptions::default()
        })
        .unwrap();
        approx::assert_abs_diff_eq!(curves.sampling_distribution.stddev(), 0.5);
        // Half the spread, twice the height.
        approx::assert_relative_eq!(
            curves.sample_mean.max(),
            2. * curves.population.max(),
            max_relative = 1e-4
        );
        approx::assert_abs_diff_eq!(curves.sample_mean.integrate(), 1., epsilon = 1e-6);
    }

    #[test]
    fn single_draw_matches_population() {
        for scaled in [false, true] {
            let curves = sampling_curves(&SamplingPlotOptions {
                mean: -3.,
                stddev: 2.,
                sample_size: 1,
                scaled,
                ..SamplingPlotOptions::default()
            })
            .unwrap();
            assert_eq!(curves.sample_mean.xs, curves.population.xs);
            for (a, b) in curves.sample_mean.ys.iter().zip(&curves.population.ys) {
                approx::assert_relative_eq!(*a, *b, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn rejects_invalid_parameters() {
        let zero_samples = sampling_dist_plot(&SamplingPlotOptions {
            sample_size: 0,
            ..SamplingPlotOptions::default()
        });
        assert!(matches!(
            zero_samples,
            Err(PlotError::InvalidParameter {
                name: "sample_size",
                ..
            })
        ));
        let negative_spread = sampling_dist_plot(&SamplingPlotOptions {
            stddev: -1.,
            ..SamplingPlotOptions::default()
        });
        assert!(matches!(
            negative_spread,
            Err(PlotError::InvalidParameter { name: "stddev", .. })
        ));
    }

    #[test]
    fn figure_layout() {
        let options = SamplingPlotOptions {
            scaled: true,
            ..SamplingPlotOptions::default()
        };
        let figure = sampling_dist_plot(&options).unwrap();
        let curves = sampling_curves(&options).unwrap();
        assert_eq!(curves.figure(options.figsize), figure);
        let lines = figure.lines().collect_vec();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].label.as_deref(), Some(POPULATION_LABEL));
        assert_eq!(lines[1].label.as_deref(), Some(SAMPLE_MEAN_LABEL));

        let marker = lines[2];
        assert_eq!(marker.style, LineStyle::Dashed);
        assert!(marker.label.is_none());
        assert_eq!(marker.points[0], [0., 0.]);
        let sample_peak = lines[1].points.iter().map(|p| p[1]).fold(0., f64::max);
        assert!(marker.points[1] == [0., sample_peak]);

        let chrome = figure.chrome();
        assert!(chrome.spine(Spine::Bottom));
        assert!(!chrome.spine(Spine::Top));
        assert!(!chrome.spine(Spine::Right));
        assert!(!chrome.spine(Spine::Left));
        assert!(chrome.ticks(Axis::X));
        assert!(!chrome.ticks(Axis::Y));
        assert_eq!(figure.legend_corner(), Some(Corner::UpperRight));
    }
}
