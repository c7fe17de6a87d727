use std::fmt;
use std::str::FromStr;

use crate::error::{PlotError, Result};
use crate::figure::{Annotation, Color, FigSize, Figure, HAlign, LinePlot, LineStyle, VAlign};
use crate::numerics::distribution::gaussian::Gaussian;
use crate::numerics::distribution::Distribution;
use crate::numerics::sample_curve::SampleCurve;

/// Font size of the boundary labels; the mean label is two points smaller.
pub const LABEL_FONT_SIZE: f32 = 24.;
pub const MEAN_FONT_SIZE: f32 = LABEL_FONT_SIZE - 2.;

/// Room left below the x-axis for boundary labels, as a fraction of the plot height.
const BELOW_AXIS: f64 = 0.1;
const LABEL_DROP: f64 = 0.01;
/// Height at which the mean marker starts, clearing the mean label.
const MEAN_MARKER_BASE: f64 = 0.075;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ShadeMode {
    #[default]
    Inside,
    Outside,
    None,
}

#[derive(Clone, Copy, PartialEq, Debug)]
/// The part of the x-axis to shade, with missing bounds already resolved.
pub enum ShadeRegion {
    /// `lower <= x <= upper`.
    Inside(f64, f64),
    /// `x <= lower` and `x >= upper`, each shaded separately.
    Outside(f64, f64),
    None,
}

#[derive(Clone, PartialEq, Debug)]
pub struct AreaPlotOptions {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub mean: f64,
    pub stddev: f64,
    /// Fill colour of the shaded region.
    pub color: Color,
    pub figsize: FigSize,
    pub shade: ShadeMode,
    pub mean_color: Color,
    /// Whether to mark the mean. When unset, the mean is marked iff it is nonzero.
    pub mark_mean: Option<bool>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ShadeSummary {
    pub region: ShadeRegion,
    /// `(xmin, xmax)` of the plotted curve.
    pub domain: (f64, f64),
    /// Exact probability of the shaded region.
    pub probability: f64,
    /// Trapezoidal area of the shaded fills as drawn.
    pub shaded_area: f64,
}

impl ShadeMode {
    pub const ALL: [ShadeMode; 3] = [Self::Inside, Self::Outside, Self::None];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
            Self::None => "none",
        }
    }
}

impl FromStr for ShadeMode {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlotError::InvalidShadeMode(s.to_owned()))
    }
}

impl fmt::Display for ShadeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ShadeRegion {
    /// Resolve missing bounds to the ends of `domain`.
    #[must_use]
    pub fn resolve(
        mode: ShadeMode,
        lower: Option<f64>,
        upper: Option<f64>,
        (xmin, xmax): (f64, f64),
    ) -> Self {
        let lower = lower.unwrap_or(xmin);
        let upper = upper.unwrap_or(xmax);
        match mode {
            ShadeMode::Inside => Self::Inside(lower, upper),
            ShadeMode::Outside => Self::Outside(lower, upper),
            ShadeMode::None => Self::None,
        }
    }

    /// The pieces of `curve` to fill.
    #[must_use]
    pub fn fills(&self, curve: &SampleCurve) -> Vec<SampleCurve> {
        match *self {
            Self::Inside(lower, upper) => vec![curve.masked(|x| x >= lower && x <= upper)],
            Self::Outside(lower, upper) => {
                vec![curve.masked(|x| x <= lower), curve.masked(|x| x >= upper)]
            }
            Self::None => vec![],
        }
    }

    /// Probability mass of the region under `distribution`.
    #[must_use]
    pub fn probability(&self, distribution: &impl Distribution) -> f64 {
        match *self {
            Self::Inside(lower, upper) => distribution.probability_between(lower, upper),
            Self::Outside(lower, upper) => {
                distribution.cdf(lower) + (1. - distribution.cdf(upper))
            }
            Self::None => 0.,
        }
    }
}

impl Default for AreaPlotOptions {
    fn default() -> Self {
        Self {
            lower: None,
            upper: None,
            mean: 0.,
            stddev: 1.,
            color: Color::CORNFLOWER_BLUE,
            figsize: super::DEFAULT_FIGSIZE,
            shade: ShadeMode::Inside,
            mean_color: Color::WHITE,
            mark_mean: None,
        }
    }
}

impl AreaPlotOptions {
    fn distribution(&self) -> Result<Gaussian> {
        for (name, bound) in [("lower", self.lower), ("upper", self.upper)] {
            if let Some(value) = bound {
                super::ensure_finite(name, value)?;
            }
        }
        Gaussian::new(self.mean, self.stddev)
    }

    fn marks_mean(&self) -> bool {
        self.mark_mean.unwrap_or(self.mean.abs() != 0.)
    }
}

/// Plot the density of `N(mean, stddev²)` with the region selected by `options.shade` filled.
///
/// Each provided bound gets a vertical line up to the curve and a numeric label below the
/// axis. All axis chrome is hidden.
///
/// # Errors
/// [`PlotError::InvalidParameter`] if `stddev` is not positive or any value is not finite.
pub fn unknown_area_plot(options: &AreaPlotOptions) -> Result<Figure> {
    unknown_area_plot_with_summary(options).map(|(figure, _)| figure)
}

/// As [`unknown_area_plot`], also reporting what was shaded.
///
/// # Errors
/// See [`unknown_area_plot`].
pub fn unknown_area_plot_with_summary(
    options: &AreaPlotOptions,
) -> Result<(Figure, ShadeSummary)> {
    let distribution = options.distribution()?;
    let curve = SampleCurve::over_extent(&distribution)?;
    let domain = curve
        .x_range()
        .ok_or_else(|| PlotError::invalid_parameter("samples", curve.len()))?;
    tracing::debug!(
        mean = options.mean,
        stddev = options.stddev,
        xmin = domain.0,
        xmax = domain.1,
        "area plot"
    );

    let mut figure = Figure::new(options.figsize);
    figure.plot(LinePlot::from_curve(&curve).color(Color::BLACK));
    // The x-axis.
    figure.plot(
        LinePlot::new(vec![[domain.0, 0.], [domain.1, 0.]])
            .color(Color::BLACK)
            .width(1.),
    );

    let (_, ymax) = figure.ylim();
    figure.set_ylim(-BELOW_AXIS * ymax, ymax);

    for value in [options.lower, options.upper].into_iter().flatten() {
        figure
            .annotate(
                Annotation::new([value, -LABEL_DROP * ymax], value.to_string())
                    .align(HAlign::Center, VAlign::Top)
                    .font_size(LABEL_FONT_SIZE),
            )
            .vline(value, 0., distribution.pdf(value), Color::BLACK, LineStyle::Solid);
    }

    if options.marks_mean() {
        let μ = options.mean;
        figure
            .annotate(
                Annotation::new([μ, 0.], μ.to_string())
                    .align(HAlign::Center, VAlign::Bottom)
                    .color(options.mean_color)
                    .font_size(MEAN_FONT_SIZE),
            )
            .vline(
                μ,
                MEAN_MARKER_BASE * ymax,
                distribution.pdf(μ),
                options.mean_color,
                LineStyle::Dashed,
            );
    }

    let region = ShadeRegion::resolve(options.shade, options.lower, options.upper, domain);
    tracing::debug!(?region, "shading");
    let mut shaded_area = 0.;
    for fill in region.fills(&curve) {
        shaded_area += fill.integrate();
        figure.fill_between(fill, options.color);
    }

    figure.axis_off();

    let summary = ShadeSummary {
        region,
        domain,
        probability: region.probability(&distribution),
        shaded_area,
    };
    Ok((figure, summary))
}
