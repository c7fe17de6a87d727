use statrs::distribution::{Continuous, ContinuousCDF, Normal};

use super::Distribution;
use crate::error::{PlotError, Result};

#[derive(Clone, Copy, PartialEq, Debug)]
/// A normal distribution `N(μ, σ²)`.
pub struct Gaussian {
    μ: f64,
    σ: f64,
    normal: Normal,
}

impl Gaussian {
    /// # Errors
    /// `σ` must be positive and both parameters finite.
    pub fn new(μ: f64, σ: f64) -> Result<Self> {
        if !μ.is_finite() {
            return Err(PlotError::invalid_parameter("mean", μ));
        }
        if !(σ.is_finite() && σ > 0.) {
            return Err(PlotError::invalid_parameter("stddev", σ));
        }
        let normal = Normal::new(μ, σ).map_err(|_| PlotError::invalid_parameter("stddev", σ))?;
        Ok(Self { μ, σ, normal })
    }

    #[must_use]
    pub fn standard() -> Self {
        Self {
            μ: 0.,
            σ: 1.,
            normal: Normal::standard(),
        }
    }

    /// Distribution of the mean of `n` independent draws from `self`.
    ///
    /// # Errors
    /// `n` must be at least one.
    pub fn sampling_distribution(&self, n: u32) -> Result<Self> {
        if n == 0 {
            return Err(PlotError::invalid_parameter("sample_size", n));
        }
        Self::new(self.μ, self.σ / f64::from(n).sqrt())
    }
}

impl Distribution for Gaussian {
    fn mean(&self) -> f64 {
        self.μ
    }

    fn stddev(&self) -> f64 {
        self.σ
    }

    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        self.normal.pdf(x)
    }

    #[inline]
    fn ln_pdf(&self, x: f64) -> f64 {
        self.normal.ln_pdf(x)
    }

    #[inline]
    fn cdf(&self, x: f64) -> f64 {
        self.normal.cdf(x)
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        if p > 0. && p < 1. {
            Ok(self.normal.inverse_cdf(p))
        } else {
            Err(PlotError::invalid_parameter("probability", p))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::error::PlotError;

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            Gaussian::new(0., 0.),
            Err(PlotError::InvalidParameter { name: "stddev", .. })
        ));
        assert!(Gaussian::new(0., -1.).is_err());
        assert!(Gaussian::new(f64::NAN, 1.).is_err());
        assert!(Gaussian::new(0., f64::INFINITY).is_err());
    }

    #[test]
    fn peak_height() {
        let g = Gaussian::new(3., 2.).unwrap();
        approx::assert_relative_eq!(g.pdf(3.), 1. / (2. * (2. * PI).sqrt()), max_relative = 1e-14);
        approx::assert_relative_eq!(g.pdf(1.), g.pdf(5.), max_relative = 1e-14);
        approx::assert_relative_eq!(g.ln_pdf(1.), g.pdf(1.).ln(), max_relative = 1e-12);
    }

    #[test]
    fn log_density_survives_underflow() {
        let narrow = Gaussian::new(0., 1e-5).unwrap();
        assert!(narrow.pdf(0.01) == 0.);
        approx::assert_relative_eq!(
            narrow.ln_pdf(0.01) - narrow.ln_pdf(0.),
            -0.5 * 1e6,
            max_relative = 1e-12
        );
    }

    #[test]
    fn quantile_known_values() {
        let g = Gaussian::standard();
        assert!(g.quantile(0.5).unwrap().abs() < 1e-12);
        for (p, z) in [
            (0.975, 1.959_963_985),
            (0.001, -3.090_232_306),
            (0.3, -0.524_400_513),
        ] {
            approx::assert_abs_diff_eq!(g.quantile(p).unwrap(), z, epsilon = 1e-8);
        }
        let shifted = Gaussian::new(100., 15.).unwrap();
        approx::assert_abs_diff_eq!(
            shifted.quantile(0.975).unwrap(),
            100. + 15. * 1.959_963_985,
            epsilon = 1e-6
        );
    }

    #[test]
    fn quantile_rejects_probabilities_outside_unit_interval() {
        let g = Gaussian::standard();
        for p in [0., 1., -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                g.quantile(p),
                Err(PlotError::InvalidParameter {
                    name: "probability",
                    ..
                })
            ));
        }
        assert!(g.extent(0.).is_err());
    }

    #[test]
    fn extent_is_symmetric_in_density() {
        for (μ, σ) in [(0., 1.), (10., 0.5), (-4., 7.)] {
            let g = Gaussian::new(μ, σ).unwrap();
            let (xmin, xmax) = g.extent(0.001).unwrap().into_inner();
            approx::assert_relative_eq!(g.pdf(xmin), g.pdf(xmax), max_relative = 1e-6);
            approx::assert_abs_diff_eq!(g.cdf(xmin), 0.001, epsilon = 1e-9);
            approx::assert_abs_diff_eq!(g.cdf(xmax), 0.999, epsilon = 1e-9);
            approx::assert_abs_diff_eq!(xmin + xmax, 2. * μ, epsilon = 1e-9 * σ.max(μ.abs()));
        }
    }

    #[test]
    fn sampling_distribution_narrows() {
        let population = Gaussian::new(5., 3.).unwrap();
        let sample = population.sampling_distribution(9).unwrap();
        assert!(sample.mean() == 5.);
        approx::assert_abs_diff_eq!(sample.stddev(), 1., epsilon = 1e-15);
        assert_eq!(population.sampling_distribution(1).unwrap(), population);
        assert!(matches!(
            population.sampling_distribution(0),
            Err(PlotError::InvalidParameter {
                name: "sample_size",
                ..
            })
        ));
    }

    #[test]
    fn probability_between_bounds() {
        let g = Gaussian::standard();
        approx::assert_abs_diff_eq!(g.probability_between(-1.96, 1.96), 0.95, epsilon = 1e-4);
        assert!(g.probability_between(1., -1.) == 0.);
    }
}
