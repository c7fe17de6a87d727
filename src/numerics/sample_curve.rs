use itertools::Itertools;

use super::distribution::Distribution;
use crate::error::Result;

#[derive(Clone, PartialEq, Debug, Default)]
/// A density evaluated at evenly spaced points. `xs` is sorted ascending and has the same
/// length as `ys`.
pub struct SampleCurve {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl SampleCurve {
    /// Number of points each curve is evaluated at.
    pub const SAMPLES: usize = 1000;
    /// Tail probability left outside the plotted domain on either side.
    pub const DOMAIN_TAIL: f64 = 0.001;

    /// Evaluate `distribution` over its own `[quantile(0.001), quantile(0.999)]` domain.
    ///
    /// # Errors
    /// Propagates a failed quantile evaluation.
    pub fn over_extent(distribution: &impl Distribution) -> Result<Self> {
        let (xmin, xmax) = distribution.extent(Self::DOMAIN_TAIL)?.into_inner();
        Ok(Self::evaluate(distribution, xmin, xmax, Self::SAMPLES))
    }

    pub fn evaluate(distribution: &impl Distribution, xmin: f64, xmax: f64, n: usize) -> Self {
        let xs = super::linspace(xmin, xmax, n).collect_vec();
        Self::evaluate_at(distribution, xs)
    }

    /// Evaluate `distribution` on the x-values of an existing curve.
    pub fn evaluate_at(distribution: &impl Distribution, xs: Vec<f64>) -> Self {
        let ys = xs.iter().map(|&x| distribution.pdf(x)).collect_vec();
        Self { xs, ys }
    }

    /// Evaluate `distribution` on `xs`, rescaled so that the largest value is `peak`.
    ///
    /// Works on log densities, so the shape survives even where the density itself
    /// underflows to zero on every point of `xs`.
    pub fn evaluate_with_peak(distribution: &impl Distribution, xs: Vec<f64>, peak: f64) -> Self {
        let ln_ys = xs.iter().map(|&x| distribution.ln_pdf(x)).collect_vec();
        let ln_max = ln_ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !ln_max.is_finite() {
            return Self::evaluate_at(distribution, xs);
        }
        let ys = ln_ys.into_iter().map(|ln_y| peak * (ln_y - ln_max).exp()).collect();
        Self { xs, ys }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Some((*self.xs.first()?, *self.xs.last()?))
    }

    #[must_use]
    /// Largest sampled density, or zero for an empty curve.
    pub fn max(&self) -> f64 {
        self.ys.iter().copied().reduce(f64::max).unwrap_or(0.)
    }

    #[must_use]
    /// The sub-curve of points whose x-value satisfies `keep`.
    pub fn masked(&self, keep: impl Fn(f64) -> bool) -> Self {
        let (xs, ys) = self.points().filter(|&(x, _)| keep(x)).unzip();
        Self { xs, ys }
    }

    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            xs: self.xs.clone(),
            ys: self.ys.iter().map(|y| y * factor).collect(),
        }
    }

    #[must_use]
    /// Rescale so that the peak matches `peak`. An all-zero curve is returned unchanged.
    pub fn scaled_to_peak(&self, peak: f64) -> Self {
        let current = self.max();
        if current > 0. {
            self.scaled(peak / current)
        } else {
            self.clone()
        }
    }

    #[must_use]
    /// Trapezoidal area under the sampled points.
    pub fn integrate(&self) -> f64 {
        super::trapezoid(&self.xs, &self.ys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::distribution::gaussian::Gaussian;

    #[test]
    fn standard_curve_shape() {
        let curve = SampleCurve::over_extent(&Gaussian::standard()).unwrap();
        assert_eq!(curve.len(), SampleCurve::SAMPLES);
        let (xmin, xmax) = curve.x_range().unwrap();
        approx::assert_abs_diff_eq!(xmin, -3.090_232, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(xmax, 3.090_232, epsilon = 1e-6);
        // The peak falls between samples since the point count is even.
        assert!(curve.max() < Gaussian::standard().pdf(0.));
        approx::assert_abs_diff_eq!(curve.max(), Gaussian::standard().pdf(0.), epsilon = 1e-4);
        approx::assert_abs_diff_eq!(curve.integrate(), 0.998, epsilon = 1e-4);
    }

    #[test]
    fn masking_keeps_order() {
        let curve = SampleCurve::over_extent(&Gaussian::standard()).unwrap();
        let right = curve.masked(|x| x >= 0.);
        assert_eq!(right.len(), SampleCurve::SAMPLES / 2);
        assert!(right.xs.iter().tuple_windows().all(|(a, b)| a < b));
        approx::assert_abs_diff_eq!(right.integrate(), 0.497_77, epsilon = 1e-4);
        assert!(curve.masked(|_| false).is_empty());
        assert!(curve.masked(|_| false).max() == 0.);
    }

    #[test]
    fn scaling_to_peak() {
        let curve = SampleCurve::over_extent(&Gaussian::new(0., 2.).unwrap()).unwrap();
        let scaled = curve.scaled_to_peak(1.);
        approx::assert_relative_eq!(scaled.max(), 1., max_relative = 1e-12);
        assert_eq!(scaled.xs, curve.xs);
        let flat = SampleCurve {
            xs: vec![0., 1.],
            ys: vec![0., 0.],
        };
        assert_eq!(flat.scaled_to_peak(1.), flat);
    }

    #[test]
    fn peak_matching_in_log_space() {
        let xs = crate::numerics::linspace(-3., 3., 1000).collect_vec();
        let wide = Gaussian::new(0., 2.).unwrap();
        let direct = SampleCurve::evaluate_at(&wide, xs.clone()).scaled_to_peak(0.5);
        let via_logs = SampleCurve::evaluate_with_peak(&wide, xs.clone(), 0.5);
        assert_eq!(via_logs.xs, direct.xs);
        for (a, b) in via_logs.ys.iter().zip(&direct.ys) {
            approx::assert_relative_eq!(*a, *b, max_relative = 1e-9);
        }

        // Every direct sample underflows here.
        let narrow = Gaussian::new(0., 1e-5).unwrap();
        assert!(SampleCurve::evaluate_at(&narrow, xs.clone()).max() == 0.);
        let rescued = SampleCurve::evaluate_with_peak(&narrow, xs, 0.5);
        assert!(rescued.max() == 0.5);
        // Symmetric grid: the two samples nearest the mean share the peak.
        approx::assert_relative_eq!(rescued.ys[499], 0.5, max_relative = 1e-6);
        approx::assert_relative_eq!(rescued.ys[500], 0.5, max_relative = 1e-6);
        assert!(rescued.ys[0] == 0.);
    }
}
