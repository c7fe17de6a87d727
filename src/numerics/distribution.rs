pub mod gaussian;

use std::ops::RangeInclusive;

use crate::error::Result;

pub trait Distribution {
    fn mean(&self) -> f64;
    fn stddev(&self) -> f64;
    fn pdf(&self, x: f64) -> f64;
    /// Natural log of [`Self::pdf`], finite even where the density underflows.
    fn ln_pdf(&self, x: f64) -> f64;
    fn cdf(&self, x: f64) -> f64;

    /// Inverse of [`Self::cdf`].
    ///
    /// # Errors
    /// `p` must lie strictly between 0 and 1.
    fn quantile(&self, p: f64) -> Result<f64>;

    /// The interval between the `p` and `1 - p` quantiles.
    ///
    /// # Errors
    /// See [`Self::quantile`].
    fn extent(&self, p: f64) -> Result<RangeInclusive<f64>> {
        Ok(self.quantile(p)?..=self.quantile(1. - p)?)
    }

    /// Probability mass contained in `[lower, upper]`.
    fn probability_between(&self, lower: f64, upper: f64) -> f64 {
        (self.cdf(upper) - self.cdf(lower)).max(0.)
    }
}
