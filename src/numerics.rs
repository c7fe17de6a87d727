use std::f64::consts::PI;

use itertools::Itertools;

pub mod distribution;
pub mod sample_curve;

/// `n` evenly spaced samples over `[start, end]`, both ends inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    #[allow(clippy::cast_precision_loss)]
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.
    };
    (0..n).map(move |i| {
        // Pin the last sample so that rounding never leaves it short of `end`.
        if i + 1 == n && n > 1 {
            end
        } else {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f64 * step;
            start + offset
        }
    })
}

#[must_use]
/// Trapezoidal integral of the piecewise-linear function through `(xs[i], ys[i])`.
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter()
        .zip(ys)
        .tuple_windows()
        .map(|((x0, y0), (x1, y1))| 0.5 * (x1 - x0) * (y0 + y1))
        .sum()
}

#[must_use]
pub fn ease_transition(factor: f64) -> f64 {
    0.5 * (1.0 - (PI * factor).cos())
}

#[must_use]
pub fn ease_transition_inverse(value: f64) -> f64 {
    (1.0 - 2.0 * value).acos() / PI
}
