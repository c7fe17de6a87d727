use std::ops::RangeInclusive;
use std::time::Instant;

use eframe::egui::Ui;

use crate::numerics;

#[derive(Clone, Debug)]
struct SweepState {
    /// Position in the cycle when the sweep (re)started, in `[0, 2)`.
    initial_phase: f64,
    initial_t: Instant,
}

#[derive(Clone, Debug)]
/// A sample size that can sweep back and forth over a range, spending equal time on each
/// doubling so that small `n` (where the spread changes fastest) is not rushed.
pub(super) struct SampleSizeSweep {
    n: u32,
    range: (u32, u32),
    /// Seconds for one pass from one end of the range to the other.
    duration: f64,
    state: Option<SweepState>,
}

impl SampleSizeSweep {
    pub(super) fn new(n: u32, range: RangeInclusive<u32>, duration: f64) -> Self {
        let (lo, hi) = range.into_inner();
        debug_assert!(lo >= 1 && lo < hi, "sample size range must be increasing and positive");
        Self {
            n: n.clamp(lo, hi),
            range: (lo, hi),
            duration,
            state: None,
        }
    }

    pub(super) fn get(&self) -> u32 {
        self.n
    }

    pub(super) fn range(&self) -> RangeInclusive<u32> {
        self.range.0..=self.range.1
    }

    /// Set the value directly, stopping any sweep.
    pub(super) fn set(&mut self, n: u32) {
        self.n = n.clamp(self.range.0, self.range.1);
        self.state = None;
    }

    fn log_bounds(&self) -> (f64, f64) {
        (f64::from(self.range.0).ln(), f64::from(self.range.1).ln())
    }

    /// Fraction of the way through the range, on a log scale.
    fn position(&self) -> f64 {
        let (lo, hi) = self.log_bounds();
        (f64::from(self.n).ln() - lo) / (hi - lo)
    }

    pub(super) fn is_sweeping(&self) -> bool {
        self.state.is_some()
    }

    pub(super) fn toggle(&mut self) {
        self.state = if self.is_sweeping() {
            None
        } else {
            Some(SweepState {
                initial_phase: numerics::ease_transition_inverse(self.position()),
                initial_t: Instant::now(),
            })
        };
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(super) fn tick(&mut self, ui: &mut Ui) {
        let Some(state) = &self.state else {
            return;
        };

        let phase = (state.initial_phase + state.initial_t.elapsed().as_secs_f64() / self.duration)
            .rem_euclid(2.);
        // Triangle wave: up on [0, 1), back down on [1, 2).
        let factor = if phase < 1. { phase } else { 2. - phase };
        let (lo, hi) = self.log_bounds();
        let log_n = lo + numerics::ease_transition(factor) * (hi - lo);
        self.n = (log_n.exp().round() as u32).clamp(self.range.0, self.range.1);

        ui.ctx().request_repaint();
    }
}
