#![warn(clippy::pedantic)]
#![allow(
    clippy::len_without_is_empty,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::too_many_lines
)]

pub mod error;
pub mod figure;
pub mod numerics;
pub mod plots;
pub mod ui;

pub use error::{PlotError, Result};
pub use figure::Figure;
pub use plots::{sampling_dist_plot, unknown_area_plot};
