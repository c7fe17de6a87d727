mod animation;
mod figure_view;
mod utils;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use eframe::egui::{
    Align, Button, CentralPanel, ComboBox, Context, DragValue, Grid, Layout, SidePanel, Slider,
    TextStyle, Ui,
};
use egui_extras::{Column, TableBuilder};
use maplit::btreemap;

use self::animation::SampleSizeSweep;
use self::utils::Status;
use crate::numerics::distribution::Distribution;
use crate::plots::{
    self, AreaPlotOptions, SamplingCurves, SamplingPlotOptions, ShadeMode, ShadeRegion,
    ShadeSummary,
};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AreaPreset {
    /// Bounds in standard deviations from the mean.
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub shade: ShadeMode,
}

pub static AREA_PRESETS: LazyLock<BTreeMap<&str, AreaPreset>> = LazyLock::new(|| {
    let preset = |lower, upper, shade| AreaPreset { lower, upper, shade };
    btreemap! {
        "Central 68%" => preset(Some(-1.), Some(1.), ShadeMode::Inside),
        "Central 95%" => preset(Some(-1.96), Some(1.96), ShadeMode::Inside),
        "Two-tailed 5%" => preset(Some(-1.96), Some(1.96), ShadeMode::Outside),
        "Lower tail 5%" => preset(None, Some(-1.645), ShadeMode::Inside),
        "Upper tail 5%" => preset(Some(1.645), None, ShadeMode::Inside),
    }
});

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum View {
    Area,
    Sampling,
}

pub struct NormalPlots {
    view: View,
    selected_preset: &'static str,
    area: AreaPlotOptions,
    /// Last values of the bounds, kept while a bound is toggled off.
    bounds: [f64; 2],
    bounds_enabled: [bool; 2],
    sampling: SamplingPlotOptions,
    sample_size: SampleSizeSweep,
    status: Option<Status>,
}

impl View {
    fn name(self) -> &'static str {
        match self {
            Self::Area => "Area under the curve",
            Self::Sampling => "Sampling distribution",
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            Self::Area => "unknown_area",
            Self::Sampling => "sampling_distribution",
        }
    }
}

impl AreaPreset {
    fn apply(&self, options: &mut AreaPlotOptions, bounds: &mut [f64; 2], enabled: &mut [bool; 2]) {
        for (i, bound) in [self.lower, self.upper].into_iter().enumerate() {
            enabled[i] = bound.is_some();
            if let Some(z) = bound {
                bounds[i] = options.mean + z * options.stddev;
            }
        }
        options.shade = self.shade;
    }
}

impl NormalPlots {
    const SAMPLE_SIZES: std::ops::RangeInclusive<u32> = 1..=200;
    const SWEEP_SECONDS: f64 = 6.;

    #[must_use]
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing.y = 5.;
        style.spacing.slider_width = 120.;
        style.spacing.combo_width = 120.;
        cc.egui_ctx.set_style(style);

        let mut app = Self {
            view: View::Area,
            selected_preset: "Central 95%",
            area: AreaPlotOptions::default(),
            bounds: [-1., 1.],
            bounds_enabled: [false; 2],
            sampling: SamplingPlotOptions::default(),
            sample_size: SampleSizeSweep::new(
                SamplingPlotOptions::default().sample_size,
                Self::SAMPLE_SIZES,
                Self::SWEEP_SECONDS,
            ),
            status: None,
        };
        app.apply_preset();
        app
    }

    fn apply_preset(&mut self) {
        if let Some(preset) = AREA_PRESETS.get(self.selected_preset) {
            preset.apply(&mut self.area, &mut self.bounds, &mut self.bounds_enabled);
        }
    }

    fn sync_options(&mut self) {
        self.area.lower = self.bounds_enabled[0].then_some(self.bounds[0]);
        self.area.upper = self.bounds_enabled[1].then_some(self.bounds[1]);
        self.sampling.sample_size = self.sample_size.get();
    }

    fn export(&mut self) {
        let path = format!("{}.png", self.view.file_stem());
        let result = match self.view {
            View::Area => plots::unknown_area_plot(&self.area),
            View::Sampling => plots::sampling_dist_plot(&self.sampling),
        }
        .and_then(|figure| figure.save_png(&path));
        self.status = Some(match result {
            Ok(()) => Status::Info(format!("Saved {path}")),
            Err(err) => {
                tracing::warn!(%err, "export failed");
                Status::Error(err.to_string())
            }
        });
    }

    fn clear_error(&mut self) {
        if matches!(self.status, Some(Status::Error(_))) {
            self.status = None;
        }
    }

    fn controls(&mut self, ui: &mut Ui) {
        ui.heading("Normal distributions");

        ui.separator();

        ui.horizontal(|ui| {
            for view in [View::Area, View::Sampling] {
                ui.selectable_value(&mut self.view, view, view.name());
            }
        });

        ui.separator();

        match self.view {
            View::Area => self.area_controls(ui),
            View::Sampling => self.sampling_controls(ui),
        }

        ui.separator();

        if ui
            .button("Export PNG")
            .on_hover_text("Write the current figure to the working directory")
            .clicked()
        {
            self.export();
        }
    }

    fn distribution_sliders(ui: &mut Ui, mean: &mut f64, stddev: &mut f64) {
        ui.label("Mean:");
        ui.add(Slider::new(mean, -100.0..=100.0).fixed_decimals(1).smart_aim(false));
        ui.end_row();

        ui.label("Standard deviation:");
        ui.add(
            Slider::new(stddev, 0.1..=50.0)
                .logarithmic(true)
                .fixed_decimals(2),
        );
        ui.end_row();
    }

    fn area_controls(&mut self, ui: &mut Ui) {
        Grid::new("controls_area").num_columns(2).show(ui, |ui| {
            Self::distribution_sliders(ui, &mut self.area.mean, &mut self.area.stddev);

            for (i, name) in ["Lower bound:", "Upper bound:"].into_iter().enumerate() {
                ui.checkbox(&mut self.bounds_enabled[i], name);
                ui.add_enabled(
                    self.bounds_enabled[i],
                    DragValue::new(&mut self.bounds[i])
                        .speed(0.01 * self.area.stddev)
                        .max_decimals(3),
                );
                ui.end_row();
            }

            ui.label("Shade:");
            ComboBox::from_id_source("shade_mode")
                .selected_text(self.area.shade.name())
                .show_ui(ui, |ui| {
                    for mode in ShadeMode::ALL {
                        ui.selectable_value(&mut self.area.shade, mode, mode.name());
                    }
                });
            ui.end_row();

            ui.label("Mark the mean:");
            let mut mark_mean = self.area.mark_mean.unwrap_or(self.area.mean != 0.);
            if ui.checkbox(&mut mark_mean, "").changed() {
                self.area.mark_mean = Some(mark_mean);
            }
            ui.end_row();
        });

        ui.horizontal(|ui| {
            ui.label("Preset:");
            ComboBox::from_id_source("presets_selector")
                .selected_text(self.selected_preset)
                .show_ui(ui, |ui| {
                    for &preset in AREA_PRESETS.keys() {
                        ui.selectable_value(&mut self.selected_preset, preset, preset);
                    }
                });
            if ui
                .add(Button::new("Apply"))
                .on_hover_text("Place the bounds relative to the current mean and spread")
                .clicked()
            {
                self.apply_preset();
            }
        });
    }

    fn sampling_controls(&mut self, ui: &mut Ui) {
        Grid::new("controls_sampling").num_columns(2).show(ui, |ui| {
            Self::distribution_sliders(ui, &mut self.sampling.mean, &mut self.sampling.stddev);

            ui.label("Sample size:");
            ui.horizontal(|ui| {
                let mut n = self.sample_size.get();
                if ui
                    .add(Slider::new(&mut n, self.sample_size.range()).logarithmic(true))
                    .changed()
                {
                    self.sample_size.set(n);
                }
                let label = if self.sample_size.is_sweeping() { "Stop" } else { "Sweep" };
                if ui
                    .button(label)
                    .on_hover_text("Sweep the sample size back and forth")
                    .clicked()
                {
                    self.sample_size.toggle();
                }
            });
            ui.end_row();

            ui.label("Match peaks:")
                .on_hover_text("Rescale the sampling distribution to the population's height");
            ui.checkbox(&mut self.sampling.scaled, "");
            ui.end_row();
        });
    }

    fn summary_table(ui: &mut Ui, rows: &[(&str, String)]) {
        let row_height = ui.text_style_height(&TextStyle::Body) + ui.spacing().item_spacing.y;
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto())
            .column(Column::remainder())
            .body(|mut body| {
                for (name, value) in rows {
                    body.row(row_height, |mut row| {
                        row.col(|ui| {
                            ui.strong(*name);
                        });
                        row.col(|ui| {
                            ui.monospace(value);
                        });
                    });
                }
            });
    }

    fn area_summary_rows(summary: &ShadeSummary) -> Vec<(&'static str, String)> {
        let region = match summary.region {
            ShadeRegion::Inside(lower, upper) => format!("{lower:.3} ≤ x ≤ {upper:.3}"),
            ShadeRegion::Outside(lower, upper) => format!("x ≤ {lower:.3} or x ≥ {upper:.3}"),
            ShadeRegion::None => "nothing".to_owned(),
        };
        vec![
            ("Shaded", region),
            ("Probability", format!("{:.4}", summary.probability)),
            ("Plotted domain", format!("[{:.3}, {:.3}]", summary.domain.0, summary.domain.1)),
        ]
    }

    fn sampling_summary_rows(curves: &SamplingCurves) -> Vec<(&'static str, String)> {
        vec![
            (
                "Standard error",
                format!("{:.4}", curves.sampling_distribution.stddev()),
            ),
            (
                "Peak ratio",
                format!("{:.3}", curves.sample_mean.max() / curves.population.max()),
            ),
        ]
    }

    fn area_view(&mut self, ui: &mut Ui) {
        match plots::unknown_area_plot_with_summary(&self.area) {
            Ok((figure, summary)) => {
                self.clear_error();
                Self::summary_table(ui, &Self::area_summary_rows(&summary));
                figure_view::show_figure(ui, "area_plot", &figure);
            }
            Err(err) => {
                self.status = Some(Status::Error(err.to_string()));
            }
        }
    }

    fn sampling_view(&mut self, ui: &mut Ui) {
        match plots::sampling_curves(&self.sampling) {
            Ok(curves) => {
                let figure = curves.figure(self.sampling.figsize);
                self.clear_error();
                Self::summary_table(ui, &Self::sampling_summary_rows(&curves));
                figure_view::show_figure(ui, "sampling_plot", &figure);
            }
            Err(err) => {
                self.status = Some(Status::Error(err.to_string()));
            }
        }
    }
}

impl eframe::App for NormalPlots {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        SidePanel::right("controls")
            .min_width(ctx.available_rect().width() * 0.25)
            .resizable(false)
            .show(ctx, |ui| {
                self.controls(ui);
            });

        CentralPanel::default().show(ctx, |ui| {
            self.sample_size.tick(ui);
            self.sync_options();

            if let Some(status) = &self.status {
                utils::inner_bottom_panel("status", ui, |ui| status.show(ui));
            }
            match self.view {
                View::Area => self.area_view(ui),
                View::Sampling => self.sampling_view(ui),
            }
        });
    }
}
