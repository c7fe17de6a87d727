//! PNG export of a [`Figure`], drawn with plotters and encoded with `image`.

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use eframe::egui::{self, FontDefinitions};
use image::{ImageFormat, RgbImage};
use plotters::prelude::Color as _;
use plotters::prelude::{
    AreaSeries, BitMapBackend, ChartBuilder, IntoDrawingArea, IntoFont, LineSeries, PathElement,
    RGBAColor, SeriesLabelPosition, Text, TextStyle, BLACK, WHITE,
};
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};

use super::{Axis, Color, Corner, Element, Figure, HAlign, LineStyle, Spine, VAlign};
use crate::error::{PlotError, Result};

/// Pixels per inch of figure size.
pub const EXPORT_DPI: f64 = 100.;
const POINTS_PER_INCH: f64 = 72.;

const FONT_FAMILY: &str = "sans-serif";
const TICK_FONT_SIZE: f64 = 10.;
const LEGEND_FONT_SIZE: f64 = 10.;

const MARGIN_PX: u32 = 10;
const TICK_LABEL_AREA_PX: u32 = 30;
/// Dash and gap length of dashed lines.
const DASH_PX: (u32, u32) = (6, 4);
const LEGEND_SAMPLE_PX: i32 = 20;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Registers the viewer's proportional font under [`FONT_FAMILY`], so exported labels use
/// the same face as the screen.
static FONT_REGISTERED: LazyLock<bool> = LazyLock::new(|| {
    let mut definitions = FontDefinitions::default();
    let Some(font) = definitions
        .families
        .get(&egui::FontFamily::Proportional)
        .and_then(|names| names.first().cloned())
        .and_then(|name| definitions.font_data.remove(&name))
    else {
        tracing::warn!("no proportional font to export labels with");
        return false;
    };
    let bytes: &'static [u8] = match font.font {
        Cow::Borrowed(bytes) => bytes,
        Cow::Owned(bytes) => Box::leak(bytes.into_boxed_slice()),
    };
    match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!("failed to register export font");
            false
        }
    }
});

fn points_to_px(points: f64) -> f64 {
    points * EXPORT_DPI / POINTS_PER_INCH
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stroke_px(width: f32) -> u32 {
    points_to_px(f64::from(width)).round().max(1.) as u32
}

fn rgba(color: Color) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, f64::from(color.a) / 255.)
}

fn font<'a>(size: f64) -> TextStyle<'a> {
    TextStyle::from((FONT_FAMILY, points_to_px(size)).into_font())
}

fn text_anchor(halign: HAlign, valign: VAlign) -> Pos {
    let h = match halign {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match valign {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    Pos::new(h, v)
}

fn label_position(corner: Corner) -> SeriesLabelPosition {
    match corner {
        Corner::UpperLeft => SeriesLabelPosition::UpperLeft,
        Corner::UpperRight => SeriesLabelPosition::UpperRight,
        Corner::LowerLeft => SeriesLabelPosition::LowerLeft,
        Corner::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

impl Figure {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * EXPORT_DPI).round().max(1.) as u32;
        (px(self.size.0), px(self.size.1))
    }

    fn draw(&self, backend: BitMapBackend<'_>) -> DrawResult {
        if !*FONT_REGISTERED {
            return Err("no font available for figure text".into());
        }
        let root = backend.into_drawing_area();
        root.fill(&WHITE)?;

        let chrome = self.chrome();
        let label_area = |axis| if chrome.ticks(axis) { TICK_LABEL_AREA_PX } else { 0 };
        let (xmin, xmax) = self.xlim();
        let (ymin, ymax) = self.ylim();
        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN_PX)
            .x_label_area_size(label_area(Axis::X))
            .y_label_area_size(label_area(Axis::Y))
            .build_cartesian_2d(xmin..xmax, ymin..ymax)?;

        if chrome.ticks(Axis::X) || chrome.ticks(Axis::Y) {
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh().label_style(font(TICK_FONT_SIZE));
            if !chrome.ticks(Axis::X) {
                mesh.disable_x_axis();
            }
            if !chrome.ticks(Axis::Y) {
                mesh.disable_y_axis();
            }
            mesh.draw()?;
        }

        for element in self.elements() {
            match element {
                Element::Fill(fill) => {
                    chart.draw_series(AreaSeries::new(
                        fill.curve.points(),
                        0.,
                        rgba(fill.color).filled(),
                    ))?;
                }
                Element::Line(line) => {
                    let style = rgba(line.color).stroke_width(stroke_px(line.width));
                    let points = line.points.iter().map(|&[x, y]| (x, y));
                    let series = match line.style {
                        LineStyle::Solid => chart.draw_series(LineSeries::new(points, style))?,
                        LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(
                            points, DASH_PX.0, DASH_PX.1, style,
                        ))?,
                    };
                    if let Some(label) = &line.label {
                        series.label(label.as_str()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + LEGEND_SAMPLE_PX, y)], style)
                        });
                    }
                }
                Element::Text(text) => {
                    let color = rgba(text.color);
                    let style = font(f64::from(text.font_size))
                        .color(&color)
                        .pos(text_anchor(text.halign, text.valign));
                    let [x, y] = text.position;
                    chart.draw_series(std::iter::once(Text::new(
                        text.text.clone(),
                        (x, y),
                        style,
                    )))?;
                }
            }
        }

        let spines = [
            (Spine::Top, (xmin, ymax), (xmax, ymax)),
            (Spine::Right, (xmax, ymin), (xmax, ymax)),
            (Spine::Bottom, (xmin, ymin), (xmax, ymin)),
            (Spine::Left, (xmin, ymin), (xmin, ymax)),
        ];
        for (spine, from, to) in spines {
            if chrome.spine(spine) {
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![from, to],
                    BLACK.stroke_width(1),
                )))?;
            }
        }

        if let Some(corner) = self.legend_corner() {
            chart
                .configure_series_labels()
                .position(label_position(corner))
                .label_font(font(LEGEND_FONT_SIZE))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }

    /// Render the figure at [`EXPORT_DPI`].
    ///
    /// # Errors
    /// [`PlotError::Draw`] if plotting fails.
    pub fn rasterize(&self) -> Result<RgbImage> {
        let (width, height) = self.pixel_size();
        let mut buffer = vec![0; width as usize * height as usize * 3];
        self.draw(BitMapBackend::with_buffer(&mut buffer, (width, height)))
            .map_err(PlotError::Draw)?;
        RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| PlotError::Draw("pixel buffer does not match the figure size".into()))
    }

    /// Render the figure and write it to `path` as PNG.
    ///
    /// # Errors
    /// Propagates drawing failures and any encoding or I/O error from the image writer.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.rasterize()?.save_with_format(path, ImageFormat::Png)?;
        tracing::info!(path = %path.display(), "exported figure");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;
    use crate::figure::{Annotation, LinePlot};
    use crate::numerics::distribution::gaussian::Gaussian;
    use crate::numerics::sample_curve::SampleCurve;

    fn is_blank(image: &RgbImage) -> bool {
        image.pixels().all(|&p| p == Rgb([255, 255, 255]))
    }

    #[test]
    fn size_follows_dpi() {
        let image = Figure::new((10., 6.)).rasterize().unwrap();
        assert_eq!(image.dimensions(), (1000, 600));
    }

    #[test]
    fn fill_covers_region_below_curve() {
        let curve = SampleCurve::over_extent(&Gaussian::standard()).unwrap();
        let mut figure = Figure::new((4., 3.));
        figure.fill_between(curve, Color::CORNFLOWER_BLUE).axis_off();
        let image = figure.rasterize().unwrap();
        // Halfway up the curve at its centre.
        assert_eq!(image.get_pixel(200, 150), &Rgb([100, 149, 237]));
        assert_eq!(image.get_pixel(2, 2), &Rgb([255, 255, 255]));
    }

    #[test]
    fn text_is_rendered() {
        let mut figure = Figure::new((2., 2.));
        figure.axis_off();
        assert!(is_blank(&figure.rasterize().unwrap()));

        figure.annotate(Annotation::new([0.5, 0.5], "1.96").font_size(24.));
        let image = figure.rasterize().unwrap();
        let inked = (60..140)
            .flat_map(|x| (70..130).map(move |y| (x, y)))
            .filter(|&(x, y)| image.get_pixel(x, y) != &Rgb([255, 255, 255]))
            .count();
        assert!(inked > 20, "only {inked} pixels of text");
    }

    #[test]
    fn area_plot_labels_are_exported() {
        let options = crate::plots::AreaPlotOptions {
            lower: Some(-1.96),
            upper: Some(1.96),
            shade: crate::plots::ShadeMode::None,
            ..Default::default()
        };
        let figure = crate::plots::unknown_area_plot(&options).unwrap();
        let mut unlabelled = Figure::new(figure.size);
        unlabelled.set_ylim(figure.ylim().0, figure.ylim().1).axis_off();
        for line in figure.lines() {
            unlabelled.plot(line.clone());
        }
        assert_ne!(figure.rasterize().unwrap(), unlabelled.rasterize().unwrap());
    }

    #[test]
    fn chrome_is_drawn_only_when_visible() {
        let mut figure = Figure::new((2., 2.));
        figure.plot(LinePlot::new(vec![[0., 0.], [1., 1.]]).color(Color::WHITE));
        assert!(!is_blank(&figure.rasterize().unwrap()));

        figure.axis_off();
        assert!(is_blank(&figure.rasterize().unwrap()));
    }

    #[test]
    fn save_png_writes_file() {
        let path = std::env::temp_dir().join("normplot_save_png_test.png");
        let mut figure = Figure::new((1., 1.));
        figure.plot(LinePlot::new(vec![[0., 0.], [1., 1.]]));
        figure.save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (100, 100));
        std::fs::remove_file(path).unwrap();
    }
}
