use eframe::egui::plot::{self, Legend, Line, Plot, PlotPoint, PlotUi, Polygon, Text};
use eframe::egui::{Align2, RichText, Ui};
use eframe::epaint::Color32;
use itertools::Itertools;

use crate::figure::{
    Annotation, Axis, Color, Corner, Element, Figure, Fill, HAlign, LinePlot, LineStyle, VAlign,
};

fn color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn anchor(halign: HAlign, valign: VAlign) -> Align2 {
    match (halign, valign) {
        (HAlign::Left, VAlign::Top) => Align2::LEFT_TOP,
        (HAlign::Left, VAlign::Center) => Align2::LEFT_CENTER,
        (HAlign::Left, VAlign::Bottom) => Align2::LEFT_BOTTOM,
        (HAlign::Center, VAlign::Top) => Align2::CENTER_TOP,
        (HAlign::Center, VAlign::Center) => Align2::CENTER_CENTER,
        (HAlign::Center, VAlign::Bottom) => Align2::CENTER_BOTTOM,
        (HAlign::Right, VAlign::Top) => Align2::RIGHT_TOP,
        (HAlign::Right, VAlign::Center) => Align2::RIGHT_CENTER,
        (HAlign::Right, VAlign::Bottom) => Align2::RIGHT_BOTTOM,
    }
}

fn legend_corner(corner: Corner) -> plot::Corner {
    match corner {
        Corner::UpperLeft => plot::Corner::LeftTop,
        Corner::UpperRight => plot::Corner::RightTop,
        Corner::LowerLeft => plot::Corner::LeftBottom,
        Corner::LowerRight => plot::Corner::RightBottom,
    }
}

fn draw_fill(plot_ui: &mut PlotUi, fill: &Fill) {
    // egui only fills convex polygons, so shade one trapezoid per segment.
    for ((x0, y0), (x1, y1)) in fill.curve.points().tuple_windows() {
        plot_ui.polygon(
            Polygon::new(vec![[x0, 0.], [x0, y0], [x1, y1], [x1, 0.]])
                .color(color32(fill.color))
                .fill_alpha(1.)
                .width(0.),
        );
    }
}

fn draw_line(plot_ui: &mut PlotUi, line: &LinePlot) {
    let mut item = Line::new(line.points.clone())
        .color(color32(line.color))
        .width(line.width)
        .style(match line.style {
            LineStyle::Solid => plot::LineStyle::Solid,
            LineStyle::Dashed => plot::LineStyle::dashed_loose(),
        });
    if let Some(label) = &line.label {
        item = item.name(label);
    }
    plot_ui.line(item);
}

fn draw_annotation(plot_ui: &mut PlotUi, text: &Annotation) {
    let [x, y] = text.position;
    plot_ui.text(
        Text::new(
            PlotPoint::new(x, y),
            RichText::new(&text.text)
                .size(text.font_size)
                .color(color32(text.color)),
        )
        .anchor(anchor(text.halign, text.valign)),
    );
}

/// Display `figure` as a static egui plot filling the available width.
pub(super) fn show_figure(ui: &mut Ui, id: &str, figure: &Figure) {
    let (xmin, xmax) = figure.xlim();
    let (ymin, ymax) = figure.ylim();
    let chrome = figure.chrome();

    #[allow(clippy::cast_possible_truncation)]
    let aspect = (figure.size.0 / figure.size.1) as f32;
    let mut plot = Plot::new(id)
        .include_x(xmin)
        .include_x(xmax)
        .include_y(ymin)
        .include_y(ymax)
        .show_axes([chrome.ticks(Axis::X), chrome.ticks(Axis::Y)])
        .show_background(chrome.visible)
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .view_aspect(aspect);
    if let Some(corner) = figure.legend_corner() {
        plot = plot.legend(Legend::default().position(legend_corner(corner)));
    }

    plot.show(ui, |plot_ui| {
        for element in figure.elements() {
            match element {
                Element::Fill(fill) => draw_fill(plot_ui, fill),
                Element::Line(line) => draw_line(plot_ui, line),
                Element::Text(text) => draw_annotation(plot_ui, text),
            }
        }
    });
}
