//! An explicit, in-memory plotting surface.
//!
//! A [`Figure`] records drawing primitives in data coordinates. It is finalised either by the
//! egui viewer or by rasterising it to a PNG.

pub mod color;
#[cfg(not(target_arch = "wasm32"))]
pub mod raster;

pub use color::Color;

use crate::numerics::sample_curve::SampleCurve;

/// Figure width and height, in inches.
pub type FigSize = (f64, f64);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Corner {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Spine {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, PartialEq, Debug)]
pub struct LinePlot {
    pub points: Vec<[f64; 2]>,
    pub color: Color,
    pub width: f32,
    pub style: LineStyle,
    /// Legend entry, if any.
    pub label: Option<String>,
}

#[derive(Clone, PartialEq, Debug)]
/// The area between a curve and `y = 0`.
pub struct Fill {
    pub curve: SampleCurve,
    pub color: Color,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Annotation {
    pub position: [f64; 2],
    pub text: String,
    pub halign: HAlign,
    pub valign: VAlign,
    pub color: Color,
    pub font_size: f32,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Element {
    Line(LinePlot),
    Fill(Fill),
    Text(Annotation),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AxesChrome {
    /// `false` hides everything at once, like `axis('off')`.
    pub visible: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
    pub x_ticks: bool,
    pub y_ticks: bool,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Figure {
    pub size: FigSize,
    elements: Vec<Element>,
    ylim: Option<(f64, f64)>,
    chrome: AxesChrome,
    legend: Option<Corner>,
}

impl LinePlot {
    #[must_use]
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self {
            points,
            color: Color::BLACK,
            width: 1.5,
            style: LineStyle::Solid,
            label: None,
        }
    }

    #[must_use]
    pub fn from_curve(curve: &SampleCurve) -> Self {
        Self::new(curve.points().map(|(x, y)| [x, y]).collect())
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Annotation {
    #[must_use]
    pub fn new(position: [f64; 2], text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            halign: HAlign::Center,
            valign: VAlign::Center,
            color: Color::BLACK,
            font_size: 12.,
        }
    }

    #[must_use]
    pub fn align(mut self, halign: HAlign, valign: VAlign) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}

impl Default for AxesChrome {
    fn default() -> Self {
        Self {
            visible: true,
            top: true,
            right: true,
            bottom: true,
            left: true,
            x_ticks: true,
            y_ticks: true,
        }
    }
}

impl AxesChrome {
    #[must_use]
    pub fn spine(&self, spine: Spine) -> bool {
        self.visible
            && match spine {
                Spine::Top => self.top,
                Spine::Right => self.right,
                Spine::Bottom => self.bottom,
                Spine::Left => self.left,
            }
    }

    #[must_use]
    pub fn ticks(&self, axis: Axis) -> bool {
        self.visible
            && match axis {
                Axis::X => self.x_ticks,
                Axis::Y => self.y_ticks,
            }
    }
}

fn element_points(element: &Element) -> Box<dyn Iterator<Item = [f64; 2]> + '_> {
    match element {
        Element::Line(line) => Box::new(line.points.iter().copied()),
        // Fills are anchored to the x-axis.
        Element::Fill(fill) => Box::new(fill.curve.points().flat_map(|(x, y)| [[x, y], [x, 0.]])),
        Element::Text(_) => Box::new(std::iter::empty()),
    }
}

impl Figure {
    /// Fraction of the data range added on each side when autoscaling.
    pub const AUTOSCALE_MARGIN: f64 = 0.05;

    #[must_use]
    pub fn new(size: FigSize) -> Self {
        Self {
            size,
            elements: vec![],
            ylim: None,
            chrome: AxesChrome::default(),
            legend: None,
        }
    }

    pub fn plot(&mut self, line: LinePlot) -> &mut Self {
        tracing::trace!(points = line.points.len(), label = ?line.label, "line");
        self.elements.push(Element::Line(line));
        self
    }

    /// A vertical segment at `x` spanning `ymin..=ymax`.
    pub fn vline(
        &mut self,
        x: f64,
        ymin: f64,
        ymax: f64,
        color: Color,
        style: LineStyle,
    ) -> &mut Self {
        self.plot(
            LinePlot::new(vec![[x, ymin], [x, ymax]])
                .color(color)
                .width(1.)
                .style(style),
        )
    }

    /// Fill the area between `curve` and the x-axis. Empty curves are ignored.
    pub fn fill_between(&mut self, curve: SampleCurve, color: Color) -> &mut Self {
        if curve.is_empty() {
            tracing::trace!("skipping empty fill");
            return self;
        }
        tracing::trace!(points = curve.len(), %color, "fill");
        self.elements.push(Element::Fill(Fill { curve, color }));
        self
    }

    pub fn annotate(&mut self, annotation: Annotation) -> &mut Self {
        tracing::trace!(text = %annotation.text, "annotation");
        self.elements.push(Element::Text(annotation));
        self
    }

    pub fn set_ylim(&mut self, ymin: f64, ymax: f64) -> &mut Self {
        self.ylim = Some((ymin, ymax));
        self
    }

    pub fn axis_off(&mut self) -> &mut Self {
        self.chrome.visible = false;
        self
    }

    pub fn hide_spines(&mut self, spines: &[Spine]) -> &mut Self {
        for spine in spines {
            match spine {
                Spine::Top => self.chrome.top = false,
                Spine::Right => self.chrome.right = false,
                Spine::Bottom => self.chrome.bottom = false,
                Spine::Left => self.chrome.left = false,
            }
        }
        self
    }

    pub fn hide_ticks(&mut self, axis: Axis) -> &mut Self {
        match axis {
            Axis::X => self.chrome.x_ticks = false,
            Axis::Y => self.chrome.y_ticks = false,
        }
        self
    }

    pub fn legend(&mut self, corner: Corner) -> &mut Self {
        self.legend = Some(corner);
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePlot> {
        self.elements.iter().filter_map(|e| match e {
            Element::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = &Fill> {
        self.elements.iter().filter_map(|e| match e {
            Element::Fill(fill) => Some(fill),
            _ => None,
        })
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(text) => Some(text),
            _ => None,
        })
    }

    #[must_use]
    pub fn chrome(&self) -> AxesChrome {
        self.chrome
    }

    #[must_use]
    pub fn legend_corner(&self) -> Option<Corner> {
        self.legend
    }

    /// Extent of the plotted data (lines and fills, not text) as `(min, max)` per axis.
    fn data_limits(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut points = self
            .elements
            .iter()
            .flat_map(element_points)
            .filter(|[x, y]| x.is_finite() && y.is_finite());
        let [x0, y0] = points.next()?;
        Some(points.fold(([x0, x0], [y0, y0]), |(xs, ys), [x, y]| {
            ([xs[0].min(x), xs[1].max(x)], [ys[0].min(y), ys[1].max(y)])
        }))
    }

    fn with_margin([lo, hi]: [f64; 2]) -> (f64, f64) {
        let pad = if hi > lo {
            (hi - lo) * Self::AUTOSCALE_MARGIN
        } else {
            0.5
        };
        (lo - pad, hi + pad)
    }

    #[must_use]
    pub fn xlim(&self) -> (f64, f64) {
        self.data_limits()
            .map_or((0., 1.), |(xs, _)| Self::with_margin(xs))
    }

    #[must_use]
    /// The explicit y-range if one was set, otherwise the autoscaled data range.
    pub fn ylim(&self) -> (f64, f64) {
        self.ylim.unwrap_or_else(|| {
            self.data_limits()
                .map_or((0., 1.), |(_, ys)| Self::with_margin(ys))
        })
    }
}
