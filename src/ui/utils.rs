use eframe::egui::{self, Margin, RichText, TopBottomPanel, Ui};
use eframe::epaint::Color32;

pub(super) fn inner_bottom_panel(
    id: &'static str,
    ui: &mut Ui,
    add_contents: impl FnOnce(&mut Ui),
) {
    TopBottomPanel::bottom(id)
        .show_separator_line(false)
        .frame(
            egui::Frame::side_top_panel(ui.style())
                .inner_margin(Margin::symmetric(0.0, ui.style().spacing.item_spacing.y)),
        )
        .show_inside(ui, add_contents);
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub(super) enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub(super) fn show(&self, ui: &mut Ui) {
        match self {
            Self::Info(text) => ui.label(text),
            Self::Error(text) => ui.label(RichText::new(text).color(Color32::LIGHT_RED)),
        };
    }
}
