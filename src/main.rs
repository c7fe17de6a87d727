#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::epaint::Vec2;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        initial_window_size: Some(Vec2 { x: 1200., y: 600. }),
        ..NativeOptions::default()
    };
    tracing_subscriber::fmt::init();
    eframe::run_native(
        "Normal distributions",
        native_options,
        Box::new(|cc| Box::new(normplot::ui::NormalPlots::new(cc))),
    )?;
    Ok(())
}
