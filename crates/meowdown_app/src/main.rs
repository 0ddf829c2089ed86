mod app;
mod effects;
mod form;
mod logging;
mod persistence;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    logging::initialize(logging::LogDestination::File);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([650.0, 620.0])
            .with_title("🐱 MeowDown"),
        ..Default::default()
    };
    eframe::run_native(
        "MeowDown",
        options,
        Box::new(|_cc| Box::new(app::MeowDownApp::new())),
    )
}
