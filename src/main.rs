use clap::Parser;
use eframe::egui;

use spraypaint::app::SprayPaintApp;
use spraypaint::cli::CliArgs;
use spraypaint::settings::AppSettings;
use spraypaint::{log_info, logger};

fn main() -> Result<(), eframe::Error> {
    let args = CliArgs::parse();

    // Initialize session log (overwrites previous session log)
    logger::init();

    let stored = AppSettings::load();
    let session = args.apply_to(&stored);
    log_info!(
        "Brush size {} color {}",
        session.brush_size,
        session.brush_color.name()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("SprayPaint"),
        ..Default::default()
    };

    let startup_file = args.image;
    eframe::run_native(
        "SprayPaint",
        options,
        Box::new(move |cc| Box::new(SprayPaintApp::new(cc, stored, &session, startup_file))),
    )
}
