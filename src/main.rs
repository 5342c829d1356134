use eframe::egui;
use tracing_subscriber::EnvFilter;

mod app;
mod chat;
mod config;
mod error;
mod export;
mod props;
mod provider;
mod registry;
mod scene;
mod toast;
mod ui_kit;
mod views;

use app::AtelierApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 880.0])
            .with_min_inner_size([960.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Atelier Design Studio",
        options,
        Box::new(|cc| Ok(Box::new(AtelierApp::new(cc)))),
    )
}
