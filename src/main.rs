//! Netflix Titles Dashboard
//!
//! Desktop dashboard showing metrics and charts for the Netflix titles
//! dataset.

mod gui;

use eframe::egui;
use gui::DashboardApp;
use netflix_dashboard::DashboardConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DashboardConfig::default();
    tracing::info!(data_path = %config.data_path.display(), "Starting dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("Netflix Data Analysis"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Netflix Data Analysis",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard exited with an error: {e}"))
}
