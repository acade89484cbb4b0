//! Attendance View - daily attendance charts per course module
//!
//! Loads the attendance export once at start-up and shows line and bar charts
//! of the daily attendance rate for the module picked in the side panel.

mod charts;
mod config;
mod data;
mod error;
mod gui;
mod view;

use config::{AppConfig, CONFIG_FILE};
use eframe::egui;
use error::StartupError;
use gui::AttendanceApp;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use view::ModuleView;

/// Load settings and data, and build the session the window starts on.
fn start(config: &AppConfig) -> Result<ModuleView, StartupError> {
    let table = Arc::new(data::load_attendance(&config.data_path)?);
    let view = ModuleView::new(table, &config.default_module)?;
    Ok(view)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Attendance View v{}", env!("CARGO_PKG_VERSION"));

    let (config, app) = match AppConfig::load(Path::new(CONFIG_FILE)) {
        Ok(config) => {
            let app = match start(&config) {
                Ok(view) => AttendanceApp::new(view, config.export_size),
                Err(e) => {
                    error!("Start-up failed: {}", e);
                    AttendanceApp::failed(e.to_string())
                }
            };
            (config, app)
        }
        Err(e) => {
            let e = StartupError::from(e);
            error!("Start-up failed: {}", e);
            (AppConfig::default(), AttendanceApp::failed(e.to_string()))
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0])
            .with_title("Module Attendance"),
        ..Default::default()
    };

    eframe::run_native(
        "Module Attendance",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
