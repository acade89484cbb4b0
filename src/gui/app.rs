//! Attendance View Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, PanelContext};
use crate::view::{ModuleView, ViewState};
use anyhow::Context;
use egui::SidePanel;
use std::path::Path;
use tracing::{error, info};

/// Either a ready session or the reason start-up failed.
enum Session {
    Ready(ModuleView),
    Failed(String),
}

/// Main application window.
pub struct AttendanceApp {
    session: Session,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    export_size: [u32; 2],
}

impl AttendanceApp {
    pub fn new(mut view: ModuleView, export_size: [u32; 2]) -> Self {
        let chart_viewer = ChartViewer::new();
        view.subscribe(chart_viewer.renderer());
        view.subscribe(Box::new(|series| {
            info!(
                "Showing {} days of attendance for '{}'",
                series.points.len(),
                series.module
            );
        }));

        let mut control_panel = ControlPanel::new();
        control_panel.set_status(&format!("Showing {}", view.selection()));

        Self {
            session: Session::Ready(view),
            control_panel,
            chart_viewer,
            export_size,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            session: Session::Failed(message),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            export_size: [0, 0],
        }
    }

    fn handle_module_selected(view: &mut ModuleView, panel: &mut ControlPanel, module: &str) {
        match view.select(module) {
            Ok(()) => panel.set_status(&format!("Showing {}", module)),
            Err(e) => {
                error!("Failed to select module: {}", e);
                panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Ask for an output path and write the current charts as PNG.
    fn handle_export_png(view: &ModuleView, panel: &mut ControlPanel, export_size: [u32; 2]) {
        let file_name = format!("{} attendance.png", view.selection());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&file_name)
            .save_file()
        else {
            return; // User cancelled
        };

        match Self::export_png(view, export_size, &path) {
            Ok(()) => {
                info!("Exported charts to {}", path.display());
                panel.set_status(&format!("Exported {}", path.display()));
            }
            Err(e) => {
                error!("Export failed: {:#}", e);
                panel.set_status(&format!("Error: {:#}", e));
            }
        }
    }

    fn export_png(view: &ModuleView, [width, height]: [u32; 2], path: &Path) -> anyhow::Result<()> {
        let png = StaticChartRenderer::render_png(view.series(), width, height)
            .context("rendering charts")?;
        std::fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

impl eframe::App for AttendanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Self {
            session,
            control_panel,
            chart_viewer,
            export_size,
        } = self;

        let view = match session {
            Session::Ready(view) => view,
            Session::Failed(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ChartViewer::show_error(ui, message);
                });
                return;
            }
        };

        // Left panel - Control Panel
        let action = SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                let panel_ctx = PanelContext {
                    choices: view.choices(),
                    selection: view.selection(),
                    row_count: view.table().row_count(),
                    recomputing: view.state() == ViewState::Recomputing,
                };
                control_panel.show(ui, &panel_ctx)
            })
            .inner;

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            chart_viewer.show(ui);
        });

        match action {
            ControlPanelAction::ModuleSelected(module) => {
                Self::handle_module_selected(view, control_panel, &module);
                ctx.request_repaint();
            }
            ControlPanelAction::ExportPng => {
                Self::handle_export_png(view, control_panel, *export_size)
            }
            ControlPanelAction::None => {}
        }
    }
}
