//! Control Panel Widget
//! Left side panel with the module selector, dataset summary and export.

use egui::{Color32, ComboBox, RichText};

/// What the panel needs to draw itself for one frame.
pub struct PanelContext<'a> {
    pub choices: &'a [String],
    pub selection: &'a str,
    pub row_count: usize,
    /// Disables the selector while the view is `Recomputing`. `select` runs
    /// synchronously and returns to `Idle` before the next frame, so the
    /// panel sees this unset; it is a guard, not a loading indicator.
    pub recomputing: bool,
}

/// Left side control panel.
pub struct ControlPanel {
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, ctx: &PanelContext<'_>) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Attendance View")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(
            RichText::new(format!(
                "{} rows, {} modules",
                ctx.row_count,
                ctx.choices.len()
            ))
            .size(12.0)
            .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Module Section =====
        ui.label(RichText::new("Select module").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(!ctx.recomputing, |ui| {
            ComboBox::from_id_salt("module")
                .width(ui.available_width() - 10.0)
                .selected_text(ctx.selection)
                .show_ui(ui, |ui| {
                    for module in ctx.choices {
                        if ui
                            .selectable_label(ctx.selection == module.as_str(), module)
                            .clicked()
                        {
                            action = ControlPanelAction::ModuleSelected(module.clone());
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("📄 Export PNG").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportPng;
            }
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ModuleSelected(String),
    ExportPng,
}
