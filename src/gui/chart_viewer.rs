//! Chart Viewer Widget
//! Central panel showing the line and bar charts stacked.

use crate::charts::{ChartPlotter, ChartSeries};
use crate::view::Renderer;
use egui::{Color32, RichText, ScrollArea};
use std::cell::RefCell;
use std::rc::Rc;

const CHART_SPACING: f32 = 15.0;

/// Holds the last series pushed by the view and draws it every frame.
pub struct ChartViewer {
    current: Rc<RefCell<ChartSeries>>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            current: Rc::new(RefCell::new(ChartSeries::default())),
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer to subscribe on a `ModuleView`.
    pub fn renderer(&self) -> Renderer {
        let current = Rc::clone(&self.current);
        Box::new(move |series| *current.borrow_mut() = series.clone())
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let data = self.current.borrow();

        ui.heading(RichText::new("Module Attendance").size(26.0).strong());
        ui.add_space(CHART_SPACING);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Frame::none()
                    .rounding(8.0)
                    .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Average Attendance Over Time").size(18.0).strong());
                        ui.add_space(8.0);

                        if let Some(note) = Self::no_data_message(&data) {
                            ui.label(RichText::new(note).size(14.0).color(Color32::GRAY));
                            ui.add_space(8.0);
                        }

                        ChartPlotter::draw_line_chart(ui, &data);
                        ui.add_space(CHART_SPACING * 2.0);
                        ChartPlotter::draw_bar_chart(ui, &data);
                    });
            });
    }

    /// Placeholder shown above the empty charts when a module has no dates.
    fn no_data_message(data: &ChartSeries) -> Option<String> {
        data.is_empty()
            .then(|| format!("No attendance data for {}", data.module))
    }

    /// Start-up failure screen shown instead of the charts.
    pub fn show_error(ui: &mut egui::Ui, message: &str) {
        ui.heading(RichText::new("Module Attendance").size(26.0).strong());
        ui.add_space(CHART_SPACING);
        ui.label(
            RichText::new("⚠ Could not load attendance data")
                .size(18.0)
                .strong()
                .color(Color32::from_rgb(220, 53, 69)),
        );
        ui.add_space(8.0);
        ui.label(RichText::new(message).size(14.0));
    }
}
