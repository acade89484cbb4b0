//! Chart Plotter Module
//! Interactive attendance charts using egui_plot.

use super::series::{self, ChartSeries, X_AXIS_LABEL, Y_AXIS_LABEL};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};
use std::ops::RangeInclusive;

pub const LINE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const BAR_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green

const CHART_HEIGHT: f32 = 420.0;
const BAR_WIDTH_DAYS: f64 = 0.8;

/// Draws the line and bar charts for a `ChartSeries`.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Format an x grid mark (days since epoch) as a date.
    fn format_day(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
        series::from_day(mark.value)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    fn draw_title(ui: &mut egui::Ui, title: &str) {
        for (i, line) in title.lines().enumerate() {
            let text = RichText::new(line).size(if i == 0 { 16.0 } else { 13.0 });
            ui.label(if i == 0 { text.strong() } else { text });
        }
    }

    /// Percent over date with point markers.
    pub fn draw_line_chart(ui: &mut egui::Ui, data: &ChartSeries) {
        Self::draw_title(ui, &data.line_title());

        let points: Vec<[f64; 2]> = data.points.iter().map(|p| [p.day, p.percent]).collect();

        Plot::new(format!("line_{}", data.module))
            .height(CHART_HEIGHT)
            .x_axis_label(X_AXIS_LABEL)
            .y_axis_label(Y_AXIS_LABEL)
            .include_y(0.0)
            .include_y(100.0)
            .allow_scroll(false)
            .x_axis_formatter(Self::format_day)
            .label_formatter(|_name, value| {
                let date = series::from_day(value.x)
                    .map(series::date_label)
                    .unwrap_or_default();
                format!("{}\n{:.1}%", date, value.y)
            })
            .show(ui, |plot_ui| {
                if points.is_empty() {
                    return;
                }
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(1.5)
                        .name(&data.module),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(LINE_COLOR),
                );
            });
    }

    /// Percent per date as bars, horizontal grid lines only.
    pub fn draw_bar_chart(ui: &mut egui::Ui, data: &ChartSeries) {
        Self::draw_title(ui, &data.bar_title());

        let bars: Vec<Bar> = data
            .points
            .iter()
            .map(|p| {
                Bar::new(p.day, p.percent)
                    .width(BAR_WIDTH_DAYS)
                    .name(&p.label)
            })
            .collect();

        Plot::new(format!("bar_{}", data.module))
            .height(CHART_HEIGHT)
            .x_axis_label(X_AXIS_LABEL)
            .y_axis_label(Y_AXIS_LABEL)
            .include_y(0.0)
            .include_y(100.0)
            .allow_scroll(false)
            .show_grid([false, true])
            .x_axis_formatter(Self::format_day)
            .show(ui, |plot_ui| {
                if bars.is_empty() {
                    return;
                }
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name(&data.module));
            });
    }
}
