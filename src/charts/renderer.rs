//! Static Chart Renderer
//! Draws the attendance charts to a PNG image for export.
//!
//! Layout:
//! 1. Line chart: "Average Attendance Over Time - {module} Module", point markers
//! 2. Bar chart: "Average Attendance - {module} Module", horizontal grid only
//!
//! Both share the date labels on the x-axis, rotated to fit.

use super::series::{ChartSeries, X_AXIS_LABEL, Y_AXIS_LABEL};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::io::Cursor;
use thiserror::Error;

const LINE_COLOR: RGBColor = RGBColor(52, 152, 219);
const BAR_COLOR: RGBColor = RGBColor(46, 204, 113);
const NOTE_COLOR: RGBColor = RGBColor(120, 120, 120);

/// Upper bound of the y-axis; a little headroom above 100%.
const Y_MAX: f64 = 105.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Image buffer does not match {0}x{1}")]
    Buffer(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn drawing(err: impl std::fmt::Display) -> RenderError {
    RenderError::Drawing(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render both charts stacked vertically and return PNG bytes.
    pub fn render_png(data: &ChartSeries, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(drawing)?;

            let areas = root.split_evenly((2, 1));
            Self::draw_line_chart(&areas[0], data)?;
            Self::draw_bar_chart(&areas[1], data)?;

            root.present().map_err(drawing)?;
        }

        let image = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn caption(title: &str, data: &ChartSeries) -> String {
        format!("{} - {}", title, data.subtitle())
    }

    fn x_label_style() -> TextStyle<'static> {
        ("sans-serif", 12)
            .into_font()
            .transform(FontTransform::Rotate90)
            .into()
    }

    fn draw_no_data_note<DB: DrawingBackend>(
        area: &DrawingArea<DB, plotters::coord::Shift>,
        data: &ChartSeries,
    ) -> Result<(), RenderError> {
        let (w, h) = area.dim_in_pixel();
        let style = TextStyle::from(("sans-serif", 18).into_font()).color(&NOTE_COLOR);
        area.draw_text(
            &format!("No attendance data for {}", data.module),
            &style,
            (w as i32 / 3, h as i32 / 2),
        )
        .map_err(drawing)
    }

    fn draw_line_chart<DB: DrawingBackend>(
        area: &DrawingArea<DB, plotters::coord::Shift>,
        data: &ChartSeries,
    ) -> Result<(), RenderError> {
        let labels = data.labels();
        let n = labels.len() as i32;

        let mut chart = ChartBuilder::on(area)
            .caption(Self::caption(super::series::LINE_TITLE, data), ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(110)
            .y_label_area_size(60)
            .build_cartesian_2d(-1i32..n.max(1), 0f64..Y_MAX)
            .map_err(drawing)?;

        let formatter = |x: &i32| {
            usize::try_from(*x)
                .ok()
                .and_then(|i| labels.get(i))
                .cloned()
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .x_labels(labels.len().max(1) + 2)
            .x_label_formatter(&formatter)
            .x_label_style(Self::x_label_style())
            .draw()
            .map_err(drawing)?;

        if data.is_empty() {
            return Self::draw_no_data_note(area, data);
        }

        let points: Vec<(i32, f64)> = data
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as i32, p.percent))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), &LINE_COLOR))
            .map_err(drawing)?;
        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|(x, y)| Circle::new((x, y), 4, LINE_COLOR.filled())),
            )
            .map_err(drawing)?;

        Ok(())
    }

    fn draw_bar_chart<DB: DrawingBackend>(
        area: &DrawingArea<DB, plotters::coord::Shift>,
        data: &ChartSeries,
    ) -> Result<(), RenderError> {
        let labels = data.labels();
        let n = labels.len().max(1) as i32;

        let mut chart = ChartBuilder::on(area)
            .caption(Self::caption(super::series::BAR_TITLE, data), ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(110)
            .y_label_area_size(60)
            .build_cartesian_2d((0i32..n).into_segmented(), 0f64..Y_MAX)
            .map_err(drawing)?;

        let formatter = |x: &SegmentValue<i32>| match x {
            SegmentValue::CenterOf(i) => usize::try_from(*i)
                .ok()
                .and_then(|i| labels.get(i))
                .cloned()
                .unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&formatter)
            .x_label_style(Self::x_label_style())
            .draw()
            .map_err(drawing)?;

        if data.is_empty() {
            return Self::draw_no_data_note(area, data);
        }

        chart
            .draw_series(data.points.iter().enumerate().map(|(i, p)| {
                let i = i as i32;
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), p.percent),
                    ],
                    BAR_COLOR.filled(),
                );
                bar.set_margin(0, 0, 6, 6);
                bar
            }))
            .map_err(drawing)?;

        Ok(())
    }
}
