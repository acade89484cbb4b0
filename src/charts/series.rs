//! Chart Series
//! Shapes daily attendance into the points, labels and titles both charts draw.

use crate::data::DailyAttendance;
use chrono::{DateTime, NaiveDateTime, NaiveTime};

pub const LINE_TITLE: &str = "Average Attendance Over Time";
pub const BAR_TITLE: &str = "Average Attendance";
pub const X_AXIS_LABEL: &str = "Date";
pub const Y_AXIS_LABEL: &str = "Attendance Rate (% of those invited)";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// One plotted value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDateTime,
    /// Days since the Unix epoch, the x position on interactive charts.
    pub day: f64,
    pub percent: f64,
    pub label: String,
}

/// Everything a renderer needs for the line and bar charts of one module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub module: String,
    /// Ascending by date.
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(module: &str, daily: &[DailyAttendance]) -> Self {
        let points = daily
            .iter()
            .map(|d| ChartPoint {
                date: d.date,
                day: to_day(d.date),
                percent: d.attendance_percent,
                label: date_label(d.date),
            })
            .collect();

        Self {
            module: module.to_string(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Second title line shared by both charts.
    pub fn subtitle(&self) -> String {
        format!("{} Module", self.module)
    }

    pub fn line_title(&self) -> String {
        format!("{}\n{}", LINE_TITLE, self.subtitle())
    }

    pub fn bar_title(&self) -> String {
        format!("{}\n{}", BAR_TITLE, self.subtitle())
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }
}

/// Fractional days since the Unix epoch.
pub fn to_day(date: NaiveDateTime) -> f64 {
    date.and_utc().timestamp() as f64 / SECONDS_PER_DAY
}

/// Inverse of `to_day`, rounded to the nearest second.
pub fn from_day(day: f64) -> Option<NaiveDateTime> {
    if !day.is_finite() {
        return None;
    }
    DateTime::from_timestamp((day * SECONDS_PER_DAY).round() as i64, 0).map(|dt| dt.naive_utc())
}

/// `2024-01-15`, or `2024-01-15 09:30` when the time is not midnight.
pub fn date_label(date: NaiveDateTime) -> String {
    if date.time() == NaiveTime::MIN {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M").to_string()
    }
}
