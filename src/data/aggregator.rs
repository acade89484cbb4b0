//! Daily Attendance Aggregator
//! Per-date attendance rate for one module.

use super::columns::{ATTENDED, DATE, MODULE_NAME};
use super::dates;
use super::table::AttendanceTable;
use chrono::NaiveDateTime;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}

/// Attendance for one module on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAttendance {
    pub date: NaiveDateTime,
    /// Mean of the 0/1 attended marks.
    pub mean_attended: f64,
    /// `mean_attended * 100`.
    pub attendance_percent: f64,
}

pub struct Aggregator;

impl Aggregator {
    /// Daily attendance for `module_name`, ascending by date.
    ///
    /// The module match is exact and case-sensitive; an unknown module gives an
    /// empty vector. Dates group on exact timestamp equality. A date whose marks
    /// are all null has no mean and is left out.
    pub fn daily_attendance(
        table: &AttendanceTable,
        module_name: &str,
    ) -> Result<Vec<DailyAttendance>, AggregatorError> {
        let daily = table
            .frame()
            .clone()
            .lazy()
            .filter(col(MODULE_NAME).eq(lit(module_name)))
            .group_by([col(DATE)])
            .agg([col(ATTENDED).mean()])
            .sort([DATE], SortMultipleOptions::default())
            .collect()?;

        let millis = daily.column(DATE)?.cast(&DataType::Int64)?;
        let means = daily.column(ATTENDED)?.cast(&DataType::Float64)?;

        let millis = millis.as_materialized_series().i64()?;
        let means = means.as_materialized_series().f64()?;

        let mut out = Vec::with_capacity(daily.height());
        for (ms, mean) in millis.into_iter().zip(means.into_iter()) {
            let (Some(ms), Some(mean)) = (ms, mean) else {
                continue;
            };
            let date = dates::from_millis(ms).ok_or(AggregatorError::InvalidTimestamp(ms))?;
            out.push(DailyAttendance {
                date,
                mean_attended: mean,
                attendance_percent: mean * 100.0,
            });
        }

        Ok(out)
    }
}
