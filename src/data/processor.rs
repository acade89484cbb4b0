//! Data Processor Module
//! Cleans the raw export: drops unused columns, renames to display names,
//! parses dates and validates attendance marks.

use super::columns::{ATTENDED, COLUMN_MAP, DATE, DROPPED_COLUMNS, MODULE_NAME};
use super::dates;
use super::table::AttendanceTable;
use polars::prelude::*;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Missing date at row {row}")]
    MissingDate { row: usize },
    #[error("Unparseable date {value:?} at row {row}")]
    UnparseableDate { row: usize, value: String },
    #[error("Attended value {value} at row {row} is outside [0, 1]")]
    AttendedOutOfRange { row: usize, value: f64 },
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Normalize a raw export into an `AttendanceTable`.
    ///
    /// Each canonical column is taken from its source name, or from its display
    /// name when the frame was already normalized. Columns outside the map are
    /// dropped. Row numbers in errors are 1-based data rows.
    pub fn normalize(raw: &DataFrame) -> Result<AttendanceTable, ProcessorError> {
        let present: BTreeSet<String> = raw
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<String> = COLUMN_MAP
            .iter()
            .filter(|(source, display)| !present.contains(*source) && !present.contains(*display))
            .map(|(source, _)| source.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ProcessorError::MissingColumns(missing));
        }

        for name in present.iter().filter(|name| !Self::is_known_column(name)) {
            debug!("Dropping unmapped column '{}'", name);
        }

        let mut columns = Vec::with_capacity(COLUMN_MAP.len());
        for (source, display) in COLUMN_MAP {
            let name = if present.contains(source) { source } else { display };
            let column = raw.column(name)?;
            let column = match display {
                DATE => Self::parse_dates(column)?,
                ATTENDED => Self::validate_attended(column)?,
                MODULE_NAME => column.cast(&DataType::String)?,
                _ => column.clone(),
            };
            columns.push(column.with_name(display.into()));
        }

        let df = DataFrame::new(columns)?;
        Ok(AttendanceTable::from_normalized(df))
    }

    /// Distinct module names, sorted ascending.
    pub fn module_choices(table: &AttendanceTable) -> Result<Vec<String>, ProcessorError> {
        let names = table
            .frame()
            .column(MODULE_NAME)?
            .as_materialized_series()
            .str()?;

        let unique: BTreeSet<&str> = names.into_iter().flatten().collect();
        Ok(unique.into_iter().map(str::to_owned).collect())
    }

    fn is_known_column(name: &str) -> bool {
        DROPPED_COLUMNS.contains(&name)
            || COLUMN_MAP
                .iter()
                .any(|(source, display)| *source == name || *display == name)
    }

    /// Parse the date column into millisecond timestamps. The first value
    /// fixes the day/month order for every later row.
    fn parse_dates(column: &Column) -> Result<Column, ProcessorError> {
        let target = DataType::Datetime(TimeUnit::Milliseconds, None);
        if matches!(column.dtype(), DataType::Datetime(_, _) | DataType::Date) {
            return Ok(column.cast(&target)?);
        }

        let text = column.cast(&DataType::String)?;
        let text = text.as_materialized_series().str()?;

        let mut order = None;
        let mut millis: Vec<i64> = Vec::with_capacity(text.len());
        for (idx, value) in text.into_iter().enumerate() {
            let row = idx + 1;
            let value = value.ok_or(ProcessorError::MissingDate { row })?;
            let parsed = match order {
                Some(known) => dates::parse_timestamp_as(value, known).map(|ts| (known, ts)),
                None => dates::parse_timestamp(value),
            };
            let (found, ts) = parsed.ok_or_else(|| ProcessorError::UnparseableDate {
                row,
                value: value.to_string(),
            })?;
            if order.is_none() {
                debug!("Reading dates as {:?}", found);
            }
            order = Some(found);
            millis.push(dates::to_millis(ts));
        }

        Ok(Column::new(DATE.into(), millis).cast(&target)?)
    }

    /// Cast marks to float and reject anything outside [0, 1]. Nulls pass.
    fn validate_attended(column: &Column) -> Result<Column, ProcessorError> {
        let values = column
            .as_materialized_series()
            .strict_cast(&DataType::Float64)?;

        for (idx, value) in values.f64()?.into_iter().enumerate() {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ProcessorError::AttendedOutOfRange {
                        row: idx + 1,
                        value: v,
                    });
                }
            }
        }

        Ok(Column::from(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns;
    use crate::data::fixtures::{csv_file, write_csv, Row, SOURCE_HEADER};
    use crate::data::DataLoader;
    use chrono::NaiveDate;

    fn raw(rows: &[Row]) -> DataFrame {
        let file = csv_file(rows);
        DataLoader::load_csv(file.path()).unwrap()
    }

    fn canonical_names() -> Vec<String> {
        COLUMN_MAP.iter().map(|(_, d)| d.to_string()).collect()
    }

    #[test]
    fn test_renames_and_drops_columns() {
        let table =
            DataProcessor::normalize(&raw(&[Row::new("Algorithms", "2024-01-01", "1")])).unwrap();

        let names = table.column_names();
        assert_eq!(names, canonical_names());
        assert!(!names.iter().any(|n| n == "Planned End Date"));
        assert!(!names.iter().any(|n| n == "Long Description"));
    }

    #[test]
    fn test_parses_dates_to_datetime() {
        let table = DataProcessor::normalize(&raw(&[
            Row::new("Algorithms", "2024-01-01 09:00:00", "1"),
            Row::new("Algorithms", "2024-01-02", "0"),
        ]))
        .unwrap();

        let date = table.frame().column(columns::DATE).unwrap();
        assert_eq!(
            date.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );

        let millis = date.cast(&DataType::Int64).unwrap();
        let millis: Vec<Option<i64>> = millis
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(millis[0], Some(dates::to_millis(expected)));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let first = DataProcessor::normalize(&raw(&[
            Row::new("Algorithms", "2024-01-01 09:00:00", "1"),
            Row::new("Databases", "2024-01-03 14:00:00", "0"),
        ]))
        .unwrap();
        let second = DataProcessor::normalize(first.frame()).unwrap();

        assert_eq!(first.column_names(), second.column_names());
        assert!(first.frame().equals_missing(second.frame()));
    }

    #[test]
    fn test_unmapped_columns_are_dropped() {
        let mut header: Vec<&str> = SOURCE_HEADER.to_vec();
        header.push("Room");
        let file = write_csv(&header, &[Row::new("Algorithms", "2024-01-01", "1")]);
        let df = DataLoader::load_csv(file.path()).unwrap();

        let table = DataProcessor::normalize(&df).unwrap();
        assert_eq!(table.column_names(), canonical_names());
    }

    #[test]
    fn test_planned_end_date_is_optional() {
        let header: Vec<&str> = SOURCE_HEADER
            .iter()
            .copied()
            .filter(|c| *c != "Planned End Date")
            .collect();
        let file = write_csv(&header, &[Row::new("Algorithms", "2024-01-01", "1")]);
        let df = DataLoader::load_csv(file.path()).unwrap();

        assert!(DataProcessor::normalize(&df).is_ok());
    }

    #[test]
    fn test_reports_every_missing_column() {
        let header: Vec<&str> = SOURCE_HEADER
            .iter()
            .copied()
            .filter(|c| *c != "Long Description" && *c != "Postive Marks")
            .collect();
        let file = write_csv(&header, &[Row::new("Algorithms", "2024-01-01", "1")]);
        let df = DataLoader::load_csv(file.path()).unwrap();

        let err = DataProcessor::normalize(&df).unwrap_err();
        match err {
            ProcessorError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["Long Description", "Postive Marks"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparseable_date_fails_whole_table() {
        let err = DataProcessor::normalize(&raw(&[
            Row::new("Algorithms", "2024-01-01", "1"),
            Row::new("Algorithms", "sometime soon", "1"),
        ]))
        .unwrap_err();

        match err {
            ProcessorError::UnparseableDate { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "sometime soon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mixed_day_month_order_fails() {
        let err = DataProcessor::normalize(&raw(&[
            Row::new("Algorithms", "01/02/2024", "1"),
            Row::new("Algorithms", "13/02/2024", "0"),
        ]))
        .unwrap_err();

        match err {
            ProcessorError::UnparseableDate { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "13/02/2024");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_day_first_column_stays_day_first() {
        let table = DataProcessor::normalize(&raw(&[
            Row::new("Algorithms", "13/02/2024", "1"),
            Row::new("Algorithms", "01/03/2024", "0"),
        ]))
        .unwrap();

        let millis = table.frame().column(columns::DATE).unwrap();
        let millis = millis.cast(&DataType::Int64).unwrap();
        let millis: Vec<Option<i64>> = millis
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        let first_of_march = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(millis[1], Some(dates::to_millis(first_of_march)));
    }

    #[test]
    fn test_empty_date_fails() {
        let err = DataProcessor::normalize(&raw(&[Row::new("Algorithms", "", "1")])).unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::MissingDate { row: 1 } | ProcessorError::UnparseableDate { row: 1, .. }
        ));
    }

    #[test]
    fn test_attended_outside_unit_range_fails() {
        let err = DataProcessor::normalize(&raw(&[
            Row::new("Algorithms", "2024-01-01", "1"),
            Row::new("Algorithms", "2024-01-01", "2"),
        ]))
        .unwrap_err();

        match err {
            ProcessorError::AttendedOutOfRange { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, 2.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_module_choices_sorted_and_unique() {
        let table = DataProcessor::normalize(&raw(&[
            Row::new("Operating Systems", "2024-01-01", "1"),
            Row::new("Algorithms", "2024-01-01", "1"),
            Row::new("Databases", "2024-01-02", "0"),
            Row::new("Algorithms", "2024-01-02", "0"),
        ]))
        .unwrap();

        let choices = DataProcessor::module_choices(&table).unwrap();
        assert_eq!(choices, vec!["Algorithms", "Databases", "Operating Systems"]);
        assert_eq!(DataProcessor::module_choices(&table).unwrap(), choices);
    }
}
