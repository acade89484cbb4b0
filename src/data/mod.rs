//! Data module - CSV loading, normalization and aggregation

pub mod columns;
mod aggregator;
mod dates;
mod loader;
mod processor;
mod table;

pub use aggregator::{Aggregator, AggregatorError, DailyAttendance};
pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
pub use table::AttendanceTable;

use crate::error::StartupError;
use std::path::Path;
use tracing::info;

/// Load and normalize the attendance export in one step.
pub fn load_attendance(path: &Path) -> Result<AttendanceTable, StartupError> {
    let raw = DataLoader::load_csv(path)?;
    let table = DataProcessor::normalize(&raw)?;
    info!(
        "Normalized {} rows into columns {:?}",
        table.row_count(),
        table.column_names()
    );
    Ok(table)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{csv_file, write_csv, Row, SOURCE_HEADER};
    use super::*;

    #[test]
    fn test_load_attendance_end_to_end() {
        let file = csv_file(&[
            Row::new("Algorithms", "2024-01-01 09:00:00", "1"),
            Row::new("Algorithms", "2024-01-01 09:00:00", "0"),
        ]);

        let table = load_attendance(file.path()).unwrap();
        assert_eq!(table.row_count(), 2);

        let daily = Aggregator::daily_attendance(&table, "Algorithms").unwrap();
        assert_eq!(daily.len(), 1);
        assert!((daily[0].attendance_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_long_description_is_startup_error() {
        let header: Vec<&str> = SOURCE_HEADER
            .iter()
            .copied()
            .filter(|c| *c != "Long Description")
            .collect();
        let file = write_csv(&header, &[Row::new("Algorithms", "2024-01-01", "1")]);

        let err = load_attendance(file.path()).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Normalize(ProcessorError::MissingColumns(ref cols))
                if cols == &vec!["Long Description".to_string()]
        ));
        assert!(err.to_string().contains("Long Description"));
    }

    #[test]
    fn test_missing_file_is_startup_error() {
        let err = load_attendance(Path::new("/nonexistent/attendance.csv")).unwrap_err();
        assert!(matches!(err, StartupError::Load(LoaderError::NotFound(_))));
    }
}
