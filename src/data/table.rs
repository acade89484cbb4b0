//! Attendance Table
//! The normalized, read-only dataset shared by every view.

use polars::prelude::*;

/// Normalized attendance rows. Only `DataProcessor::normalize` builds one,
/// and nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct AttendanceTable {
    df: DataFrame,
}

impl AttendanceTable {
    pub(crate) fn from_normalized(df: DataFrame) -> Self {
        Self { df }
    }

    /// Read-only access to the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
