/// Core data types for the daily weather averaging job.
///
/// This module defines the shared domain model imported by all other modules:
/// the raw observation read from the input CSV, the per-day aggregate, the
/// row written to the output directory, and the error type for a run.
/// It contains no I/O.

use std::path::PathBuf;

use crate::analysis::format::format_double;

// ---------------------------------------------------------------------------
// Column defaults
// ---------------------------------------------------------------------------

/// Timestamp column, formatted `YYYYMMDDhhmm...`.
pub const COL_DATETIME: &str = "datetime";

/// Air temperature column.
pub const COL_TEMPERATURE: &str = "temperature";

/// Dew point column.
pub const COL_DEWPOINT: &str = "dewpoint";

/// Number of leading characters of `datetime` that form the date key.
pub const DATE_KEY_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A single input row, reduced to the three columns the job reads.
///
/// Blank cells and numeric cells that do not parse are `None`, the same way
/// a dataframe engine would load them as nulls.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub datetime: Option<String>, // e.g. "202301010600"
    pub temperature: Option<f64>,
    pub dewpoint: Option<f64>,
}

/// Averages for one date key.
///
/// `date` is `None` for the group of rows whose `datetime` cell was blank.
/// An average is `None` when no row in the group had a value for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAverage {
    pub date: Option<String>,
    pub avg_temp: Option<f64>,
    pub avg_dewpoint: Option<f64>,
}

impl DailyAverage {
    /// The display string `"<avg_temp>, <avg_dewpoint>"`.
    ///
    /// Missing averages are skipped rather than rendered, so a day with no
    /// dew point readings produces just `"<avg_temp>"`.
    pub fn combined_result(&self) -> String {
        [self.avg_temp, self.avg_dewpoint]
            .iter()
            .flatten()
            .map(|v| format_double(*v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_output_row(&self) -> OutputRow {
        OutputRow {
            date: self.date.clone(),
            combined_result: self.combined_result(),
        }
    }
}

/// One line of the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub date: Option<String>,
    pub combined_result: String,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that abort a daily average run.
#[derive(Debug, PartialEq)]
pub enum PipelineError {
    /// The input CSV does not exist.
    InputNotFound(PathBuf),
    /// The header row lacks one or more required columns.
    MissingColumns(Vec<String>),
    /// The input exists but could not be read or decoded.
    Read { path: PathBuf, message: String },
    /// The output directory, part file, or report could not be written.
    Write { path: PathBuf, message: String },
    /// The configuration file is unreadable or malformed.
    Config(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::InputNotFound(path) => {
                write!(f, "Input file not found: {}", path.display())
            }
            PipelineError::MissingColumns(columns) => {
                write!(f, "Missing required columns: {}", columns.join(", "))
            }
            PipelineError::Read { path, message } => {
                write!(f, "Failed to read {}: {}", path.display(), message)
            }
            PipelineError::Write { path, message } => {
                write!(f, "Failed to write {}: {}", path.display(), message)
            }
            PipelineError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_result_joins_both_averages() {
        let day = DailyAverage {
            date: Some("20230101".to_string()),
            avg_temp: Some(11.0),
            avg_dewpoint: Some(6.0),
        };
        assert_eq!(day.combined_result(), "11.0, 6.0");
    }

    #[test]
    fn test_combined_result_skips_missing_average() {
        let day = DailyAverage {
            date: Some("20230101".to_string()),
            avg_temp: None,
            avg_dewpoint: Some(6.25),
        };
        assert_eq!(day.combined_result(), "6.25");

        let empty = DailyAverage {
            date: None,
            avg_temp: None,
            avg_dewpoint: None,
        };
        assert_eq!(empty.combined_result(), "");
    }

    #[test]
    fn test_error_display() {
        let err = PipelineError::MissingColumns(vec!["dewpoint".into(), "datetime".into()]);
        assert_eq!(err.to_string(), "Missing required columns: dewpoint, datetime");

        let err = PipelineError::InputNotFound(PathBuf::from("Asheville_weather.csv"));
        assert_eq!(err.to_string(), "Input file not found: Asheville_weather.csv");
    }
}
