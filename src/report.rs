//! Run Report
//!
//! JSON summary of one run: what was read, what was written, and which
//! date keys look wrong. Written next to the output when `[output] report`
//! is configured.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ingest::csv_file::LoadReport;
use crate::model::PipelineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: String,
    pub input_path: String,
    pub output_dir: String,
    pub rows_read: usize,
    pub short_rows: usize,
    pub unparsed_values: usize,
    pub days: usize,
    /// Date keys that are not valid `YYYYMMDD` dates.
    pub malformed_date_keys: Vec<String>,
}

impl RunReport {
    pub fn new(
        input_path: &Path,
        output_dir: &Path,
        load: &LoadReport,
        days: usize,
        malformed_date_keys: Vec<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            input_path: input_path.display().to_string(),
            output_dir: output_dir.display().to_string(),
            rows_read: load.total_rows,
            short_rows: load.short_rows,
            unparsed_values: load.unparsed_values,
            days,
            malformed_date_keys,
        }
    }

    /// Pretty-printed JSON, overwriting `path`.
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        let write_error = |message: String| PipelineError::Write {
            path: path.to_path_buf(),
            message,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| write_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_saves_as_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("report.json");
        let load = LoadReport {
            total_rows: 3,
            short_rows: 0,
            unparsed_values: 1,
        };

        let report = RunReport::new(
            Path::new("Asheville_weather.csv"),
            Path::new("daily_avg_output"),
            &load,
            2,
            vec!["2023".to_string()],
        );
        report.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: RunReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["rows_read"], 3);
        assert_eq!(value["malformed_date_keys"][0], "2023");
    }
}
