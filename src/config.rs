/// Run configuration for the daily average job.
///
/// Loaded from a TOML file; every field has a default, so an empty file or
/// no file at all gives the stock run `Asheville_weather.csv` →
/// `daily_avg_output/`.
///
/// ```toml
/// [input]
/// path = "Asheville_weather.csv"
/// datetime_column = "datetime"
///
/// [output]
/// dir = "daily_avg_output"
/// quote = "never"          # or "necessary"
/// report = "daily_avg_report.json"
///
/// [logging]
/// level = "info"
/// file = "daily_avg.log"
/// ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ingest::csv_file::ColumnNames;
use crate::logging::LogLevel;
use crate::model::{PipelineError, COL_DATETIME, COL_DEWPOINT, COL_TEMPERATURE, DATE_KEY_LEN};
use crate::output::part_file::QuoteMode;
use crate::output::table::DEFAULT_SHOW_ROWS;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "DAILY_AVG_CONFIG";

/// Config file used when `DAILY_AVG_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "daily_avg.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub path: PathBuf,
    pub datetime_column: String,
    pub temperature_column: String,
    pub dewpoint_column: String,
    /// Leading characters of the timestamp used as the date key.
    pub date_key_len: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Asheville_weather.csv"),
            datetime_column: COL_DATETIME.to_string(),
            temperature_column: COL_TEMPERATURE.to_string(),
            dewpoint_column: COL_DEWPOINT.to_string(),
            date_key_len: DATE_KEY_LEN,
        }
    }
}

impl InputConfig {
    pub fn columns(&self) -> ColumnNames {
        ColumnNames {
            datetime: self.datetime_column.clone(),
            temperature: self.temperature_column.clone(),
            dewpoint: self.dewpoint_column.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub decimals: usize,
    /// Rows drawn in the console table.
    pub show_rows: usize,
    pub quote: QuoteMode,
    /// Where to save the JSON run report; no report when unset.
    pub report: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("daily_avg_output"),
            decimals: 2,
            show_rows: DEFAULT_SHOW_ROWS,
            quote: QuoteMode::Never,
            report: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: None,
            timestamps: false,
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, PipelineError> {
        toml::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    /// Resolve the config for this process.
    ///
    /// Reads `.env` if present, then `DAILY_AVG_CONFIG`. An explicitly named
    /// file must exist; the default `daily_avg.toml` is optional.
    pub fn from_env() -> Result<Self, PipelineError> {
        dotenv::dotenv().ok();

        match env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input.path, PathBuf::from("Asheville_weather.csv"));
        assert_eq!(config.output.dir, PathBuf::from("daily_avg_output"));
        assert_eq!(config.input.date_key_len, 8);
        assert_eq!(config.output.decimals, 2);
        assert_eq!(config.output.show_rows, 20);
    }

    #[test]
    fn test_partial_tables_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [input]
            path = "data/kavl.csv"
            temperature_column = "tmpf"

            [output]
            quote = "necessary"
            report = "report.json"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.input.path, PathBuf::from("data/kavl.csv"));
        assert_eq!(config.input.columns().temperature, "tmpf");
        assert_eq!(config.input.columns().dewpoint, "dewpoint");
        assert_eq!(config.output.quote, QuoteMode::Necessary);
        assert_eq!(config.output.report, Some(PathBuf::from("report.json")));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(!config.logging.timestamps);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("[output]\nformat = \"parquet\"\n").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
