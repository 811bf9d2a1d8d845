/// Structured logging for the daily average job
///
/// Tags each message with the pipeline stage that produced it, with
/// timestamps and severity levels. Supports console output and an
/// optional append-only log file.

use chrono::Utc;
use serde::Deserialize;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::PipelineError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline Stages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Transform,
    Write,
    Report,
    System,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Load => write!(f, "LOAD"),
            Stage::Transform => write!(f, "XFORM"),
            Stage::Write => write!(f, "WRITE"),
            Stage::Report => write!(f, "REPORT"),
            Stage::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Input path does not exist
    FileNotFound,
    /// Required columns missing or renamed in the header
    SchemaMismatch,
    /// Input exists but could not be read or decoded
    ReadFailure,
    /// Output directory, part file, or report could not be written
    WriteFailure,
    /// Configuration file unreadable or malformed
    Configuration,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            FailureType::SchemaMismatch => write!(f, "SCHEMA_MISMATCH"),
            FailureType::ReadFailure => write!(f, "READ_FAILURE"),
            FailureType::WriteFailure => write!(f, "WRITE_FAILURE"),
            FailureType::Configuration => write!(f, "CONFIG"),
        }
    }
}

/// Classify a pipeline error
pub fn classify_failure(err: &PipelineError) -> FailureType {
    match err {
        PipelineError::InputNotFound(_) => FailureType::FileNotFound,
        PipelineError::MissingColumns(_) => FailureType::SchemaMismatch,
        PipelineError::Read { .. } => FailureType::ReadFailure,
        PipelineError::Write { .. } => FailureType::WriteFailure,
        PipelineError::Config(_) => FailureType::Configuration,
    }
}

/// Stage an error is attributed to in the log
pub fn failure_stage(failure: FailureType) -> Stage {
    match failure {
        FailureType::FileNotFound | FailureType::SchemaMismatch | FailureType::ReadFailure => {
            Stage::Load
        }
        FailureType::WriteFailure => Stage::Write,
        FailureType::Configuration => Stage::System,
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn format_entry(level: LogLevel, stage: Stage, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        format!("{} {} {}: {}", timestamp, level, stage, message)
    }

    fn log(&self, level: LogLevel, stage: Stage, message: &str) {
        if level < self.min_level {
            return;
        }

        let log_entry = Self::format_entry(level, stage, message);

        // Console output
        if self.console_timestamps {
            match level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
                LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}: {}", stage, message),
                LogLevel::Warning => eprintln!("   ⚠ {}: {}", stage, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn dispatch(level: LogLevel, stage: Stage, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, stage, message);
        }
    }
}

/// Log a general informational message
pub fn info(stage: Stage, message: &str) {
    dispatch(LogLevel::Info, stage, message);
}

/// Log a warning message
pub fn warn(stage: Stage, message: &str) {
    dispatch(LogLevel::Warning, stage, message);
}

/// Log an error message
pub fn error(stage: Stage, message: &str) {
    dispatch(LogLevel::Error, stage, message);
}

/// Log a debug message
pub fn debug(stage: Stage, message: &str) {
    dispatch(LogLevel::Debug, stage, message);
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Failure line, e.g. `Daily average run failed [SCHEMA_MISMATCH]: Missing required columns: dewpoint`
pub fn failure_message(operation: &str, err: &PipelineError) -> String {
    format!("{} failed [{}]: {}", operation, classify_failure(err), err)
}

/// Log a fatal pipeline error with its classification
pub fn log_failure(operation: &str, err: &PipelineError) {
    let stage = failure_stage(classify_failure(err));
    error(stage, &failure_message(operation, err));
}

// ---------------------------------------------------------------------------
// Run Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of a completed run
pub fn log_run_summary(rows_read: usize, days: usize, unparsed_values: usize) {
    let message = format!(
        "Run complete: {} rows averaged into {} days, {} unparsed values",
        rows_read, days, unparsed_values
    );

    if unparsed_values == 0 {
        info(Stage::System, &message);
    } else {
        warn(Stage::System, &message);
    }
}
