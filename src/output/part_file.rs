//! Part-file output directory.
//!
//! The result is written as a directory rather than a single file:
//!
//! ```text
//! daily_avg_output/
//!   part-00000.csv   one line per date, no header
//!   _SUCCESS         empty marker, written last
//! ```
//!
//! Whatever already exists at the output path is removed first, so two runs
//! over the same input leave byte-identical files behind.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use serde::Deserialize;

use crate::model::{OutputRow, PipelineError};

pub const PART_FILE_NAME: &str = "part-00000.csv";
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Quoting applied to output fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    /// Never quote: `20230101,11.0, 6.0`.
    #[default]
    Never,
    /// Quote fields containing the delimiter: `20230101,"11.0, 6.0"`.
    Necessary,
}

impl From<QuoteMode> for QuoteStyle {
    fn from(mode: QuoteMode) -> Self {
        match mode {
            QuoteMode::Never => QuoteStyle::Never,
            QuoteMode::Necessary => QuoteStyle::Necessary,
        }
    }
}

/// Replace `dir` with a fresh part-file directory holding `rows`.
///
/// Returns the path of the part file.
pub fn write_part_files(
    rows: &[OutputRow],
    dir: &Path,
    quote: QuoteMode,
) -> Result<PathBuf, PipelineError> {
    clear_output(dir)?;
    fs::create_dir_all(dir).map_err(|e| write_error(dir, e))?;

    let part_path = dir.join(PART_FILE_NAME);
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(quote.into())
        .from_path(&part_path)
        .map_err(|e| write_error(&part_path, e))?;

    for row in rows {
        wtr.write_record([row.date.as_deref().unwrap_or(""), row.combined_result.as_str()])
            .map_err(|e| write_error(&part_path, e))?;
    }
    wtr.flush().map_err(|e| write_error(&part_path, e))?;

    let marker = dir.join(SUCCESS_MARKER);
    fs::write(&marker, b"").map_err(|e| write_error(&marker, e))?;

    Ok(part_path)
}

/// Remove a previous result at `path`, file or directory.
fn clear_output(path: &Path) -> Result<(), PipelineError> {
    let removed = if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        Ok(())
    };
    removed.map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
