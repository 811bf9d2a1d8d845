/// Weather CSV loader
///
/// Reads a header-first CSV file (e.g. `Asheville_weather.csv`) into
/// `Observation`s. Only the timestamp, temperature and dew point columns are
/// kept; any other columns are ignored.
///
/// Cells are loaded permissively: a blank cell, a numeric cell that does not
/// parse, or a cell missing from a short row all become `None`. The only
/// structural requirement is that the header names every required column.
///
/// Rows are read as raw bytes and only the three required cells are decoded,
/// lossily, as UTF-8. Other columns may hold any encoding.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};

use crate::model::{Observation, PipelineError, COL_DATETIME, COL_DEWPOINT, COL_TEMPERATURE};

// ============================================================================
// Column selection
// ============================================================================

/// Header names of the three columns the job reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNames {
    pub datetime: String,
    pub temperature: String,
    pub dewpoint: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            datetime: COL_DATETIME.to_string(),
            temperature: COL_TEMPERATURE.to_string(),
            dewpoint: COL_DEWPOINT.to_string(),
        }
    }
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnIndices {
    datetime: usize,
    temperature: usize,
    dewpoint: usize,
}

/// Locates every required column in `headers`.
///
/// Fails with all missing names at once rather than stopping at the first.
fn resolve_columns(headers: &ByteRecord, names: &ColumnNames) -> Result<ColumnIndices, PipelineError> {
    let find = |name: &str| headers.iter().position(|h| h == name.as_bytes());

    let wanted = [&names.datetime, &names.temperature, &names.dewpoint];
    let found: Vec<Option<usize>> = wanted.iter().map(|n| find(n.as_str())).collect();

    let missing: Vec<String> = wanted
        .iter()
        .zip(&found)
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

    match (found[0], found[1], found[2]) {
        (Some(datetime), Some(temperature), Some(dewpoint)) => Ok(ColumnIndices {
            datetime,
            temperature,
            dewpoint,
        }),
        _ => Err(PipelineError::MissingColumns(missing)),
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Summary of what happened while loading the CSV.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Data rows read (header excluded).
    pub total_rows: usize,
    /// Rows with fewer fields than the header.
    pub short_rows: usize,
    /// Non-blank numeric cells that did not parse and were loaded as missing.
    pub unparsed_values: usize,
}

/// Parse a numeric cell. Blank and unparseable cells are `None`; the second
/// element reports whether a non-blank cell was discarded.
fn parse_numeric(cell: Option<&str>) -> (Option<f64>, bool) {
    match cell.map(str::trim) {
        None | Some("") => (None, false),
        Some(s) => match s.parse::<f64>() {
            Ok(v) => (Some(v), false),
            Err(_) => (None, true),
        },
    }
}

fn decode(cell: Option<&[u8]>) -> Option<Cow<'_, str>> {
    cell.map(String::from_utf8_lossy)
}

fn parse_text(cell: Option<&str>) -> Option<String> {
    match cell {
        None | Some("") => None,
        Some(s) => Some(s.to_string()),
    }
}

/// Load every row of the CSV at `path`.
///
/// # Errors
/// - `InputNotFound` if the file does not exist.
/// - `MissingColumns` if the header (or lack of one) omits a required column.
/// - `Read` for any other I/O or CSV decoding failure.
pub fn load_observations(
    path: &Path,
    columns: &ColumnNames,
) -> Result<(Vec<Observation>, LoadReport), PipelineError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PipelineError::InputNotFound(path.to_path_buf()),
        _ => read_error(path, e),
    })?;

    // `flexible(true)` accepts short rows instead of failing the whole load.
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = rdr.byte_headers().map_err(|e| read_error(path, e))?.clone();
    let idx = resolve_columns(&headers, columns)?;

    let mut observations = Vec::new();
    let mut report = LoadReport::default();

    for result in rdr.byte_records() {
        let record = result.map_err(|e| read_error(path, e))?;
        report.total_rows += 1;
        if record.len() < headers.len() {
            report.short_rows += 1;
        }

        let (temperature, temp_dropped) = parse_numeric(decode(record.get(idx.temperature)).as_deref());
        let (dewpoint, dew_dropped) = parse_numeric(decode(record.get(idx.dewpoint)).as_deref());
        report.unparsed_values += temp_dropped as usize + dew_dropped as usize;

        observations.push(Observation {
            datetime: parse_text(decode(record.get(idx.datetime)).as_deref()),
            temperature,
            dewpoint,
        });
    }

    Ok((observations, report))
}

fn read_error(path: &Path, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Read {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
