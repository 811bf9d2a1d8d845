//! The daily average run: load → derive date key → group and average →
//! format → write.

use crate::analysis::daily::{daily_averages, malformed_date_keys};
use crate::config::Config;
use crate::ingest::csv_file::{load_observations, LoadReport};
use crate::logging::{self, Stage};
use crate::model::{DailyAverage, OutputRow, PipelineError};
use crate::output::part_file::write_part_files;
use crate::report::RunReport;

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub days: Vec<DailyAverage>,
    pub rows: Vec<OutputRow>,
    pub load: LoadReport,
    pub report: RunReport,
}

/// Run the job described by `config`.
///
/// The output directory is replaced on success. Any error aborts the run
/// with nothing retried; a failure after the output directory was cleared
/// leaves it partially written.
pub fn run(config: &Config) -> Result<RunOutcome, PipelineError> {
    let input = &config.input;
    let output = &config.output;

    logging::info(Stage::Load, &format!("Reading {}", input.path.display()));
    let (observations, load) = load_observations(&input.path, &input.columns())?;
    logging::debug(
        Stage::Load,
        &format!("{} rows loaded, {} short", load.total_rows, load.short_rows),
    );
    if load.unparsed_values > 0 {
        logging::warn(
            Stage::Load,
            &format!("{} numeric cells did not parse and were treated as missing", load.unparsed_values),
        );
    }

    let days = daily_averages(&observations, input.date_key_len, output.decimals);
    let malformed = malformed_date_keys(&days, input.date_key_len);
    if !malformed.is_empty() {
        logging::warn(
            Stage::Transform,
            &format!("{} malformed date keys: {}", malformed.len(), malformed.join(", ")),
        );
    }
    let rows: Vec<OutputRow> = days.iter().map(DailyAverage::to_output_row).collect();

    let part = write_part_files(&rows, &output.dir, output.quote)?;
    logging::info(Stage::Write, &format!("Wrote {} rows to {}", rows.len(), part.display()));

    let report = RunReport::new(&input.path, &output.dir, &load, days.len(), malformed);
    if let Some(ref path) = output.report {
        report.save(path)?;
        logging::info(Stage::Report, &format!("Run report saved to {}", path.display()));
    }

    logging::log_run_summary(load.total_rows, days.len(), load.unparsed_values);

    Ok(RunOutcome {
        days,
        rows,
        load,
        report,
    })
}
