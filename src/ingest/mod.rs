/// Input readers for the daily average job.
///
/// Submodules:
/// - `csv_file`: header-first weather CSV into `Observation`s.

pub mod csv_file;
