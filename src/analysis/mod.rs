/// Aggregation and number handling for the daily average job.
///
/// Submodules:
/// - `daily`   : date key derivation and the group-by-date averaging.
/// - `rounding`: HALF_UP decimal rounding of `f64` averages.
/// - `format`  : renders averages the way the result table and file show them.

pub mod daily;
pub mod format;
pub mod rounding;
