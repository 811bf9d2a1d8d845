//! Per-day average temperature and dew point from a weather CSV.

pub mod analysis;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod report;
