//! Result sinks: the part-file directory on disk and the console table.

pub mod part_file;
pub mod table;
