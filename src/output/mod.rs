//! Output module for finished runs
//!
//! This module handles:
//! - Writing the announcements of a run as one JSON array
//! - Summarizing a run for the console

mod json;
pub mod stats;
mod traits;

pub use json::{to_json_string, write_json_array, JsonFileSink};
pub use stats::{print_statistics, RunStatistics};
pub use traits::{OutputError, OutputResult, ResultSink, SinkOutcome};
