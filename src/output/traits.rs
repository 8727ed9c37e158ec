//! Output sink trait and types
//!
//! A sink receives the announcements of one finished run and persists them
//! as a single artifact.

use crate::model::Announcement;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize announcements: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What a sink did with a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// The artifact was written
    Written { path: PathBuf, count: usize },

    /// Nothing to write; no artifact was touched
    Skipped,
}

/// Destination for the announcements of one run
pub trait ResultSink {
    /// Writes all announcements at once
    ///
    /// An empty slice is skipped rather than written.
    fn write(&self, announcements: &[Announcement]) -> OutputResult<SinkOutcome>;
}
