//! JSON array output
//!
//! Writes every announcement of a run as one pretty-printed JSON array.

use crate::config::OutputConfig;
use crate::model::Announcement;
use crate::output::traits::{OutputResult, ResultSink, SinkOutcome};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes announcements to a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    indent: usize,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>, indent: usize) -> Self {
        Self {
            path: path.into(),
            indent,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.json_path, config.indent)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonFileSink {
    fn write(&self, announcements: &[Announcement]) -> OutputResult<SinkOutcome> {
        if announcements.is_empty() {
            return Ok(SinkOutcome::Skipped);
        }

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        write_json_array(&mut writer, announcements, self.indent)?;
        writer.flush()?;

        Ok(SinkOutcome::Written {
            path: self.path.clone(),
            count: announcements.len(),
        })
    }
}

/// Serializes announcements as a JSON array indented by `indent` spaces
///
/// A trailing newline follows the closing bracket.
pub fn write_json_array<W: Write>(
    writer: &mut W,
    announcements: &[Announcement],
    indent: usize,
) -> OutputResult<()> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
    announcements.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Serializes announcements to a string; see [`write_json_array`]
pub fn to_json_string(announcements: &[Announcement], indent: usize) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_json_array(&mut buffer, announcements, indent)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
