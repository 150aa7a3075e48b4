//! Line-oriented text export of result and process logs.
//!
//! Losing an export never invalidates the clustering result, so I/O failures
//! are collected into an [`ExportReport`] instead of being returned as errors.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::result_log::ResultLog;

/// Outcome of exporting both logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Lines written to the result sink.
    pub result_lines: usize,
    /// Lines written to the process sink.
    pub process_lines: usize,
    /// Descriptions of I/O failures, empty when everything was written.
    pub failures: Vec<String>,
}

impl ExportReport {
    /// Whether both logs were written completely.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Which of the two logs a sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogKind {
    Result,
    Process,
}

impl LogKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Result => "result",
            Self::Process => "process",
        }
    }
}

/// Write `log` to `sink`, recording the line count or the failure in `report`.
pub(crate) fn export_log(
    log: &ResultLog,
    sink: &mut dyn Write,
    kind: LogKind,
    report: &mut ExportReport,
) {
    match log.write_lines(sink) {
        Ok(lines) => match kind {
            LogKind::Result => report.result_lines = lines,
            LogKind::Process => report.process_lines = lines,
        },
        Err(e) => {
            log::warn!("Failed to export {} log: {}", kind.name(), e);
            report
                .failures
                .push(format!("{} log: {}", kind.name(), e));
        }
    }
}

/// Create `path` and write `log` to it, recording the outcome in `report`.
pub(crate) fn export_log_to_path(
    log: &ResultLog,
    path: &Path,
    kind: LogKind,
    report: &mut ExportReport,
) {
    match File::create(path) {
        Ok(file) => {
            let mut writer = BufWriter::new(file);
            export_log(log, &mut writer, kind, report);
        }
        Err(e) => {
            log::warn!(
                "Failed to create {} log file {}: {}",
                kind.name(),
                path.display(),
                e
            );
            report
                .failures
                .push(format!("{} log {}: {}", kind.name(), path.display(), e));
        }
    }
}
