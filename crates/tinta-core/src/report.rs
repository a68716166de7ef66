use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::error::Result;

/// Default location of the usage-report log, relative to the working
/// directory.
pub const DEFAULT_REPORT_PATH: &str = "logs/history_report.log";

/// One line of the usage-report log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry {
    pub timestamp: String,
    pub source: String,
    pub filters: Vec<String>,
}

/// Append-only usage-report log: one entry per completed pipeline run.
///
/// Line format: `2023-10-01T12:00:00|path/to/video.rvf|Grayscale, Brightness`.
/// All access goes through a single lock; the pipeline treats appends as
/// fire-and-forget, so callers log append errors instead of failing the run.
pub struct ReportManager {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Default for ReportManager {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_PATH)
    }
}

impl ReportManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one run entry, creating the log and its parent directory on
    /// first use.
    pub fn append_entry(
        &self,
        timestamp: DateTime<Local>,
        source: &Path,
        filter_names: &[String],
    ) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{}|{}|{}",
            timestamp.format("%Y-%m-%dT%H:%M:%S"),
            source.display(),
            filter_names.join(", ")
        )?;
        debug!(path = %self.path.display(), "Report entry appended");
        Ok(())
    }

    /// Read all entries. A missing log yields an empty list.
    pub fn read_entries(&self) -> Result<Vec<ReportEntry>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = line.splitn(3, '|');
            match (parts.next(), parts.next()) {
                (Some(timestamp), Some(source)) => {
                    let filters = parts
                        .next()
                        .unwrap_or("")
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                    entries.push(ReportEntry {
                        timestamp: timestamp.to_string(),
                        source: source.to_string(),
                        filters,
                    });
                }
                _ => warn!(line = %line, "Malformed report entry"),
            }
        }
        Ok(entries)
    }
}
