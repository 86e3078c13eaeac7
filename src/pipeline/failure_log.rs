// src/pipeline/failure_log.rs

//! Durable failure log.
//!
//! Append-only file with one JSON record per line. The format is owned by
//! this crate, not by the remote API's URL layout: a record carries the
//! edition identifier explicitly, and the section URL's final path segment
//! doubles as a fallback for hand-written lines. Appends are serialized
//! through a mutex so concurrent section workers never interleave partial
//! lines.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What failed for a logged section URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Non-success status or transport error fetching the section
    SectionFetch,
    /// HTTP success but the verse list was empty or missing
    SectionEmpty,
    /// The whole bulk submission for the section was rejected
    BatchWrite,
    /// One document in an otherwise committed batch was rejected
    Document,
}

/// One failure, appended as a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureRecord {
    pub timestamp: DateTime<Utc>,
    pub kind: FailureKind,
    pub edition: String,
    pub url: String,
    pub reason: String,

    /// Set for [`FailureKind::Document`] entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

impl FailureRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        kind: FailureKind,
        edition: impl Into<String>,
        url: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            edition: edition.into(),
            url: url.into(),
            reason: reason.into(),
            document_id: None,
        }
    }

    /// Attach the id of the rejected document.
    pub fn with_document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }

    /// The edition this record belongs to: the explicit field when set,
    /// otherwise the section URL's final path segment.
    pub fn edition_identifier(&self) -> Option<String> {
        if !self.edition.is_empty() {
            return Some(self.edition.clone());
        }
        edition_from_url(&self.url)
    }
}

/// Extract the edition identifier from a section URL.
///
/// Contract: section URLs end in `/{edition_identifier}`.
pub fn edition_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    segments.last().map(|s| s.to_string())
}

/// Append-only failure log shared by all workers of a run.
pub struct FailureLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FailureLog {
    /// Open (or create) the log at this path for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a whole line.
    ///
    /// A failure to persist the record is logged and swallowed: the log is
    /// a recovery aid and must never abort the ingestion it describes.
    pub fn append(&self, record: &FailureRecord) {
        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(error) => {
                log::error!("Failed to encode failure record: {}", error);
                return;
            }
        };

        let mut file = self.file.lock().expect("failure log mutex poisoned");
        if let Err(error) = writeln!(file, "{}", line) {
            log::error!("Failed to append to {}: {}", self.path.display(), error);
        }
    }
}

/// Parse a failure log back into records.
///
/// Lines that do not parse are skipped with a warning, so a hand-edited or
/// truncated log still yields every recoverable entry.
pub fn read_entries(path: impl AsRef<Path>) -> Result<Vec<FailureRecord>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let mut records = Vec::new();

    for (line_number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<FailureRecord>(line) {
            Ok(record) => records.push(record),
            Err(error) => {
                log::warn!(
                    "Skipping unparseable line {} of {}: {}",
                    line_number + 1,
                    path.as_ref().display(),
                    error
                );
            }
        }
    }

    Ok(records)
}
