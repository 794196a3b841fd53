use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::ops::edit_batch::{Caret, Edit, Selection};

/// User-visible message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// Failures at the host boundary (filesystem, editor buffer)
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("could not write {0}: {1}")]
    Write(PathBuf, String),
}

/// Read-only access to the document being operated on: its lines and the
/// currently selected line ranges.
pub trait TextSource {
    fn lines(&self) -> &[String];
    fn selections(&self) -> Vec<Selection>;
}

/// Accepts an atomic batch of single-line replacements plus per-selection
/// caret suggestions. The whole batch applies or none of it does.
pub trait EditSink {
    fn apply(&mut self, edits: &[Edit], carets: &[Option<Caret>]) -> Result<(), HostError>;
}

/// Brings a file location into view, or creates a file with default content
pub trait FileSink {
    fn open(
        &mut self,
        path: &Path,
        focus: bool,
        line: Option<usize>,
        cols: Option<(usize, usize)>,
    ) -> Result<(), HostError>;

    fn make(&mut self, path: &Path, default_content: &str) -> Result<(), HostError>;
}

/// Fire-and-forget user feedback
pub trait NotificationSink {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// A notification collected during a command run, for hosts that report
/// after the fact (and for the `--json` output).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Notification {
        Notification {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Notification {
        Notification {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}
