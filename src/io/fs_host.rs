use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::host::{EditSink, FileSink, HostError, NotificationSink, Severity, TextSource};
use crate::ops::edit_batch::{Caret, Edit, Selection};

/// File-backed host: one open todo file plus the selections the command
/// was invoked with. Applies edit batches by rewriting the whole file
/// through a temp-file rename, so a batch lands atomically or not at all.
#[derive(Debug)]
pub struct FsHost {
    path: PathBuf,
    lines: Vec<String>,
    selections: Vec<Selection>,
    had_trailing_newline: bool,
}

impl FsHost {
    pub fn load(path: &Path, selections: Vec<Selection>) -> Result<FsHost, HostError> {
        if !path.exists() {
            return Err(HostError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Ok(FsHost {
            path: path.to_path_buf(),
            lines: text.lines().map(|l| l.to_string()).collect(),
            selections,
            had_trailing_newline: text.ends_with('\n') || text.is_empty(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the whole line set (used by archive, which restructures
    /// the file instead of editing single lines) and persist.
    pub fn replace_lines(&mut self, lines: Vec<String>) -> Result<(), HostError> {
        self.lines = lines;
        self.persist()
    }

    fn persist(&self) -> Result<(), HostError> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(parent)?;
        let mut text = self.lines.join("\n");
        if self.had_trailing_newline && !self.lines.is_empty() {
            text.push('\n');
        }
        tmp.write_all(text.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| HostError::Write(self.path.clone(), e.to_string()))?;
        Ok(())
    }
}

impl TextSource for FsHost {
    fn lines(&self) -> &[String] {
        &self.lines
    }

    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }
}

impl EditSink for FsHost {
    fn apply(&mut self, edits: &[Edit], _carets: &[Option<Caret>]) -> Result<(), HostError> {
        // A file host has no cursor; caret suggestions are surfaced
        // through the command report instead.
        for edit in edits {
            if let Some(slot) = self.lines.get_mut(edit.line_number) {
                *slot = edit.new_text.clone();
            }
        }
        self.persist()
    }
}

/// File open/create sink for the CLI: "bringing into view" prints the
/// location, since there is no editor viewport to scroll.
#[derive(Debug, Default)]
pub struct FsFiles;

impl FileSink for FsFiles {
    fn open(
        &mut self,
        path: &Path,
        _focus: bool,
        line: Option<usize>,
        _cols: Option<(usize, usize)>,
    ) -> Result<(), HostError> {
        if !path.exists() {
            return Err(HostError::NotFound(path.to_path_buf()));
        }
        match line {
            Some(n) => println!("{}:{}", path.display(), n + 1),
            None => println!("{}", path.display()),
        }
        Ok(())
    }

    fn make(&mut self, path: &Path, default_content: &str) -> Result<(), HostError> {
        if !path.exists() {
            fs::write(path, default_content)?;
        }
        Ok(())
    }
}

/// Prints notifications to stderr as they arrive
#[derive(Debug, Default)]
pub struct StderrNotifier;

impl NotificationSink for StderrNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => eprintln!("{}", message),
            Severity::Error => eprintln!("error: {}", message),
        }
    }
}
