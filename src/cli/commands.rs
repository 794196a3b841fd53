use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::ops::edit_batch::Selection;

#[derive(Parser)]
#[command(name = "tdp", about = concat!("[t] todoplus v", env!("CARGO_PKG_VERSION"), " - your todos are plain text"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: .todoplus.toml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the todo file, creating it with default content if absent
    Open(OpenArgs),
    /// Toggle selected todos along the open/done axis
    ToggleBox(ToggleArgs),
    /// Toggle selected todos done (clears cancelled)
    ToggleDone(ToggleArgs),
    /// Toggle selected todos cancelled (clears done)
    ToggleCancelled(ToggleArgs),
    /// Start or unstart selected todos, tracking elapsed time
    ToggleStart(ToggleArgs),
    /// Move done/cancelled todos to the Archive section
    Archive(ArchiveArgs),
    /// Export the file as colorized HTML
    Export(ExportArgs),
    /// Flip the elapsed-time timer flag in the config file
    Timer,
}

// ---------------------------------------------------------------------------
// Command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct OpenArgs {
    /// File to open (default: the configured todo file name)
    pub file: Option<PathBuf>,
    /// Line to reveal (1-based)
    #[arg(long)]
    pub line: Option<usize>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Todo file to operate on
    pub file: PathBuf,
    /// Selected lines, 1-based: "3", "2-5", or "1,4-6"
    #[arg(long, value_name = "RANGES")]
    pub lines: String,
    /// Caret column of the first selection (char offset, for caret
    /// repositioning in the JSON report)
    #[arg(long)]
    pub col: Option<usize>,
}

#[derive(Args)]
pub struct ArchiveArgs {
    /// Todo file to archive
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Todo file to export
    pub file: PathBuf,
    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse a 1-based `--lines` value ("3", "2-5", "1,4-6") into selections.
/// The caret column applies to the first selection; a host editor would
/// supply one per selection.
pub fn parse_selections(ranges: &str, col: Option<usize>) -> Result<Vec<Selection>, String> {
    let mut selections = Vec::new();
    for part in ranges.split(',') {
        let part = part.trim();
        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (parse_line_number(a)?, parse_line_number(b)?),
            None => {
                let n = parse_line_number(part)?;
                (n, n)
            }
        };
        if end < start {
            return Err(format!("backwards range: {}", part));
        }
        selections.push(Selection {
            start_line: start,
            end_line: end,
            start_col: 0,
        });
    }
    if selections.is_empty() {
        return Err("no lines selected".to_string());
    }
    if let Some(col) = col {
        selections[0].start_col = col;
    }
    Ok(selections)
}

fn parse_line_number(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("not a line number: {}", s))?;
    if n == 0 {
        return Err("line numbers are 1-based".to_string());
    }
    Ok(n - 1)
}
