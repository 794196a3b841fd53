use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::commands::{
    ArchiveArgs, Cli, Commands, ExportArgs, OpenArgs, ToggleArgs, parse_selections,
};
use crate::cli::output::{ArchiveReportJson, TimerReportJson, TransitionReportJson};
use crate::export::html::export_html;
use crate::host::{FileSink, HostError, NotificationSink, Severity, TextSource};
use crate::io::config_io::{self, CONFIG_FILE_NAME, ConfigError};
use crate::io::fs_host::{FsFiles, FsHost, StderrNotifier};
use crate::model::config::TodoConfig;
use crate::model::document::Document;
use crate::ops::archive::archive;
use crate::ops::commands::{Transition, call_todos};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid --lines value: {0}")]
    BadSelection(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let config = config_io::read_config(&config_path)?;

    match cli.command {
        Commands::Open(args) => cmd_open(args, &config),
        Commands::ToggleBox(args) => cmd_toggle(args, Transition::Box, cli.json),
        Commands::ToggleDone(args) => cmd_toggle(args, Transition::Done, cli.json),
        Commands::ToggleCancelled(args) => cmd_toggle(args, Transition::Cancelled, cli.json),
        Commands::ToggleStart(args) => cmd_toggle(args, Transition::Start, cli.json),
        Commands::Archive(args) => cmd_archive(args, cli.json),
        Commands::Export(args) => cmd_export(args, &config),
        Commands::Timer => cmd_timer(&config_path, config, cli.json),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn cmd_open(args: OpenArgs, config: &TodoConfig) -> Result<(), CliError> {
    let path = args
        .file
        .unwrap_or_else(|| PathBuf::from(&config.file.name));
    let mut files = FsFiles;
    files.make(&path, &config.file.default_content)?;
    files.open(&path, true, args.line.map(|n| n.saturating_sub(1)), None)?;
    Ok(())
}

fn cmd_toggle(args: ToggleArgs, transition: Transition, json: bool) -> Result<(), CliError> {
    let selections = parse_selections(&args.lines, args.col).map_err(CliError::BadSelection)?;
    let mut host = FsHost::load(&args.file, selections)?;
    let mut notifier = StderrNotifier;
    let now = Local::now().naive_local();

    let outcome = call_todos(&mut host, &mut notifier, transition, now)?;

    if json {
        let report = TransitionReportJson::new(transition, &outcome);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !outcome.edits.is_empty() {
        println!("{} line(s) updated", outcome.edits.len());
    }
    Ok(())
}

fn cmd_archive(args: ArchiveArgs, json: bool) -> Result<(), CliError> {
    let mut host = FsHost::load(&args.file, Vec::new())?;
    let mut notifier = StderrNotifier;
    let doc = Document::new(host.lines().to_vec());

    if !doc.is_supported() {
        notifier.notify(Severity::Error, "This is not a todo file");
        return Ok(());
    }

    let moved = match archive(&doc) {
        Some(outcome) => {
            let moved = outcome.moved;
            host.replace_lines(outcome.lines)?;
            moved
        }
        None => 0,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ArchiveReportJson { moved })?
        );
    } else if moved > 0 {
        println!("{} todo(s) archived", moved);
    }
    Ok(())
}

fn cmd_export(args: ExportArgs, config: &TodoConfig) -> Result<(), CliError> {
    let host = FsHost::load(&args.file, Vec::new())?;
    let doc = Document::new(host.lines().to_vec());
    let content = export_html(&doc, &config.colors);

    match args.output {
        Some(path) => {
            fs::write(&path, content).map_err(HostError::Io)?;
            println!("{}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn cmd_timer(config_path: &Path, mut config: TodoConfig, json: bool) -> Result<(), CliError> {
    config.set_timer(!config.timer_enabled());
    config_io::write_config(config_path, &config)?;

    let enabled = config.timer_enabled();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&TimerReportJson { timer: enabled })?
        );
    } else {
        let mut notifier = StderrNotifier;
        notifier.notify(
            Severity::Info,
            if enabled { "Timer enabled" } else { "Timer disabled" },
        );
    }
    Ok(())
}
