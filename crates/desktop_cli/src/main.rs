mod command;
mod session;

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use desktop_runtime::{logging, DesktopResult, IndexedItem, IndexedItemKind, RuntimeConfig};
use platform_host::{JsonFilePrefsStore, MemoryPrefsStore, NoopExternalUrlService, PrefsStore};

use crate::command::parse_line;
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(
    name = "deskctl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drive the desktop window manager from a command script"
)]
struct Cli {
    /// TOML runtime configuration.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Command script to run instead of reading stdin.
    #[arg(short = 's', long = "script", value_name = "FILE")]
    script: Option<PathBuf>,

    /// JSON file that keeps layout, theme and session between runs.
    #[arg(long = "state-file", value_name = "FILE")]
    state_file: Option<PathBuf>,

    /// Directory whose entries Spotlight can find.
    #[arg(long = "index-dir", value_name = "DIR")]
    index_dir: Option<PathBuf>,

    /// Overrides the configured log level.
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("deskctl: {err}");
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` when at least one script line failed.
fn run(cli: Cli) -> DesktopResult<bool> {
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.state_file.is_some() {
        config.state_file = cli.state_file;
    }
    config.validate()?;
    logging::init(config.tracing_level()?);

    let prefs: Box<dyn PrefsStore> = match &config.state_file {
        Some(path) => Box::new(JsonFilePrefsStore::new(path)),
        None => Box::new(MemoryPrefsStore::default()),
    };
    let mut session = Session::boot(config, prefs, Box::new(NoopExternalUrlService))?;
    if let Some(dir) = &cli.index_dir {
        session = session.with_indexed_items(index_directory(dir)?);
    }

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(fs::File::open(path).map_err(
            platform_host::HostError::from,
        )?)),
        None => Box::new(io::stdin().lock()),
    };

    let mut clean = true;
    for (number, line) in input.lines().enumerate() {
        let line = line.map_err(platform_host::HostError::from)?;
        let outcome = parse_line(&line).and_then(|command| match command {
            Some(command) => session.execute(command),
            None => Ok(String::new()),
        });
        match outcome {
            Ok(output) if output.is_empty() => {}
            Ok(output) => println!("{output}"),
            Err(err) => {
                clean = false;
                tracing::warn!(line = number + 1, %err, "command failed");
                eprintln!("line {}: {err}", number + 1);
            }
        }
    }
    tracing::debug!(active = ?session.store().active_app(), clean, "script finished");
    Ok(clean)
}

fn index_directory(dir: &Path) -> DesktopResult<Vec<IndexedItem>> {
    let mut items = Vec::new();
    for entry in fs::read_dir(dir).map_err(platform_host::HostError::from)? {
        let entry = entry.map_err(platform_host::HostError::from)?;
        let kind = if entry.path().is_dir() {
            IndexedItemKind::Folder
        } else {
            IndexedItemKind::File
        };
        items.push(IndexedItem {
            id: entry.path().display().to_string(),
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }
    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(items)
}
