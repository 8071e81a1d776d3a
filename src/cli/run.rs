use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::args::{Arguments, Command, ExtractCommand, OutputFormat};
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json, load_config};
use crate::core::pipeline::{ExtractionOutput, extract_files, scan_files};

/// Outcome of a command, handed to the reporter.
#[derive(Debug)]
pub enum CommandResult {
    Extract {
        output: ExtractionOutput,
        format: OutputFormat,
    },
    Init {
        path: PathBuf,
    },
}

impl CommandResult {
    /// Number of files that could not be read or parsed.
    pub fn failure_count(&self) -> usize {
        match self {
            CommandResult::Extract { output, .. } => output.failures.len(),
            CommandResult::Init { .. } => 0,
        }
    }
}

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => {
            let path = init()?;
            Ok(CommandResult::Init { path })
        }
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let base_dir = env::current_dir().context("Failed to resolve the current directory")?;
    let loaded = load_config(&base_dir)?;
    debug!(from_file = loaded.from_file, "loaded configuration");

    let mut config = loaded.config;
    if cmd.document_exported {
        config.document_exported = true;
    }

    let files = collect_files(&base_dir, &cmd.paths, &config)?;
    debug!(files = files.len(), "extracting");

    Ok(CommandResult::Extract {
        output: extract_files(&base_dir, &files, &config),
        format: cmd.format,
    })
}

/// Source files named on the command line, or found through `includes`.
fn collect_files(base_dir: &Path, paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        let scanned = scan_files(
            &base_dir.to_string_lossy(),
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
        );
        return Ok(scanned.files.into_iter().map(PathBuf::from).collect());
    }

    let mut files = Vec::new();
    for path in paths {
        let path = base_dir.join(path);
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            // Walked from the project root, where `ignores` are anchored
            let scanned = scan_files(
                &base_dir.to_string_lossy(),
                &[path.to_string_lossy().into_owned()],
                &config.ignores,
                config.ignore_test_files,
            );
            files.extend(scanned.files.into_iter().map(PathBuf::from));
        } else {
            bail!("Path does not exist: {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn init() -> Result<PathBuf> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;
    Ok(config_path.to_path_buf())
}
