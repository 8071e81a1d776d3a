//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract doc comments from JavaScript / TypeScript sources
//! - `init`: Initialize a docwalk configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of entries
    #[default]
    Json,
    /// Human-readable listing
    Text,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Files or directories to extract from (default: `includes` from the config file)
    pub paths: Vec<PathBuf>,

    /// Only document exported symbols (overrides config file)
    #[arg(long)]
    pub document_exported: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract documentation comments and print them
    Extract(ExtractCommand),
    /// Initialize a new .docwalkrc.json configuration file
    Init,
}
