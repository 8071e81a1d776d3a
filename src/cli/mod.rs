//! Command-line interface.
//!
//! ## Module Structure
//!
//! - `args`: clap argument definitions
//! - `run`: Command dispatch
//! - `report`: Output rendering
//! - `exit_status`: Process exit codes

use anyhow::Result;

mod args;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command, ExtractCommand, OutputFormat};
pub use exit_status::ExitStatus;
pub use run::CommandResult;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result, verbose)?;

    Ok(ExitStatus::from_failure_count(result.failure_count()))
}
