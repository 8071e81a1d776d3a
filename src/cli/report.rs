//! Output rendering for the CLI.
//!
//! Entries go to stdout (JSON or text); failures and the summary go to
//! stderr, so JSON output can be piped as-is.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use super::args::OutputFormat;
use super::run::CommandResult;
use crate::core::doc::{DocumentationEntry, Tag};
use crate::core::pipeline::{ExtractionOutput, ParseFailure};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    match result {
        CommandResult::Extract { output, format } => {
            report_entries_to(&output.entries, *format, &mut io::stdout().lock())?;
            report_failures_to(&output.failures, verbose, &mut io::stderr().lock());
            if *format == OutputFormat::Text {
                print_summary_to(output, &mut io::stderr().lock());
            }
        }
        CommandResult::Init { path } => {
            let _ = writeln!(
                io::stdout().lock(),
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", path.display()).green()
            );
        }
    }
    Ok(())
}

/// Render entries in the requested format.
pub fn report_entries_to<W: Write>(
    entries: &[DocumentationEntry],
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(entries).context("Failed to serialize entries")?;
            writeln!(writer, "{}", json)?;
        }
        OutputFormat::Text => {
            for entry in entries {
                print_entry(entry, writer);
            }
        }
    }
    Ok(())
}

/// Report files that failed. Details are only shown with `verbose`.
pub fn report_failures_to<W: Write>(failures: &[ParseFailure], verbose: bool, writer: &mut W) {
    if failures.is_empty() {
        return;
    }
    if verbose {
        for failure in failures {
            let _ = writeln!(
                writer,
                "{} {}: {}",
                "error:".bold().red(),
                failure.file,
                failure.error
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            failures.len(),
            "-v".cyan()
        );
    }
}

pub fn print_summary_to<W: Write>(output: &ExtractionOutput, writer: &mut W) {
    let entries = output.entries.len();
    let msg = format!(
        "Extracted {} {} from {} {}",
        entries,
        if entries == 1 { "comment" } else { "comments" },
        output.file_count,
        if output.file_count == 1 { "file" } else { "files" }
    );
    let _ = if output.failures.is_empty() {
        writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green())
    } else {
        writeln!(writer, "{} {}", FAILURE_MARK.red(), msg.yellow())
    };
}

fn print_entry<W: Write>(entry: &DocumentationEntry, writer: &mut W) {
    let context = &entry.context;
    let header = format!("{}:{}", context.file, context.loc.start.line);
    match context.ast.as_ref().and_then(|ast| ast.name.as_deref()) {
        Some(name) => {
            let _ = writeln!(writer, "{} {}", header.bold().cyan(), name.bold());
        }
        None => {
            let _ = writeln!(writer, "{}", header.bold().cyan());
        }
    }

    for line in entry.description.lines() {
        let _ = writeln!(writer, "  {}", line);
    }
    for tag in &entry.tags {
        let _ = writeln!(writer, "  {}", format_tag(tag));
    }
    for error in &entry.errors {
        let _ = writeln!(writer, "  {} {}", "warning:".yellow(), error);
    }
    let _ = writeln!(writer);
}

fn format_tag(tag: &Tag) -> String {
    let mut parts = vec![format!("@{}", tag.title).blue().to_string()];
    if let Some(type_expr) = &tag.type_expr {
        parts.push(format!("{{{}}}", type_expr).dimmed().to_string());
    }
    if let Some(name) = &tag.name {
        parts.push(match (&tag.default, tag.optional) {
            (Some(default), _) => format!("[{}={}]", name, default),
            (None, true) => format!("[{}]", name),
            (None, false) => name.clone(),
        });
    }
    if let Some(description) = &tag.description {
        parts.push(description.replace('\n', " "));
    }
    parts.join(" ")
}
