//! Comment correlation engine.
//!
//! Given a parsed source file, finds the doc comments it contains, ties each
//! one to the syntax node it documents and turns it into a
//! [`DocumentationEntry`]. Every comment is reported once per file, even when
//! several nodes or several passes reach it.
//!
//! ## Module Structure
//!
//! - `data`: Source locations and spans
//! - `tree`: Owned syntax tree with attached comments
//! - `parsers`: swc-based JavaScript / TypeScript parser
//! - `unit`: A parsed file plus its sort key prefix
//! - `sort_key` / `visited` / `context`: Per-comment enrichment and dedup
//! - `walk`: Comment walkers (all comments, or exported symbols only)
//! - `doc`: Doc comment parser
//! - `extract`: Dispatches walkers and collects entries
//! - `pipeline`: Multi-file scanning and parallel extraction

pub mod context;
pub mod data;
pub mod doc;
pub mod extract;
pub mod parsers;
pub mod pipeline;
pub mod sort_key;
pub mod tree;
pub mod unit;
pub mod visited;
pub mod walk;

use anyhow::Result;

pub use doc::{DocumentationEntry, ParsedComment, Tag};
pub use unit::SourceUnit;

use crate::config::Config;
use visited::VisitedComments;

/// Extract the documentation of one unit with a fresh visitation tracker.
pub fn run(unit: &SourceUnit, config: &Config) -> Result<Vec<DocumentationEntry>> {
    let mut visited = VisitedComments::new();
    extract::extract(unit, config, &mut visited)
}

/// Parse `source` and extract its documentation. Syntax errors propagate.
pub fn parse_javascript(
    file: &str,
    source: &str,
    sort_key: &str,
    config: &Config,
) -> Result<Vec<DocumentationEntry>> {
    let unit = SourceUnit::parse(file, source, sort_key)?;
    run(&unit, config)
}
