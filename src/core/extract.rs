//! Extraction dispatcher: runs the walkers of the configured mode and turns
//! every fresh candidate into a documentation entry.

use anyhow::Result;

use crate::config::Config;
use crate::core::context::build_context;
use crate::core::doc::{DocumentationEntry, ParsedComment, parse_comment};
use crate::core::unit::SourceUnit;
use crate::core::visited::VisitedComments;
use crate::core::walk::{CommentWalker, ExtractionMode};

/// Extract the documentation entries of one unit.
///
/// Entries come out in walker order, then traversal order. A comment reached
/// more than once (by several nodes or several walkers) is only kept the
/// first time, as recorded in `visited`. Comments carrying `@lends` are
/// dropped.
pub fn extract(
    unit: &SourceUnit,
    config: &Config,
    visited: &mut VisitedComments,
) -> Result<Vec<DocumentationEntry>> {
    let mut entries = Vec::new();

    for strategy in ExtractionMode::from_config(config).strategies() {
        strategy.walk(unit, &mut |candidate| {
            let Some(context) = build_context(visited, unit, &candidate) else {
                return;
            };
            match parse_comment(&candidate.text, candidate.loc, context) {
                ParsedComment::Entry(entry) => entries.push(entry),
                ParsedComment::Lends => {}
            }
        })?;
    }

    Ok(entries)
}
