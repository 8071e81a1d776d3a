//! Doc comment parsing.
//!
//! Turns the raw body of a `/** ... */` comment into a
//! [`DocumentationEntry`]: the free-text description and the block tags that
//! follow it.

mod tag;

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub use tag::{NAMED_TAGS, Tag};

use crate::core::context::CommentContext;
use crate::core::data::SyntaxLocation;

/// The ` * ` gutter at the start of each comment line.
static GUTTER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \t]*\*[ \t]?").unwrap());

/// A documented comment, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationEntry {
    pub description: String,
    pub tags: Vec<Tag>,
    /// Location of the comment itself.
    pub loc: SyntaxLocation,
    pub context: CommentContext,
    /// Problems found while parsing tags. The entry is still usable.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl DocumentationEntry {
    pub fn has_tag(&self, title: &str) -> bool {
        self.tags.iter().any(|tag| tag.title == title)
    }
}

/// Result of parsing one comment.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedComment {
    Entry(DocumentationEntry),
    /// The comment lends its members to another object (`@lends`) and does
    /// not document anything by itself.
    Lends,
}

/// Parse the body of a doc comment (delimiters already stripped, leading `*`
/// still present).
pub fn parse_comment(raw: &str, loc: SyntaxLocation, context: CommentContext) -> ParsedComment {
    let lines = clean_lines(raw);

    let mut description = Vec::new();
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in &lines {
        if tag::is_tag_line(line) {
            blocks.push(vec![line.trim_start()]);
        } else if let Some(block) = blocks.last_mut() {
            block.push(line.as_str());
        } else {
            description.push(line.as_str());
        }
    }

    let mut tags = Vec::new();
    let mut errors = Vec::new();
    for block in blocks {
        if let Some((tag, error)) = tag::parse_tag(&block.join("\n")) {
            tags.push(tag);
            errors.extend(error);
        }
    }

    if tags.iter().any(|tag| tag.title == "lends") {
        return ParsedComment::Lends;
    }

    ParsedComment::Entry(DocumentationEntry {
        description: description.join("\n").trim().to_string(),
        tags,
        loc,
        context,
        errors,
    })
}

/// Comment lines without the opening `*` and the per-line gutter.
fn clean_lines(raw: &str) -> Vec<String> {
    let body = raw.strip_prefix('*').unwrap_or(raw);
    body.lines()
        .map(|line| GUTTER_REGEX.replace(line, "").trim_end().to_string())
        .collect()
}
