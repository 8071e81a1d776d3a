use anyhow::Result;

use crate::core::parsers::parse_source;
use crate::core::tree::SyntaxTree;

/// One parsed source file, as handed to the extractor.
///
/// `sort_key` is chosen by the caller and positions this file among all the
/// files of a run; every comment's sort key starts with it.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub file: String,
    pub source: String,
    pub sort_key: String,
    pub tree: SyntaxTree,
}

impl SourceUnit {
    pub fn new(
        file: impl Into<String>,
        source: impl Into<String>,
        sort_key: impl Into<String>,
        tree: SyntaxTree,
    ) -> Self {
        Self {
            file: file.into(),
            source: source.into(),
            sort_key: sort_key.into(),
            tree,
        }
    }

    /// Parse `source` and wrap it into a unit. Syntax errors propagate.
    pub fn parse(
        file: impl Into<String>,
        source: impl Into<String>,
        sort_key: impl Into<String>,
    ) -> Result<Self> {
        let file = file.into();
        let source = source.into();
        let tree = parse_source(&source, &file)?;
        Ok(Self::new(file, source, sort_key, tree))
    }
}
