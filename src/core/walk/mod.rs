//! Comment walkers - strategies that find the comments worth documenting.
//!
//! A walker visits a unit's syntax tree and emits a [`CandidateComment`] for
//! every doc comment it associates with a node. Walkers do not deduplicate:
//! the same comment may be emitted for several nodes or by several walkers,
//! and the extractor keeps only the first occurrence.
//!
//! ## Module Structure
//!
//! - `attachment`: Leading / inner / trailing comments of every node
//! - `exported`: Comments of exported declarations and their members

mod attachment;
mod exported;

use anyhow::Result;
use enum_dispatch::enum_dispatch;

pub use attachment::{AttachmentWalker, CommentPosition};
pub use exported::ExportedWalker;

use crate::config::Config;
use crate::core::data::SyntaxLocation;
use crate::core::tree::NodeId;
use crate::core::unit::SourceUnit;

/// A comment found by a walker, before deduplication and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateComment {
    /// Comment body without delimiters. Empty for undocumented exports.
    pub text: String,
    /// Location of the comment itself.
    pub loc: SyntaxLocation,
    /// The node the comment documents.
    pub node: NodeId,
    pub node_loc: SyntaxLocation,
    /// Whether to attach the node reference and its parent's source.
    pub include_context: bool,
}

/// Walks a unit and emits candidate comments in traversal order.
#[enum_dispatch]
pub trait CommentWalker {
    fn walk(&self, unit: &SourceUnit, emit: &mut dyn FnMut(CandidateComment)) -> Result<()>;
}

#[enum_dispatch(CommentWalker)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Attachment(AttachmentWalker),
    Exported(ExportedWalker),
}

/// Which comments a run documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Only exported declarations (and their members).
    Exported,
    /// Every doc comment in the unit.
    AllComments,
}

impl ExtractionMode {
    pub fn from_config(config: &Config) -> Self {
        if config.document_exported {
            ExtractionMode::Exported
        } else {
            ExtractionMode::AllComments
        }
    }

    /// Walkers to run, in order.
    ///
    /// Leading comments come first and are the only pass that carries
    /// context, so when a comment is reachable from several passes the
    /// context-bearing copy is the one kept.
    pub fn strategies(self) -> Vec<Strategy> {
        match self {
            ExtractionMode::Exported => vec![ExportedWalker.into()],
            ExtractionMode::AllComments => vec![
                AttachmentWalker::new(CommentPosition::Leading, true).into(),
                AttachmentWalker::new(CommentPosition::Inner, false).into(),
                AttachmentWalker::new(CommentPosition::Trailing, false).into(),
            ],
        }
    }
}
