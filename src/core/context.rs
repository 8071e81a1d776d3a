//! Positional context attached to every extracted comment.

use serde::Serialize;

use crate::core::data::{SourceSpan, SyntaxLocation};
use crate::core::sort_key::sort_key;
use crate::core::tree::{NodeId, NodeKind};
use crate::core::unit::SourceUnit;
use crate::core::visited::{VisitationKey, VisitedComments};
use crate::core::walk::CandidateComment;

/// Handle back to the syntax node a comment documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub id: NodeId,
    pub kind: NodeKind,
    pub span: SourceSpan,
    pub name: Option<String>,
}

/// Where a comment lives and what it documents.
///
/// `loc` and `sort_key` describe the enclosing node, not the comment itself.
/// `ast` is a cross-reference for in-process consumers and is never
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentContext {
    pub loc: SyntaxLocation,
    pub file: String,
    pub sort_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip)]
    pub ast: Option<NodeRef>,
}

/// Build the context of a candidate comment, or `None` if this comment was
/// already emitted for the unit.
///
/// With `include_context`, the enclosing node is referenced in `ast` and the
/// full source of its parent node is copied into `code` (when the node has a
/// parent).
pub fn build_context(
    visited: &mut VisitedComments,
    unit: &SourceUnit,
    candidate: &CandidateComment,
) -> Option<CommentContext> {
    let key = VisitationKey::new(&unit.file, candidate.loc.start);
    if visited.has(&key) {
        return None;
    }
    visited.mark(key);

    let mut context = CommentContext {
        loc: candidate.node_loc,
        file: unit.file.clone(),
        sort_key: sort_key(&unit.sort_key, candidate.node_loc.start.line),
        code: None,
        ast: None,
    };

    if candidate.include_context {
        let node = unit.tree.node(candidate.node);
        context.ast = Some(NodeRef {
            id: candidate.node,
            kind: node.kind,
            span: node.span,
            name: node.name.clone(),
        });
        context.code = node
            .parent
            .and_then(|parent| unit.tree.node(parent).span.slice(&unit.source))
            .map(str::to_string);
    }

    Some(context)
}
