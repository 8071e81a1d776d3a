use anyhow::Result;

use super::{CandidateComment, CommentWalker};
use crate::core::tree::{NodeId, RawComment, SyntaxTree};
use crate::core::unit::SourceUnit;

/// Where a comment sits relative to the node it is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPosition {
    /// Directly in front of the node's first token.
    Leading,
    /// Inside the node, but not inside any of its children.
    Inner,
    /// Attached to the node's last token.
    Trailing,
}

/// Reports the doc comments found at one position of every node.
///
/// Nodes are visited in pre-order, so a comment shared by nested nodes that
/// start (or end) at the same offset is first reported for the outermost one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentWalker {
    position: CommentPosition,
    include_context: bool,
}

impl AttachmentWalker {
    pub fn new(position: CommentPosition, include_context: bool) -> Self {
        Self {
            position,
            include_context,
        }
    }

    fn comments_of<'t>(&self, unit: &'t SourceUnit, id: NodeId) -> Vec<&'t RawComment> {
        let tree = &unit.tree;
        let node = tree.node(id);
        match self.position {
            CommentPosition::Leading => tree.comments_before(node.span.start, &unit.source),
            CommentPosition::Trailing => tree.trailing_at(node.span.end).collect(),
            CommentPosition::Inner => inner_comments(tree, id),
        }
    }
}

impl CommentWalker for AttachmentWalker {
    fn walk(&self, unit: &SourceUnit, emit: &mut dyn FnMut(CandidateComment)) -> Result<()> {
        let tree = &unit.tree;
        for id in tree.preorder() {
            let node = tree.node(id);
            for comment in self.comments_of(unit, id) {
                if !comment.is_doc_comment() {
                    continue;
                }
                emit(CandidateComment {
                    text: comment.text.clone(),
                    loc: comment.loc,
                    node: id,
                    node_loc: node.loc,
                    include_context: self.include_context,
                });
            }
        }
        Ok(())
    }
}

/// Comments attached strictly inside `id` and outside all of its children.
///
/// This covers comments in empty bodies (`function f() { /** x */ }`) and
/// after the last statement of a block. The root owns both of its ends, which
/// is where comments of a file without any code are attached.
fn inner_comments(tree: &SyntaxTree, id: NodeId) -> Vec<&RawComment> {
    let node = tree.node(id);
    let (start, end) = if node.parent.is_none() {
        (node.span.start, node.span.end)
    } else if node.span.end > node.span.start + 1 {
        (node.span.start + 1, node.span.end - 1)
    } else {
        return Vec::new();
    };

    tree.attached_within(start, end)
        .filter(|comment| {
            !node
                .children
                .iter()
                .any(|&child| tree.node(child).span.covers(comment.attached_at))
        })
        .collect()
}
