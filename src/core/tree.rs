//! Owned syntax tree handed to the comment walkers.
//!
//! The parser lowers swc's AST into a flat arena of [`SyntaxNode`]s that only
//! keeps what comment correlation needs: node kind, byte span, line/column
//! location, parent/children links, the declared name and whether the node is
//! exported. Comments are stored once each, together with the byte offset swc
//! attached them to.
//!
//! Keeping the tree free of swc types means the walkers and the extractor can
//! be exercised with hand-built trees, and parsed units can move freely
//! between rayon workers.

use std::collections::HashMap;

use crate::core::data::{SourceSpan, SyntaxLocation};

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// The kinds of syntax nodes the tree keeps track of.
///
/// Names follow the ESTree/Babel vocabulary, since that is what consumers of
/// the extracted documentation expect to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    ImportDeclaration,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    Function,
    Class,
    ClassMethod,
    ClassPrivateMethod,
    ClassProperty,
    ClassPrivateProperty,
    ClassConstructor,
    StaticBlock,
    ObjectExpression,
    ArrayExpression,
    ObjectProperty,
    ObjectMethod,
    ObjectGetter,
    ObjectSetter,
    BlockStatement,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    WhileStatement,
    DoWhileStatement,
    TryStatement,
    SwitchStatement,
    SwitchCase,
    ThrowStatement,
    LabeledStatement,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassExpression,
    AssignmentExpression,
    CallExpression,
    NewExpression,
    Parameter,
    TSInterfaceDeclaration,
    TSInterfaceBody,
    TSTypeAliasDeclaration,
    TSEnumDeclaration,
    TSEnumMember,
    TSModuleDeclaration,
    TSPropertySignature,
    TSMethodSignature,
    TSTypeLiteral,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::ImportDeclaration => "ImportDeclaration",
            NodeKind::ExportNamedDeclaration => "ExportNamedDeclaration",
            NodeKind::ExportDefaultDeclaration => "ExportDefaultDeclaration",
            NodeKind::ExportAllDeclaration => "ExportAllDeclaration",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::ClassDeclaration => "ClassDeclaration",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::VariableDeclarator => "VariableDeclarator",
            NodeKind::Function => "Function",
            NodeKind::Class => "Class",
            NodeKind::ClassMethod => "ClassMethod",
            NodeKind::ClassPrivateMethod => "ClassPrivateMethod",
            NodeKind::ClassProperty => "ClassProperty",
            NodeKind::ClassPrivateProperty => "ClassPrivateProperty",
            NodeKind::ClassConstructor => "ClassConstructor",
            NodeKind::StaticBlock => "StaticBlock",
            NodeKind::ObjectExpression => "ObjectExpression",
            NodeKind::ArrayExpression => "ArrayExpression",
            NodeKind::ObjectProperty => "ObjectProperty",
            NodeKind::ObjectMethod => "ObjectMethod",
            NodeKind::ObjectGetter => "ObjectGetter",
            NodeKind::ObjectSetter => "ObjectSetter",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::ForInStatement => "ForInStatement",
            NodeKind::ForOfStatement => "ForOfStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::DoWhileStatement => "DoWhileStatement",
            NodeKind::TryStatement => "TryStatement",
            NodeKind::SwitchStatement => "SwitchStatement",
            NodeKind::SwitchCase => "SwitchCase",
            NodeKind::ThrowStatement => "ThrowStatement",
            NodeKind::LabeledStatement => "LabeledStatement",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeKind::ClassExpression => "ClassExpression",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::NewExpression => "NewExpression",
            NodeKind::Parameter => "Parameter",
            NodeKind::TSInterfaceDeclaration => "TSInterfaceDeclaration",
            NodeKind::TSInterfaceBody => "TSInterfaceBody",
            NodeKind::TSTypeAliasDeclaration => "TSTypeAliasDeclaration",
            NodeKind::TSEnumDeclaration => "TSEnumDeclaration",
            NodeKind::TSEnumMember => "TSEnumMember",
            NodeKind::TSModuleDeclaration => "TSModuleDeclaration",
            NodeKind::TSPropertySignature => "TSPropertySignature",
            NodeKind::TSMethodSignature => "TSMethodSignature",
            NodeKind::TSTypeLiteral => "TSTypeLiteral",
        }
    }

    /// `export ...` / `export default ...` statements.
    pub fn is_export_wrapper(&self) -> bool {
        matches!(
            self,
            NodeKind::ExportNamedDeclaration | NodeKind::ExportDefaultDeclaration
        )
    }

    /// Declarations whose name can be referenced by a local `export { name }`.
    pub fn is_named_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::ClassDeclaration
                | NodeKind::VariableDeclaration
                | NodeKind::TSInterfaceDeclaration
                | NodeKind::TSTypeAliasDeclaration
                | NodeKind::TSEnumDeclaration
                | NodeKind::TSModuleDeclaration
        )
    }

    /// Members that are documented together with an exported owner.
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            NodeKind::ClassMethod
                | NodeKind::ClassPrivateMethod
                | NodeKind::ClassProperty
                | NodeKind::ClassPrivateProperty
                | NodeKind::ClassConstructor
                | NodeKind::ObjectProperty
                | NodeKind::ObjectMethod
                | NodeKind::ObjectGetter
                | NodeKind::ObjectSetter
                | NodeKind::TSPropertySignature
                | NodeKind::TSMethodSignature
                | NodeKind::TSEnumMember
        )
    }

    /// Nodes that may sit between an exported owner and its members.
    pub fn leads_to_members(&self) -> bool {
        matches!(
            self,
            NodeKind::Class
                | NodeKind::ClassExpression
                | NodeKind::VariableDeclarator
                | NodeKind::ObjectExpression
                | NodeKind::TSInterfaceBody
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: SourceSpan,
    pub loc: SyntaxLocation,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Declared name (function, class, variable, interface, member key...).
    pub name: Option<String>,
    pub exported: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// Which side of a token the parser attached a comment to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Attached to the start of the following token.
    Leading,
    /// Attached to the end of the preceding token.
    Trailing,
}

#[derive(Debug, Clone)]
pub struct RawComment {
    pub kind: CommentKind,
    /// Comment body without its delimiters (`* foo ` for `/** foo */`).
    pub text: String,
    pub span: SourceSpan,
    pub loc: SyntaxLocation,
    pub attachment: Attachment,
    /// Byte offset the comment is attached to.
    pub attached_at: usize,
}

impl RawComment {
    /// JSDoc comments are block comments opened with exactly two asterisks.
    ///
    /// `/*** banner ***/` and `/* plain */` do not qualify.
    pub fn is_doc_comment(&self) -> bool {
        self.kind == CommentKind::Block
            && self.text.starts_with('*')
            && !self.text.starts_with("**")
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    comments: Vec<RawComment>,
    /// Comment indexes ordered by start offset.
    by_start: Vec<usize>,
    /// Comment indexes ordered by attachment offset.
    by_attachment: Vec<usize>,
    trailing: HashMap<usize, Vec<usize>>,
}

impl SyntaxTree {
    /// Create a tree holding only the `Program` root.
    pub fn new(root_span: SourceSpan, root_loc: SyntaxLocation) -> Self {
        Self {
            nodes: vec![SyntaxNode {
                kind: NodeKind::Program,
                span: root_span,
                loc: root_loc,
                parent: None,
                children: Vec::new(),
                name: None,
                exported: false,
            }],
            comments: Vec::new(),
            by_start: Vec::new(),
            by_attachment: Vec::new(),
            trailing: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_node(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        span: SourceSpan,
        loc: SyntaxLocation,
        name: Option<String>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode {
            kind,
            span,
            loc,
            parent: Some(parent),
            children: Vec::new(),
            name,
            exported: false,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn add_comment(&mut self, comment: RawComment) {
        let index = self.comments.len();

        let pos = self
            .by_start
            .partition_point(|&i| self.comments[i].span.start <= comment.span.start);
        self.by_start.insert(pos, index);
        let pos = self
            .by_attachment
            .partition_point(|&i| self.comments[i].attached_at <= comment.attached_at);
        self.by_attachment.insert(pos, index);

        if comment.attachment == Attachment::Trailing {
            self.trailing
                .entry(comment.attached_at)
                .or_default()
                .push(index);
        }
        self.comments.push(comment);
    }

    pub fn mark_exported(&mut self, id: NodeId) {
        self.nodes[id.0].exported = true;
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.nodes
    }

    pub fn comments(&self) -> &[RawComment] {
        &self.comments
    }

    /// Comments written directly in front of `offset`, in source order.
    ///
    /// Besides the comments attached as leading at `offset`, this picks up
    /// comments swc attached as trailing to the previous token on the same
    /// line (`{ /** Red. */ Red }`), as long as only whitespace separates
    /// them from `offset`.
    pub fn comments_before(&self, offset: usize, source: &str) -> Vec<&RawComment> {
        let end = self
            .by_start
            .partition_point(|&i| self.comments[i].span.start < offset);

        let mut found = Vec::new();
        let mut cursor = offset;
        for &i in self.by_start[..end].iter().rev() {
            let comment = &self.comments[i];
            let adjacent = comment.span.end <= cursor
                && source
                    .get(comment.span.end..cursor)
                    .is_some_and(|gap| gap.trim().is_empty());
            if !adjacent {
                break;
            }
            found.push(comment);
            cursor = comment.span.start;
        }
        found.reverse();
        found
    }

    /// Comments attached as trailing at `offset`, in source order.
    pub fn trailing_at(&self, offset: usize) -> impl Iterator<Item = &RawComment> {
        self.trailing
            .get(&offset)
            .into_iter()
            .flatten()
            .map(|&i| &self.comments[i])
    }

    /// Comments attached anywhere in `start..=end`, ordered by attachment offset.
    pub fn attached_within(&self, start: usize, end: usize) -> impl Iterator<Item = &RawComment> {
        let from = self
            .by_attachment
            .partition_point(|&i| self.comments[i].attached_at < start);
        let to = self
            .by_attachment
            .partition_point(|&i| self.comments[i].attached_at <= end);
        self.by_attachment[from..to.max(from)]
            .iter()
            .map(|&i| &self.comments[i])
    }

    /// All node ids in pre-order (parents before children, siblings in source order).
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Module-level declaration that binds `name`, if any.
    pub fn find_declaration(&self, name: &str) -> Option<NodeId> {
        self.node(self.root())
            .children
            .iter()
            .copied()
            .find(|&id| self.declares(id, name))
    }

    fn declares(&self, id: NodeId, name: &str) -> bool {
        let node = self.node(id);
        if !node.kind.is_named_declaration() {
            return false;
        }
        if node.kind == NodeKind::VariableDeclaration {
            return node
                .children
                .iter()
                .any(|&child| self.node(child).name.as_deref() == Some(name));
        }
        node.name.as_deref() == Some(name)
    }
}
