use std::{path::Path, sync::Arc};

use anyhow::{Result, anyhow};
use swc_common::{
    BytePos, FileName, GLOBALS, Globals, SourceMap, Span, Spanned,
    comments::{self, SingleThreadedComments},
};
use swc_ecma_ast::{
    ArrayLit, ArrowExpr, AssignExpr, BlockStmt, CallExpr, Class, ClassDecl, ClassExpr,
    ClassMethod, ClassProp, Constructor, DoWhileStmt, ExportAll, ExportDecl, ExportDefaultDecl,
    ExportDefaultExpr, ExportSpecifier, Expr, ExprStmt, FnDecl, FnExpr, ForInStmt, ForOfStmt,
    ForStmt, Function, GetterProp, IfStmt, ImportDecl, KeyValueProp, LabeledStmt, MethodProp,
    Module, ModuleExportName, NamedExport, NewExpr, ObjectLit, Param, Pat, PrivateMethod,
    PrivateProp, PropName, ReturnStmt, SetterProp, StaticBlock, SwitchCase, SwitchStmt,
    ThrowStmt, TryStmt, TsEnumDecl, TsEnumMember, TsEnumMemberId, TsInterfaceBody,
    TsInterfaceDecl, TsMethodSignature, TsModuleDecl, TsModuleName, TsPropertySignature,
    TsTypeAliasDecl, TsTypeLit, VarDecl, VarDeclarator, WhileStmt,
};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use crate::core::data::{Position, SourceSpan, SyntaxLocation};
use crate::core::tree::{
    Attachment, CommentKind, NodeId, NodeKind, RawComment, SyntaxTree,
};

/// Parse JavaScript or TypeScript source into a [`SyntaxTree`].
///
/// The syntax is picked from the file extension: `.ts`, `.mts` and `.cts`
/// are TypeScript, `.tsx` is TypeScript with JSX, anything else is parsed as
/// ECMAScript with JSX enabled. A syntax error aborts the unit.
pub fn parse_source(source: &str, file_path: &str) -> Result<SyntaxTree> {
    let source_map: Arc<SourceMap> = Default::default();

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(file_path.into()).into(),
            source.to_string(),
        );

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;

        for error in parser.take_errors() {
            debug!(file = file_path, "recovered from syntax error: {:?}", error);
        }

        let mut builder = TreeBuilder::new(
            &source_map,
            source_file.start_pos,
            source_file.end_pos,
            source.len(),
        );
        module.visit_with(&mut builder);
        builder.resolve_local_exports();
        builder.add_comments(&comments);

        Ok(builder.tree)
    })
}

fn syntax_for(file_path: &str) -> Syntax {
    match Path::new(file_path).extension().and_then(|e| e.to_str()) {
        Some("ts" | "mts" | "cts") => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Lowers swc's AST into a [`SyntaxTree`] during a single visit.
///
/// Every tracked node becomes a child of the innermost tracked node that
/// encloses it. Export information is resolved on the fly for
/// `export <decl>` / `export default <decl>`, and after the visit for local
/// `export { name }` lists and `export default name`.
struct TreeBuilder<'a> {
    source_map: &'a SourceMap,
    start_pos: BytePos,
    tree: SyntaxTree,
    stack: Vec<NodeId>,
    /// Set while inside an export wrapper until its declaration is entered.
    export_next: bool,
    /// Names exported through `export { name }` or `export default name`.
    local_exports: Vec<String>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source_map: &'a SourceMap, start_pos: BytePos, end_pos: BytePos, len: usize) -> Self {
        let root_loc = SyntaxLocation::new(
            position(source_map, start_pos),
            position(source_map, end_pos),
        );
        let tree = SyntaxTree::new(SourceSpan::new(0, len), root_loc);
        let root = tree.root();
        Self {
            source_map,
            start_pos,
            tree,
            stack: vec![root],
            export_next: false,
            local_exports: Vec::new(),
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or_else(|| self.tree.root())
    }

    fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.start_pos.0) as usize
    }

    fn source_span(&self, span: Span) -> SourceSpan {
        SourceSpan::new(self.offset(span.lo), self.offset(span.hi))
    }

    fn location(&self, span: Span) -> SyntaxLocation {
        SyntaxLocation::new(
            position(self.source_map, span.lo),
            position(self.source_map, span.hi),
        )
    }

    /// Record a node and visit its children beneath it.
    ///
    /// Synthetic nodes (dummy spans) are not recorded; their children attach
    /// to the enclosing node instead.
    fn enter(
        &mut self,
        kind: NodeKind,
        span: Span,
        name: Option<String>,
        visit_children: impl FnOnce(&mut Self),
    ) {
        if span.is_dummy() || span.lo < self.start_pos {
            visit_children(self);
            return;
        }

        let id = self.tree.add_node(
            self.current(),
            kind,
            self.source_span(span),
            self.location(span),
            name,
        );
        if std::mem::take(&mut self.export_next) {
            self.tree.mark_exported(id);
        }

        self.stack.push(id);
        visit_children(self);
        self.stack.pop();
    }

    fn enter_export(&mut self, kind: NodeKind, span: Span, visit_children: impl FnOnce(&mut Self)) {
        self.enter(kind, span, None, |builder| {
            builder.export_next = true;
            visit_children(builder);
            builder.export_next = false;
        });
    }

    fn resolve_local_exports(&mut self) {
        for name in std::mem::take(&mut self.local_exports) {
            match self.tree.find_declaration(&name) {
                Some(id) => self.tree.mark_exported(id),
                None => debug!(name = %name, "exported name has no module-level declaration"),
            }
        }
    }

    fn add_comments(&mut self, comments: &SingleThreadedComments) {
        let (leading, trailing) = comments.borrow_all();

        let mut collected: Vec<RawComment> = leading
            .iter()
            .map(|(pos, cmts)| (Attachment::Leading, pos, cmts))
            .chain(
                trailing
                    .iter()
                    .map(|(pos, cmts)| (Attachment::Trailing, pos, cmts)),
            )
            .flat_map(|(attachment, pos, cmts)| {
                cmts.iter().map(move |cmt| (attachment, *pos, cmt))
            })
            .filter(|(_, _, cmt)| !cmt.span.is_dummy())
            .map(|(attachment, pos, cmt)| RawComment {
                kind: match cmt.kind {
                    comments::CommentKind::Line => CommentKind::Line,
                    comments::CommentKind::Block => CommentKind::Block,
                },
                text: cmt.text.to_string(),
                span: self.source_span(cmt.span),
                loc: self.location(cmt.span),
                attachment,
                attached_at: self.offset(pos),
            })
            .collect();

        // Keep comments in source order regardless of hash map iteration order
        collected.sort_by_key(|comment| comment.span.start);

        for comment in collected {
            self.tree.add_comment(comment);
        }
    }
}

fn position(source_map: &SourceMap, pos: BytePos) -> Position {
    let loc = source_map.lookup_char_pos(pos);
    Position::new(loc.line, loc.col.0)
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        _ => None,
    }
}

fn expr_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        _ => None,
    }
}

/// Record nodes that carry no name of their own.
macro_rules! track_nodes {
    ($($method:ident($ty:ident) => $kind:ident),* $(,)?) => {
        $(
            fn $method(&mut self, node: &$ty) {
                self.enter(NodeKind::$kind, node.span(), None, |builder| {
                    node.visit_children_with(builder)
                });
            }
        )*
    };
}

/// Record nodes together with the name they declare.
macro_rules! track_named_nodes {
    ($($method:ident($ty:ident) => $kind:ident, |$node:ident| $name:expr);* $(;)?) => {
        $(
            fn $method(&mut self, $node: &$ty) {
                let name = $name;
                self.enter(NodeKind::$kind, $node.span(), name, |builder| {
                    $node.visit_children_with(builder)
                });
            }
        )*
    };
}

impl Visit for TreeBuilder<'_> {
    fn visit_module(&mut self, node: &Module) {
        node.visit_children_with(self);
    }

    fn visit_export_decl(&mut self, node: &ExportDecl) {
        self.enter_export(NodeKind::ExportNamedDeclaration, node.span, |builder| {
            node.visit_children_with(builder)
        });
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        self.enter_export(NodeKind::ExportDefaultDeclaration, node.span, |builder| {
            node.visit_children_with(builder)
        });
    }

    fn visit_export_default_expr(&mut self, node: &ExportDefaultExpr) {
        if let Some(name) = expr_name(&node.expr) {
            self.local_exports.push(name);
            self.enter(NodeKind::ExportDefaultDeclaration, node.span, None, |builder| {
                node.visit_children_with(builder)
            });
            return;
        }

        self.enter(NodeKind::ExportDefaultDeclaration, node.span, None, |builder| {
            builder.export_next = true;
            node.visit_children_with(builder);
            // Nothing tracked below (e.g. `export default 42`): the wrapper is the export
            if std::mem::take(&mut builder.export_next) {
                let wrapper = builder.current();
                builder.tree.mark_exported(wrapper);
            }
        });
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        if node.src.is_some() {
            debug!("re-export from another module is not followed");
        } else {
            for specifier in &node.specifiers {
                if let ExportSpecifier::Named(named) = specifier {
                    if let ModuleExportName::Ident(ident) = &named.orig {
                        self.local_exports.push(ident.sym.to_string());
                    }
                }
            }
        }
        self.enter(NodeKind::ExportNamedDeclaration, node.span, None, |builder| {
            node.visit_children_with(builder)
        });
    }

    track_nodes! {
        visit_export_all(ExportAll) => ExportAllDeclaration,
        visit_import_decl(ImportDecl) => ImportDeclaration,
        visit_var_decl(VarDecl) => VariableDeclaration,
        visit_function(Function) => Function,
        visit_class(Class) => Class,
        visit_static_block(StaticBlock) => StaticBlock,
        visit_object_lit(ObjectLit) => ObjectExpression,
        visit_array_lit(ArrayLit) => ArrayExpression,
        visit_block_stmt(BlockStmt) => BlockStatement,
        visit_expr_stmt(ExprStmt) => ExpressionStatement,
        visit_return_stmt(ReturnStmt) => ReturnStatement,
        visit_if_stmt(IfStmt) => IfStatement,
        visit_for_stmt(ForStmt) => ForStatement,
        visit_for_in_stmt(ForInStmt) => ForInStatement,
        visit_for_of_stmt(ForOfStmt) => ForOfStatement,
        visit_while_stmt(WhileStmt) => WhileStatement,
        visit_do_while_stmt(DoWhileStmt) => DoWhileStatement,
        visit_try_stmt(TryStmt) => TryStatement,
        visit_switch_stmt(SwitchStmt) => SwitchStatement,
        visit_switch_case(SwitchCase) => SwitchCase,
        visit_throw_stmt(ThrowStmt) => ThrowStatement,
        visit_labeled_stmt(LabeledStmt) => LabeledStatement,
        visit_arrow_expr(ArrowExpr) => ArrowFunctionExpression,
        visit_assign_expr(AssignExpr) => AssignmentExpression,
        visit_call_expr(CallExpr) => CallExpression,
        visit_new_expr(NewExpr) => NewExpression,
        visit_param(Param) => Parameter,
        visit_ts_interface_body(TsInterfaceBody) => TSInterfaceBody,
        visit_ts_type_lit(TsTypeLit) => TSTypeLiteral,
    }

    track_named_nodes! {
        visit_fn_decl(FnDecl) => FunctionDeclaration, |node| Some(node.ident.sym.to_string());
        visit_class_decl(ClassDecl) => ClassDeclaration, |node| Some(node.ident.sym.to_string());
        visit_fn_expr(FnExpr) => FunctionExpression, |node| node.ident.as_ref().map(|i| i.sym.to_string());
        visit_class_expr(ClassExpr) => ClassExpression, |node| node.ident.as_ref().map(|i| i.sym.to_string());
        visit_var_declarator(VarDeclarator) => VariableDeclarator, |node| match &node.name {
            Pat::Ident(binding) => Some(binding.id.sym.to_string()),
            _ => None,
        };
        visit_class_method(ClassMethod) => ClassMethod, |node| prop_name(&node.key);
        visit_private_method(PrivateMethod) => ClassPrivateMethod, |node| Some(format!("#{}", node.key.name));
        visit_class_prop(ClassProp) => ClassProperty, |node| prop_name(&node.key);
        visit_private_prop(PrivateProp) => ClassPrivateProperty, |node| Some(format!("#{}", node.key.name));
        visit_constructor(Constructor) => ClassConstructor, |_node| Some("constructor".to_string());
        visit_key_value_prop(KeyValueProp) => ObjectProperty, |node| prop_name(&node.key);
        visit_method_prop(MethodProp) => ObjectMethod, |node| prop_name(&node.key);
        visit_getter_prop(GetterProp) => ObjectGetter, |node| prop_name(&node.key);
        visit_setter_prop(SetterProp) => ObjectSetter, |node| prop_name(&node.key);
        visit_ts_interface_decl(TsInterfaceDecl) => TSInterfaceDeclaration, |node| Some(node.id.sym.to_string());
        visit_ts_type_alias_decl(TsTypeAliasDecl) => TSTypeAliasDeclaration, |node| Some(node.id.sym.to_string());
        visit_ts_enum_decl(TsEnumDecl) => TSEnumDeclaration, |node| Some(node.id.sym.to_string());
        visit_ts_enum_member(TsEnumMember) => TSEnumMember, |node| match &node.id {
            TsEnumMemberId::Ident(ident) => Some(ident.sym.to_string()),
            _ => None,
        };
        visit_ts_module_decl(TsModuleDecl) => TSModuleDeclaration, |node| match &node.id {
            TsModuleName::Ident(ident) => Some(ident.sym.to_string()),
            _ => None,
        };
        visit_ts_property_signature(TsPropertySignature) => TSPropertySignature, |node| expr_name(&node.key);
        visit_ts_method_signature(TsMethodSignature) => TSMethodSignature, |node| expr_name(&node.key);
    }
}
