use anyhow::Result;

use super::{CandidateComment, CommentWalker};
use crate::core::tree::{NodeId, SyntaxTree};
use crate::core::unit::SourceUnit;

/// Reports the documentation of exported declarations only.
///
/// For every exported node the walker reports the doc comments in front of
/// it (in front of its `export` keyword when it has one). Exports without a
/// doc comment are still reported, with an empty comment located at the
/// node, so that the public surface of a module is always complete. Members
/// of exported classes, objects, interfaces and enums are reported the same
/// way right after their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportedWalker;

impl CommentWalker for ExportedWalker {
    fn walk(&self, unit: &SourceUnit, emit: &mut dyn FnMut(CandidateComment)) -> Result<()> {
        let tree = &unit.tree;
        for id in tree.preorder() {
            if !tree.node(id).exported {
                continue;
            }
            document(unit, id, emit);
            for member in members(tree, id) {
                document(unit, member, emit);
            }
        }
        Ok(())
    }
}

fn document(unit: &SourceUnit, id: NodeId, emit: &mut dyn FnMut(CandidateComment)) {
    let tree = &unit.tree;
    // Comments of `export function f` sit in front of `export`
    let target = tree
        .parent(id)
        .filter(|&parent| tree.node(parent).kind.is_export_wrapper())
        .unwrap_or(id);
    let node = tree.node(target);

    let mut documented = false;
    for comment in tree.comments_before(node.span.start, &unit.source) {
        if !comment.is_doc_comment() {
            continue;
        }
        documented = true;
        emit(CandidateComment {
            text: comment.text.clone(),
            loc: comment.loc,
            node: target,
            node_loc: node.loc,
            include_context: true,
        });
    }

    if !documented {
        emit(CandidateComment {
            text: String::new(),
            loc: node.loc,
            node: target,
            node_loc: node.loc,
            include_context: true,
        });
    }
}

/// Members documented along with an exported owner, in source order.
fn members(tree: &SyntaxTree, owner: NodeId) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack: Vec<NodeId> = tree.node(owner).children.iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let node = tree.node(id);
        if node.kind.is_member() {
            found.push(id);
        } else if node.kind.leads_to_members() {
            stack.extend(node.children.iter().rev().copied());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::tree::NodeKind;

    fn walk(file: &str, source: &str) -> Vec<(String, NodeKind, Option<String>)> {
        let unit = SourceUnit::parse(file, source, "a").unwrap();
        let mut found = Vec::new();
        ExportedWalker
            .walk(&unit, &mut |candidate| {
                assert!(candidate.include_context);
                let node = unit.tree.node(candidate.node);
                found.push((candidate.text.trim().to_string(), node.kind, node.name.clone()))
            })
            .unwrap();
        found
    }

    #[test]
    fn test_only_exported_declarations() {
        let source = r#"
/** Private helper. */
function helper() {}

/** Public entry point. */
export function main() {}
"#;
        assert_eq!(
            walk("main.js", source),
            vec![(
                "* Public entry point.".to_string(),
                NodeKind::ExportNamedDeclaration,
                None
            )]
        );
    }

    #[test]
    fn test_undocumented_export_gets_blank_comment() {
        let found = walk("blank.js", "export const VERSION = '1.0';\n");
        assert_eq!(
            found,
            vec![(String::new(), NodeKind::ExportNamedDeclaration, None)]
        );
    }

    #[test]
    fn test_blank_comment_located_at_node() {
        let unit = SourceUnit::parse("blank.js", "\nexport const VERSION = '1.0';\n", "a").unwrap();
        let mut candidates = Vec::new();
        ExportedWalker
            .walk(&unit, &mut |candidate| candidates.push(candidate))
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].loc, candidates[0].node_loc);
        assert_eq!(candidates[0].loc.start.line, 2);
    }

    #[test]
    fn test_local_export_list_uses_declaration_comment() {
        let source = r#"
/** Adds two numbers. */
function add(a, b) { return a + b; }
export { add };
"#;
        assert_eq!(
            walk("add.js", source),
            vec![(
                "* Adds two numbers.".to_string(),
                NodeKind::FunctionDeclaration,
                Some("add".to_string())
            )]
        );
    }

    #[test]
    fn test_class_members_follow_owner() {
        let source = r#"
/** A counter. */
export class Counter {
  /** Adds one. */
  increment() {}
  reset() {}
}
"#;
        let found = walk("counter.js", source);
        assert_eq!(
            found,
            vec![
                ("* A counter.".to_string(), NodeKind::ExportNamedDeclaration, None),
                (
                    "* Adds one.".to_string(),
                    NodeKind::ClassMethod,
                    Some("increment".to_string())
                ),
                (String::new(), NodeKind::ClassMethod, Some("reset".to_string())),
            ]
        );
    }

    #[test]
    fn test_single_line_class_body() {
        let found = walk("runner.js", "export class C { /** Runs. */ run() {} }\n");
        assert_eq!(
            found,
            vec![
                (String::new(), NodeKind::ExportNamedDeclaration, None),
                ("* Runs.".to_string(), NodeKind::ClassMethod, Some("run".to_string())),
            ]
        );
    }

    #[test]
    fn test_single_line_enum_body() {
        let found = walk("colors.ts", "export enum E { /** Red color. */ Red, Green }\n");
        assert_eq!(
            found,
            vec![
                (String::new(), NodeKind::ExportNamedDeclaration, None),
                ("* Red color.".to_string(), NodeKind::TSEnumMember, Some("Red".to_string())),
                (String::new(), NodeKind::TSEnumMember, Some("Green".to_string())),
            ]
        );
    }

    #[test]
    fn test_object_properties_of_exported_variable() {
        let source = r#"
export const api = {
  /** Fetch a thing. */
  fetch() {},
  timeout: 30,
};
"#;
        let found = walk("api.js", source);
        let members: Vec<_> = found
            .iter()
            .skip(1)
            .map(|(text, kind, name)| (text.as_str(), *kind, name.as_deref()))
            .collect();
        assert_eq!(
            members,
            vec![
                ("* Fetch a thing.", NodeKind::ObjectMethod, Some("fetch")),
                ("", NodeKind::ObjectProperty, Some("timeout")),
            ]
        );
    }

    #[test]
    fn test_nested_functions_are_not_members() {
        let source = r#"
export function outer() {
  /** Not part of the public surface. */
  function inner() {}
}
"#;
        let found = walk("outer.js", source);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "");
    }

    #[test]
    fn test_typescript_interface_members() {
        let source = r#"
/** A shape. */
export interface Shape {
  /** Area in square units. */
  area(): number;
}
"#;
        let found = walk("shape.ts", source);
        assert_eq!(
            found,
            vec![
                ("* A shape.".to_string(), NodeKind::ExportNamedDeclaration, None),
                (
                    "* Area in square units.".to_string(),
                    NodeKind::TSMethodSignature,
                    Some("area".to_string())
                ),
            ]
        );
    }

    #[test]
    fn test_no_exports() {
        assert!(walk("none.js", "/** doc */\nfunction f() {}\n").is_empty());
    }
}
