//! Analyses built on the walker
//!
//! Scope summaries list the names each scope frame starts with. Free
//! reference detection walks a tree with a transform table that records
//! identifier references no enclosing frame declares.

use std::cell::RefCell;

use serde::Serialize;

use crate::bindings::bound_names;
use crate::env::Env;
use crate::error::{WalkError, WalkResult};
use crate::hoist::fresh_names;
use crate::kind::NodeKind;
use crate::node::Node;
use crate::walk::{Rule, Transforms, descend, walk, walk_slot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeSummary {
    pub kind: NodeKind,
    pub span: Option<(u64, u64)>,
    pub depth: usize,
    pub names: Vec<String>,
}

/// Every scope-introducing node in pre-order with the names its frame is
/// pre-populated with.
pub fn scope_summaries(tree: &Node) -> Vec<ScopeSummary> {
    let mut summaries = Vec::new();
    collect_scopes(tree, 0, &mut summaries);
    summaries
}

fn collect_scopes(node: &Node, depth: usize, out: &mut Vec<ScopeSummary>) {
    let names = match node.kind().rule() {
        Some(Rule::Program | Rule::Catch) => Some(fresh_names(Some(node))),
        Some(Rule::Function) => {
            let mut names = fresh_names(node.child("body"));
            for param in node.list("params").into_iter().flatten().flatten() {
                names.extend(bound_names(Some(param)));
            }
            Some(names)
        }
        _ => None,
    };

    let depth = match names {
        Some(names) => {
            let frame = Env::with_names(names);
            out.push(ScopeSummary {
                kind: node.kind().clone(),
                span: node.span(),
                depth,
                names: frame.names().to_vec(),
            });
            depth + 1
        }
        None => depth,
    };

    for child in node.children() {
        collect_scopes(child, depth, out);
    }
}

#[derive(Debug, Clone, Default)]
pub struct FreeOptions {
    /// Names visible in the root frame.
    pub globals: Vec<String>,
    /// Names never reported.
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeReference {
    pub name: String,
    pub span: Option<(u64, u64)>,
}

/// Identifier references that are not visible where they occur, in source
/// order.
///
/// Object properties are intercepted to skip their keys, so a default inside
/// a destructured parameter (`({a = x}) => a`) resolves against the function
/// frame, where sibling parameters are already visible. A plain default
/// parameter (`(a = x) => a`) resolves against the enclosing frame.
pub fn free_references(tree: Node, options: &FreeOptions) -> Result<Vec<FreeReference>, WalkError> {
    let found = RefCell::new(Vec::new());
    let globals = Env::with_names(options.globals.iter().cloned());

    let transforms = Transforms::new()
        .on(NodeKind::Identifier, |node, env, _| {
            if let Some(name) = node.name() {
                if !env.contains(name) && !options.ignore.iter().any(|n| n == name) {
                    found.borrow_mut().push(FreeReference {
                        name: name.to_string(),
                        span: node.span(),
                    });
                }
            }
            Ok(Some(node))
        })
        .on(NodeKind::MemberExpression, member)
        .on(NodeKind::Property, keyed)
        .on(NodeKind::MethodDefinition, keyed)
        .on(NodeKind::PropertyDefinition, keyed)
        .on(NodeKind::ClassProperty, keyed)
        .on(NodeKind::LabeledStatement, labeled)
        .on(NodeKind::BreakStatement, untouched)
        .on(NodeKind::ContinueStatement, untouched)
        .on(NodeKind::ImportDeclaration, untouched)
        .on(NodeKind::ExportAllDeclaration, untouched)
        .on(NodeKind::ExportNamedDeclaration, export_named)
        .on(NodeKind::ExportSpecifier, export_specifier)
        .on(NodeKind::FunctionDeclaration, self_named)
        .on(NodeKind::FunctionExpression, self_named)
        .on(NodeKind::ClassExpression, self_named);

    walk(&transforms, Some(&globals), Some(tree))?;
    drop(transforms);
    Ok(found.into_inner())
}

fn member(mut node: Node, env: &Env<'_>, transforms: &Transforms<'_>) -> WalkResult {
    walk_slot(transforms, env, &mut node, "object")?;
    if node.flag("computed") {
        walk_slot(transforms, env, &mut node, "property")?;
    }
    Ok(Some(node))
}

fn keyed(mut node: Node, env: &Env<'_>, transforms: &Transforms<'_>) -> WalkResult {
    if node.flag("computed") {
        walk_slot(transforms, env, &mut node, "key")?;
    }
    walk_slot(transforms, env, &mut node, "value")?;
    Ok(Some(node))
}

fn labeled(mut node: Node, env: &Env<'_>, transforms: &Transforms<'_>) -> WalkResult {
    walk_slot(transforms, env, &mut node, "body")?;
    Ok(Some(node))
}

fn untouched(node: Node, _env: &Env<'_>, _transforms: &Transforms<'_>) -> WalkResult {
    Ok(Some(node))
}

fn export_named(mut node: Node, env: &Env<'_>, transforms: &Transforms<'_>) -> WalkResult {
    if node.child("source").is_some() {
        walk_slot(transforms, env, &mut node, "declaration")?;
        return Ok(Some(node));
    }
    descend(transforms, env, node).map(Some)
}

fn export_specifier(mut node: Node, env: &Env<'_>, transforms: &Transforms<'_>) -> WalkResult {
    walk_slot(transforms, env, &mut node, "local")?;
    Ok(Some(node))
}

/// Function and class expressions see their own name; non-arrow functions
/// also see `arguments`.
fn self_named(node: Node, env: &Env<'_>, transforms: &Transforms<'_>) -> WalkResult {
    let mut inner = env.child();
    if node.kind() != &NodeKind::FunctionDeclaration {
        if let Some(name) = node.child("id").and_then(Node::name) {
            inner.declare(name);
        }
    }
    if node.kind().is_function() {
        inner.declare("arguments");
    }
    descend(transforms, &inner, node).map(Some)
}
