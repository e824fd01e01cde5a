//! Names a scope declares directly
//!
//! Hoisting makes `var` declarators, function declarations, class
//! declarations, imports and caught exceptions visible throughout the
//! enclosing scope. Nested function and class expressions form their own
//! scopes and contribute nothing here.

use crate::bindings::collect_bound;
use crate::kind::NodeKind;
use crate::node::Node;

pub fn fresh_names(node: Option<&Node>) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(node) = node {
        collect_fresh(node, &mut names);
    }
    names
}

fn collect_fresh(node: &Node, out: &mut Vec<String>) {
    match node.kind() {
        NodeKind::VariableDeclarator => {
            if let Some(id) = node.child("id") {
                collect_bound(id, out);
            }
        }
        NodeKind::FunctionExpression
        | NodeKind::ArrowFunctionExpression
        | NodeKind::ClassExpression => {}
        NodeKind::FunctionDeclaration | NodeKind::ClassDeclaration => {
            out.extend(node.child("id").and_then(Node::name).map(str::to_string));
        }
        NodeKind::CatchClause => {
            if let Some(body) = node.child("body") {
                collect_fresh(body, out);
            }
            if let Some(param) = node.child("param") {
                collect_bound(param, out);
            }
        }
        NodeKind::ImportSpecifier
        | NodeKind::ImportDefaultSpecifier
        | NodeKind::ImportNamespaceSpecifier => {
            if let Some(local) = node.child("local") {
                collect_bound(local, out);
            }
        }
        _ => {
            for child in node.children() {
                collect_fresh(child, out);
            }
        }
    }
}
