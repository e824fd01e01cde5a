//! Names bound by a binding pattern
//!
//! Collects the identifiers a declarator, parameter or caught-exception
//! pattern introduces, in left-to-right, outer-to-inner order. Repeated
//! bindings are reported as they appear.

use crate::kind::NodeKind;
use crate::node::Node;

pub fn bound_names(pattern: Option<&Node>) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(pattern) = pattern {
        collect_bound(pattern, &mut names);
    }
    names
}

pub(crate) fn collect_bound(node: &Node, out: &mut Vec<String>) {
    match node.kind() {
        NodeKind::Identifier => out.extend(node.name().map(str::to_string)),
        NodeKind::AssignmentPattern => visit(node.child("left"), out),
        NodeKind::RestElement => visit(node.child("argument"), out),
        NodeKind::Property => match node.child("value") {
            Some(value) if value.kind().is_pattern() => collect_bound(value, out),
            _ => visit(node.child("key"), out),
        },
        _ => {
            for child in node.children() {
                collect_bound(child, out);
            }
        }
    }
}

fn visit(node: Option<&Node>, out: &mut Vec<String>) {
    if let Some(node) = node {
        collect_bound(node, out);
    }
}
