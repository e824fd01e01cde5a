//! Parameter and caught-exception patterns
//!
//! Names bound by a pattern are registered in the new frame as they are
//! reached, and each bound identifier is walked with that frame. Default
//! values and computed keys only see the enclosing environment.

use crate::bindings::bound_names;
use crate::env::Env;
use crate::error::{WalkError, WalkResult};
use crate::kind::NodeKind;
use crate::node::{Field, Node};

use super::rules::{Arity, SlotRule};
use super::{Transforms, malformed, visit};

pub(super) fn walk_params(
    transforms: &Transforms<'_>,
    outer: &Env<'_>,
    scope: &mut Env<'_>,
    node: &mut Node,
    slot: &SlotRule,
) -> Result<(), WalkError> {
    let Field::List(params) = node.take(slot.name) else {
        return Err(malformed(node, slot.name, Arity::List));
    };
    let params = walk_pattern_list(transforms, outer, scope, params)?;
    node.set(slot.name, Field::List(params));
    Ok(())
}

pub(super) fn walk_pattern_slot(
    transforms: &Transforms<'_>,
    outer: &Env<'_>,
    scope: &mut Env<'_>,
    node: &mut Node,
    slot: &SlotRule,
) -> Result<(), WalkError> {
    let walked = match node.take(slot.name) {
        Field::Absent => Field::Absent,
        Field::Node(pattern) => walk_pattern(transforms, outer, scope, pattern)?.into(),
        _ => return Err(malformed(node, slot.name, Arity::Node)),
    };
    node.set(slot.name, walked);
    Ok(())
}

fn walk_pattern_list(
    transforms: &Transforms<'_>,
    outer: &Env<'_>,
    scope: &mut Env<'_>,
    patterns: Vec<Option<Node>>,
) -> Result<Vec<Option<Node>>, WalkError> {
    let mut walked = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        walked.push(match pattern {
            Some(pattern) => walk_pattern(transforms, outer, scope, pattern)?,
            None => None,
        });
    }
    Ok(walked)
}

fn walk_pattern(
    transforms: &Transforms<'_>,
    outer: &Env<'_>,
    scope: &mut Env<'_>,
    mut pattern: Node,
) -> WalkResult {
    if transforms.contains(pattern.kind()) {
        scope.declare_all(bound_names(Some(&pattern)));
        return visit(transforms, scope, pattern);
    }

    match pattern.kind() {
        NodeKind::Identifier => {
            if let Some(name) = pattern.name() {
                scope.declare(name);
            }
            Ok(Some(pattern))
        }
        NodeKind::AssignmentPattern => {
            walk_pattern_slot(transforms, outer, scope, &mut pattern, &LEFT)?;
            walk_outer_slot(transforms, outer, &mut pattern, &RIGHT)?;
            Ok(Some(pattern))
        }
        NodeKind::RestElement => {
            walk_pattern_slot(transforms, outer, scope, &mut pattern, &ARGUMENT)?;
            Ok(Some(pattern))
        }
        NodeKind::Property => {
            // A property without a pattern value binds its key.
            if !pattern.child("value").is_some_and(|value| value.kind().is_pattern()) {
                scope.declare_all(bound_names(pattern.child("key")));
            }
            walk_outer_slot(transforms, outer, &mut pattern, &KEY)?;
            walk_pattern_slot(transforms, outer, scope, &mut pattern, &VALUE)?;
            Ok(Some(pattern))
        }
        NodeKind::ObjectPattern => {
            walk_nested_list(transforms, outer, scope, &mut pattern, &PROPERTIES)?;
            Ok(Some(pattern))
        }
        NodeKind::ArrayPattern => {
            walk_nested_list(transforms, outer, scope, &mut pattern, &ELEMENTS)?;
            Ok(Some(pattern))
        }
        _ => visit(transforms, scope, pattern),
    }
}

const LEFT: SlotRule = SlotRule { name: "left", arity: Arity::Node };
const RIGHT: SlotRule = SlotRule { name: "right", arity: Arity::Node };
const ARGUMENT: SlotRule = SlotRule { name: "argument", arity: Arity::Node };
const KEY: SlotRule = SlotRule { name: "key", arity: Arity::Node };
const VALUE: SlotRule = SlotRule { name: "value", arity: Arity::Node };
const PROPERTIES: SlotRule = SlotRule { name: "properties", arity: Arity::List };
const ELEMENTS: SlotRule = SlotRule { name: "elements", arity: Arity::List };

fn walk_nested_list(
    transforms: &Transforms<'_>,
    outer: &Env<'_>,
    scope: &mut Env<'_>,
    node: &mut Node,
    slot: &SlotRule,
) -> Result<(), WalkError> {
    let Field::List(items) = node.take(slot.name) else {
        return Err(malformed(node, slot.name, Arity::List));
    };
    let items = walk_pattern_list(transforms, outer, scope, items)?;
    node.set(slot.name, Field::List(items));
    Ok(())
}

fn walk_outer_slot(
    transforms: &Transforms<'_>,
    outer: &Env<'_>,
    node: &mut Node,
    slot: &SlotRule,
) -> Result<(), WalkError> {
    let walked = match node.take(slot.name) {
        Field::Absent => Field::Absent,
        Field::Node(child) => visit(transforms, outer, child)?.into(),
        _ => return Err(malformed(node, slot.name, Arity::Node)),
    };
    node.set(slot.name, walked);
    Ok(())
}
