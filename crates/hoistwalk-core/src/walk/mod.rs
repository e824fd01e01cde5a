//! Scope-aware tree walker
//!
//! [`walk`] hands every node whose kind has an entry in a [`Transforms`]
//! table to that transform and otherwise recurses with the built-in rule
//! for the kind. Program, function and catch nodes get a new [`Env`] frame
//! pre-populated with their hoisted names before any child is visited.

mod params;
mod rules;

pub use rules::{Arity, Rule, SlotRule};

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::env::Env;
use crate::error::{WalkError, WalkResult};
use crate::hoist::fresh_names;
use crate::kind::NodeKind;
use crate::node::{Field, Node};

use rules::{CATCH_BODY, CATCH_PARAM, FUNCTION_BODY, FUNCTION_ID, FUNCTION_PARAMS, PROGRAM_BODY};

/// A caller-supplied handler invoked instead of structural recursion.
///
/// It receives the node, the environment visible at the node, and the
/// table it was registered in so it can re-enter the walker.
pub type TransformFn<'t> = dyn Fn(Node, &Env<'_>, &Transforms<'t>) -> WalkResult + 't;

#[derive(Default)]
pub struct Transforms<'t> {
    table: HashMap<NodeKind, Box<TransformFn<'t>>>,
}

impl<'t> Transforms<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, kind: impl Into<NodeKind>, transform: F) -> Self
    where
        F: Fn(Node, &Env<'_>, &Transforms<'t>) -> WalkResult + 't,
    {
        self.insert(kind, transform);
        self
    }

    pub fn insert<F>(&mut self, kind: impl Into<NodeKind>, transform: F)
    where
        F: Fn(Node, &Env<'_>, &Transforms<'t>) -> WalkResult + 't,
    {
        self.table.insert(kind.into(), Box::new(transform));
    }

    pub fn contains(&self, kind: &NodeKind) -> bool {
        self.table.contains_key(kind)
    }

    pub fn get(&self, kind: &NodeKind) -> Option<&TransformFn<'t>> {
        self.table.get(kind).map(|transform| &**transform)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl std::fmt::Debug for Transforms<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.table.keys()).finish()
    }
}

/// Walks `node` with `transforms`, starting from `env` or an empty frame.
pub fn walk(transforms: &Transforms<'_>, env: Option<&Env<'_>>, node: Option<Node>) -> WalkResult {
    let Some(node) = node else {
        return Ok(None);
    };
    match env {
        Some(env) => visit(transforms, env, node),
        None => visit(transforms, &Env::root(), node),
    }
}

fn visit(transforms: &Transforms<'_>, env: &Env<'_>, node: Node) -> WalkResult {
    if let Some(transform) = transforms.get(node.kind()) {
        trace!(kind = %node.kind(), "transform intercepts node");
        return transform(node, env, transforms);
    }
    descend(transforms, env, node).map(Some)
}

/// Applies the built-in rule of `node`, bypassing any transform registered
/// for the node's own kind. Children still go through `transforms`.
pub fn descend(transforms: &Transforms<'_>, env: &Env<'_>, mut node: Node) -> Result<Node, WalkError> {
    let Some(rule) = node.kind().rule() else {
        return Ok(node);
    };

    match rule {
        Rule::Slots(slots) => {
            for slot in slots {
                walk_rule_slot(transforms, env, &mut node, slot)?;
            }
        }
        Rule::Children => walk_children(transforms, env, &mut node)?,
        Rule::Program => {
            let mut scope = env.child();
            scope.declare_all(fresh_names(Some(&node)));
            debug!(kind = %node.kind(), names = ?scope.names(), "entering scope");
            walk_rule_slot(transforms, &scope, &mut node, &PROGRAM_BODY)?;
        }
        Rule::Function => {
            walk_rule_slot(transforms, env, &mut node, &FUNCTION_ID)?;
            let mut scope = env.child();
            scope.declare_all(fresh_names(node.child(FUNCTION_BODY.name)));
            params::walk_params(transforms, env, &mut scope, &mut node, &FUNCTION_PARAMS)?;
            debug!(kind = %node.kind(), names = ?scope.names(), "entering scope");
            walk_rule_slot(transforms, &scope, &mut node, &FUNCTION_BODY)?;
        }
        Rule::Catch => {
            let mut scope = env.child();
            scope.declare_all(fresh_names(Some(&node)));
            params::walk_pattern_slot(transforms, env, &mut scope, &mut node, &CATCH_PARAM)?;
            debug!(kind = %node.kind(), names = ?scope.names(), "entering scope");
            walk_rule_slot(transforms, &scope, &mut node, &CATCH_BODY)?;
        }
    }
    Ok(node)
}

/// Walks whatever nodes a single field of `node` holds, leaving literal
/// values untouched.
pub fn walk_slot(
    transforms: &Transforms<'_>,
    env: &Env<'_>,
    node: &mut Node,
    slot: &str,
) -> Result<(), WalkError> {
    let field = walk_field(transforms, env, node.take(slot))?;
    node.set(slot, field);
    Ok(())
}

fn walk_children(transforms: &Transforms<'_>, env: &Env<'_>, node: &mut Node) -> Result<(), WalkError> {
    let slots: Vec<String> = node.fields().map(|(name, _)| name.to_string()).collect();
    for slot in slots {
        walk_slot(transforms, env, node, &slot)?;
    }
    Ok(())
}

fn walk_field(transforms: &Transforms<'_>, env: &Env<'_>, field: Field) -> Result<Field, WalkError> {
    Ok(match field {
        Field::Node(child) => visit(transforms, env, child)?.into(),
        Field::List(items) => Field::List(walk_list(transforms, env, items)?),
        other => other,
    })
}

fn walk_list(
    transforms: &Transforms<'_>,
    env: &Env<'_>,
    items: Vec<Option<Node>>,
) -> Result<Vec<Option<Node>>, WalkError> {
    items
        .into_iter()
        .map(|item| match item {
            Some(child) => visit(transforms, env, child),
            None => Ok(None),
        })
        .collect()
}

fn walk_rule_slot(
    transforms: &Transforms<'_>,
    env: &Env<'_>,
    node: &mut Node,
    slot: &SlotRule,
) -> Result<(), WalkError> {
    let field = node.take(slot.name);
    let walked = match (slot.arity, field) {
        (Arity::Node, Field::Absent) => Field::Absent,
        (Arity::Node, Field::Node(child)) => visit(transforms, env, child)?.into(),
        (Arity::List, Field::List(items)) => Field::List(walk_list(transforms, env, items)?),
        (arity, _) => return Err(malformed(node, slot.name, arity)),
    };
    node.set(slot.name, walked);
    Ok(())
}

pub(crate) fn malformed(node: &Node, slot: &'static str, arity: Arity) -> WalkError {
    WalkError::Malformed {
        kind: node.kind().clone(),
        slot,
        expected: match arity {
            Arity::Node => "a node or null",
            Arity::List => "a list of nodes",
        },
    }
}
