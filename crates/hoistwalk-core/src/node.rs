//! Generic ESTree node representation
//!
//! A [`Node`] is a kind plus an ordered list of named fields. Fields hold
//! child nodes, ordered child lists, or plain JSON values (names, flags,
//! positions). Nodes convert to and from ESTree JSON documents.

use serde::de::Error as _;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::TreeError;
use crate::kind::NodeKind;

const TYPE_KEY: &str = "type";

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Absent,
    Node(Node),
    List(Vec<Option<Node>>),
    Value(Value),
}

impl Field {
    /// Nodes held by this field, skipping list holes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        let (single, list) = match self {
            Field::Node(node) => (Some(node), &[][..]),
            Field::List(items) => (None, items.as_slice()),
            Field::Absent | Field::Value(_) => (None, &[][..]),
        };
        single.into_iter().chain(list.iter().flatten())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    fn from_json(value: Value) -> Result<Self, TreeError> {
        if value.is_null() {
            return Ok(Field::Absent);
        }
        if is_node_or_null(&value) {
            return Node::try_from(value).map(Field::Node);
        }
        match value {
            Value::Array(items) if items.iter().all(is_node_or_null) => items
                .into_iter()
                .map(|item| match item {
                    Value::Null => Ok(None),
                    other => Node::try_from(other).map(Some),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Field::List),
            other => Ok(Field::Value(other)),
        }
    }
}

fn is_node_or_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.get(TYPE_KEY).is_some_and(Value::is_string),
        _ => false,
    }
}

impl From<Node> for Field {
    fn from(node: Node) -> Self {
        Field::Node(node)
    }
}

impl From<Option<Node>> for Field {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Field::Absent, Field::Node)
    }
}

impl From<Vec<Node>> for Field {
    fn from(nodes: Vec<Node>) -> Self {
        Field::List(nodes.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<Node>>> for Field {
    fn from(nodes: Vec<Option<Node>>) -> Self {
        Field::List(nodes)
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Field::Absent,
            other => Field::Value(other),
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Value(Value::String(value.to_string()))
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Value(Value::Bool(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    fields: Vec<(String, Field)>,
}

impl Node {
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    pub fn identifier(name: &str) -> Self {
        Node::new(NodeKind::Identifier).with("name", name)
    }

    /// Builder-style field assignment.
    pub fn with(mut self, slot: &str, field: impl Into<Field>) -> Self {
        self.set(slot, field.into());
        self
    }

    /// Decodes an ESTree document of any nesting depth. Long operator or
    /// call chains nest far past serde_json's default limit.
    pub fn from_json(source: &str) -> Result<Self, TreeError> {
        let mut deserializer = serde_json::Deserializer::from_str(source);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Node::try_from(value)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn get(&self, slot: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, field)| field)
    }

    pub fn child(&self, slot: &str) -> Option<&Node> {
        match self.get(slot)? {
            Field::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn list(&self, slot: &str) -> Option<&[Option<Node>]> {
        match self.get(slot)? {
            Field::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn value(&self, slot: &str) -> Option<&Value> {
        match self.get(slot)? {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The `name` of an identifier-like node.
    pub fn name(&self) -> Option<&str> {
        self.value("name").and_then(Value::as_str)
    }

    /// Boolean flag such as `computed` or `shorthand`; missing means false.
    pub fn flag(&self, slot: &str) -> bool {
        self.value(slot).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Source offsets from the ESTree `start`/`end` fields, when present.
    pub fn span(&self) -> Option<(u64, u64)> {
        let start = self.value("start").and_then(Value::as_u64)?;
        let end = self.value("end").and_then(Value::as_u64)?;
        Some((start, end))
    }

    /// Immediate child nodes in field order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.fields.iter().flat_map(|(_, field)| field.nodes())
    }

    /// Moves a field out, leaving `Absent` in its place.
    pub fn take(&mut self, slot: &str) -> Field {
        self.fields
            .iter_mut()
            .find(|(name, _)| name == slot)
            .map(|(_, field)| std::mem::replace(field, Field::Absent))
            .unwrap_or(Field::Absent)
    }

    /// Replaces a field in place, appending it when the node lacks the slot.
    pub fn set(&mut self, slot: &str, field: Field) {
        if let Some((_, existing)) = self.fields.iter_mut().find(|(name, _)| name == slot) {
            *existing = field;
        } else if !field.is_absent() {
            self.fields.push((slot.to_string(), field));
        }
    }
}

impl TryFrom<Value> for Node {
    type Error = TreeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Err(TreeError::NotANode);
        };

        let mut kind = None;
        let mut fields = Vec::with_capacity(map.len());
        for (name, value) in map {
            if name == TYPE_KEY {
                match value {
                    Value::String(type_name) => kind = Some(NodeKind::from_type(&type_name)),
                    _ => return Err(TreeError::NotANode),
                }
            } else {
                fields.push((name, Field::from_json(value)?));
            }
        }

        let kind = kind.ok_or(TreeError::NotANode)?;
        Ok(Node { kind, fields })
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(TYPE_KEY, self.kind.as_str())?;
        for (name, field) in &self.fields {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Absent => serializer.serialize_none(),
            Field::Node(node) => node.serialize(serializer),
            Field::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Field::Value(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Node::try_from(value).map_err(D::Error::custom)
    }
}
