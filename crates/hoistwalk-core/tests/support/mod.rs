//! ESTree builders shared by the integration tests

#![allow(dead_code)]

use hoistwalk_core::Node;
use serde_json::{Value, json};

pub fn node(kind: &str, fields: Value) -> Value {
    let mut value = fields;
    value["type"] = Value::from(kind);
    value
}

pub fn tree(value: Value) -> Node {
    Node::try_from(value).expect("test tree should be a node")
}

pub fn program(body: Vec<Value>) -> Node {
    tree(node("Program", json!({"sourceType": "module", "body": body})))
}

pub fn ident(name: &str) -> Value {
    node("Identifier", json!({"name": name}))
}

pub fn lit(value: impl Into<Value>) -> Value {
    node("Literal", json!({"value": value.into()}))
}

pub fn stmt(expression: Value) -> Value {
    node("ExpressionStatement", json!({"expression": expression}))
}

pub fn block(body: Vec<Value>) -> Value {
    node("BlockStatement", json!({"body": body}))
}

pub fn array(elements: Vec<Value>) -> Value {
    node("ArrayExpression", json!({"elements": elements}))
}

pub fn object(properties: Vec<Value>) -> Value {
    node("ObjectExpression", json!({"properties": properties}))
}

pub fn array_pattern(elements: Vec<Value>) -> Value {
    node("ArrayPattern", json!({"elements": elements}))
}

pub fn object_pattern(properties: Vec<Value>) -> Value {
    node("ObjectPattern", json!({"properties": properties}))
}

pub fn prop(key: Value, value: Value) -> Value {
    node(
        "Property",
        json!({"method": false, "shorthand": false, "computed": false, "key": key, "value": value, "kind": "init"}),
    )
}

pub fn shorthand(name: &str) -> Value {
    node(
        "Property",
        json!({"method": false, "shorthand": true, "computed": false, "key": ident(name), "value": ident(name), "kind": "init"}),
    )
}

pub fn rest(argument: Value) -> Value {
    node("RestElement", json!({"argument": argument}))
}

pub fn default(left: Value, right: Value) -> Value {
    node("AssignmentPattern", json!({"left": left, "right": right}))
}

pub fn var(declarations: Vec<(Value, Value)>) -> Value {
    let declarations: Vec<Value> = declarations
        .into_iter()
        .map(|(id, init)| node("VariableDeclarator", json!({"id": id, "init": init})))
        .collect();
    node("VariableDeclaration", json!({"declarations": declarations, "kind": "var"}))
}

pub fn function(kind: &str, id: Option<&str>, params: Vec<Value>, body: Value) -> Value {
    let id = id.map_or(Value::Null, ident);
    node(
        kind,
        json!({"id": id, "expression": false, "generator": false, "async": false, "params": params, "body": body}),
    )
}

pub fn arrow(params: Vec<Value>, body: Value) -> Value {
    node(
        "ArrowFunctionExpression",
        json!({"id": null, "expression": body["type"] != "BlockStatement", "params": params, "body": body}),
    )
}

pub fn call(kind: &str, callee: Value, arguments: Vec<Value>) -> Value {
    node(kind, json!({"callee": callee, "arguments": arguments}))
}
