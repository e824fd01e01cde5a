//! Dispatch tests over the node kinds of the schema
//!
//! Each case registers a counting transform for a few kinds, walks a small
//! program and checks every transform fired once per occurrence of its kind
//! in the list.

mod support;

use std::cell::RefCell;
use std::collections::HashMap;

use hoistwalk_core::{Node, NodeKind, Transforms, walk};
use serde_json::{Value, json};

use support::*;

fn count_visits(tree: Node, kinds: &[&str]) -> HashMap<String, usize> {
    let counts = RefCell::new(HashMap::new());
    let mut transforms = Transforms::new();
    for &kind in kinds {
        let counts = &counts;
        transforms.insert(kind, move |_, _, _| {
            *counts.borrow_mut().entry(kind.to_string()).or_insert(0) += 1;
            Ok(None)
        });
    }
    walk(&transforms, None, Some(tree)).expect("walk should succeed");
    drop(transforms);
    counts.into_inner()
}

#[track_caller]
fn check(body: Vec<Value>, kinds: &[&str]) {
    let counts = count_visits(program(body), kinds);
    for kind in kinds {
        let expected = kinds.iter().filter(|k| *k == kind).count();
        let actual = counts.get(*kind).copied().unwrap_or(0);
        assert_eq!(actual, expected, "{kind} visited {actual} times");
    }
}

#[test]
fn assignment_expression() {
    // a=1
    check(
        vec![stmt(node("AssignmentExpression", json!({"operator": "=", "left": ident("a"), "right": lit(1)})))],
        &["Literal"],
    );
}

#[test]
fn assignment_pattern() {
    // [a={}]=1
    let target = array_pattern(vec![default(ident("a"), object(vec![]))]);
    check(
        vec![stmt(node("AssignmentExpression", json!({"operator": "=", "left": target, "right": lit(1)})))],
        &["ObjectExpression", "Identifier"],
    );
}

#[test]
fn array_expression() {
    check(vec![stmt(array(vec![ident("a")]))], &["Identifier"]);
}

#[test]
fn array_pattern_in_declarator() {
    // var [a=1]=[{}]
    check(
        vec![var(vec![(array_pattern(vec![default(ident("a"), lit(1))]), array(vec![object(vec![])]))])],
        &["Literal", "ObjectExpression"],
    );
}

#[test]
fn arrow_function_expression() {
    // (a=1)=>({})
    check(
        vec![stmt(arrow(vec![default(ident("a"), lit(1))], object(vec![])))],
        &["Literal", "ObjectExpression"],
    );
}

#[test]
fn block_statement() {
    check(vec![block(vec![stmt(ident("a"))])], &["Identifier"]);
}

#[test]
fn binary_expression() {
    check(
        vec![stmt(node("BinaryExpression", json!({"operator": "<", "left": ident("a"), "right": lit(1)})))],
        &["Identifier", "Literal"],
    );
}

#[test]
fn break_statement() {
    check(
        vec![node("WhileStatement", json!({"test": lit(true), "body": node("BreakStatement", json!({"label": null}))}))],
        &["BreakStatement"],
    );
}

#[test]
fn call_expression() {
    check(vec![stmt(call("CallExpression", ident("a"), vec![lit(1)]))], &["Identifier", "Literal"]);
}

#[test]
fn new_expression() {
    check(vec![stmt(call("NewExpression", ident("a"), vec![lit(1)]))], &["Identifier", "Literal"]);
}

#[test]
fn catch_clause() {
    // try{}catch(e){[]}
    check(
        vec![node(
            "TryStatement",
            json!({
                "block": block(vec![]),
                "handler": node("CatchClause", json!({"param": ident("e"), "body": block(vec![stmt(array(vec![]))])})),
                "finalizer": null
            }),
        )],
        &["Identifier", "ArrayExpression"],
    );
}

#[test]
fn class_declaration() {
    // class A extends 1 {}
    check(
        vec![node(
            "ClassDeclaration",
            json!({"id": ident("A"), "superClass": lit(1), "body": node("ClassBody", json!({"body": []}))}),
        )],
        &["Identifier", "Literal", "ClassBody"],
    );
}

#[test]
fn class_body_and_method_definition() {
    // class a {b(){1}}
    let method = node(
        "MethodDefinition",
        json!({
            "static": false,
            "computed": false,
            "key": ident("b"),
            "kind": "method",
            "value": function("FunctionExpression", None, vec![], block(vec![stmt(lit(1))]))
        }),
    );
    check(
        vec![node(
            "ClassDeclaration",
            json!({"id": ident("a"), "superClass": null, "body": node("ClassBody", json!({"body": [method]}))}),
        )],
        &["Literal"],
    );
}

#[test]
fn conditional_expression() {
    check(
        vec![stmt(node(
            "ConditionalExpression",
            json!({"test": lit(true), "consequent": array(vec![]), "alternate": object(vec![])}),
        ))],
        &["Literal", "ArrayExpression", "ObjectExpression"],
    );
}

#[test]
fn continue_statement() {
    let loop_with = |label: Value| {
        node(
            "WhileStatement",
            json!({"test": lit(true), "body": node("ContinueStatement", json!({"label": label}))}),
        )
    };
    check(vec![loop_with(Value::Null)], &["ContinueStatement"]);
    // a:while(true)continue a
    check(
        vec![node("LabeledStatement", json!({"label": ident("a"), "body": loop_with(ident("a"))}))],
        &["Identifier", "Identifier"],
    );
}

#[test]
fn debugger_statement() {
    check(vec![node("DebuggerStatement", json!({}))], &["DebuggerStatement"]);
}

#[test]
fn do_while_statement() {
    check(
        vec![node("DoWhileStatement", json!({"body": block(vec![stmt(lit(1))]), "test": array(vec![])}))],
        &["Literal", "ArrayExpression"],
    );
}

#[test]
fn export_default_declaration() {
    check(vec![node("ExportDefaultDeclaration", json!({"declaration": ident("a")}))], &["Identifier"]);
}

#[test]
fn export_named_declaration() {
    let specifier = node("ExportSpecifier", json!({"local": ident("a"), "exported": ident("a")}));
    check(
        vec![node("ExportNamedDeclaration", json!({"declaration": null, "specifiers": [specifier], "source": null}))],
        &["ExportSpecifier"],
    );
}

#[test]
fn export_specifier_walks_local_then_exported() {
    let specifier = node("ExportSpecifier", json!({"local": ident("a"), "exported": ident("b")}));
    check(
        vec![node("ExportNamedDeclaration", json!({"declaration": null, "specifiers": [specifier], "source": lit("./m")}))],
        &["Identifier", "Identifier", "Literal"],
    );
}

#[test]
fn expression_statement() {
    check(vec![stmt(ident("a"))], &["Identifier"]);
}

#[test]
fn for_statement() {
    // for (var i;{};this)[]
    check(
        vec![node(
            "ForStatement",
            json!({
                "init": var(vec![(ident("i"), Value::Null)]),
                "test": object(vec![]),
                "update": node("ThisExpression", json!({})),
                "body": stmt(array(vec![]))
            }),
        )],
        &["ArrayExpression", "ObjectExpression", "ThisExpression"],
    );
}

#[test]
fn for_in_and_for_of_statements() {
    for kind in ["ForInStatement", "ForOfStatement"] {
        check(
            vec![node(
                kind,
                json!({"left": var(vec![(ident("i"), Value::Null)]), "right": object(vec![]), "body": stmt(array(vec![]))}),
            )],
            &["ArrayExpression", "ObjectExpression", "Identifier"],
        );
    }
}

#[test]
fn function_declaration_and_expression() {
    // function a(b={}){[]}
    let declaration = function(
        "FunctionDeclaration",
        Some("a"),
        vec![default(ident("b"), object(vec![]))],
        block(vec![stmt(array(vec![]))]),
    );
    check(vec![declaration], &["ArrayExpression", "ObjectExpression"]);

    // (function a(b={}){[]})
    let expression = function(
        "FunctionExpression",
        Some("a"),
        vec![default(ident("b"), object(vec![]))],
        block(vec![stmt(array(vec![]))]),
    );
    check(vec![stmt(expression)], &["ArrayExpression", "ObjectExpression"]);
}

#[test]
fn function_name_and_parameters_are_walked() {
    let declaration = function(
        "FunctionDeclaration",
        Some("a"),
        vec![ident("b"), ident("c")],
        block(vec![]),
    );
    check(vec![declaration], &["Identifier", "Identifier", "Identifier"]);
}

#[test]
fn if_statement() {
    check(
        vec![node(
            "IfStatement",
            json!({
                "test": lit(true),
                "consequent": block(vec![stmt(array(vec![]))]),
                "alternate": block(vec![stmt(object(vec![]))])
            }),
        )],
        &["Literal", "ArrayExpression", "ObjectExpression"],
    );
}

#[test]
fn literal() {
    check(vec![stmt(lit(1))], &["Literal"]);
}

#[test]
fn labeled_statement() {
    check(
        vec![node("LabeledStatement", json!({"label": ident("a"), "body": block(vec![stmt(lit(1))])}))],
        &["Literal"],
    );
}

#[test]
fn logical_expression() {
    check(
        vec![stmt(node("LogicalExpression", json!({"operator": "&&", "left": ident("a"), "right": lit(1)})))],
        &["Literal", "Identifier"],
    );
}

#[test]
fn member_expression_walks_static_property() {
    // ({}).b
    check(
        vec![stmt(node(
            "MemberExpression",
            json!({"object": object(vec![]), "property": ident("b"), "computed": false, "optional": false}),
        ))],
        &["Identifier", "ObjectExpression"],
    );
}

#[test]
fn member_expression_walks_computed_property() {
    // a[b]
    check(
        vec![stmt(node(
            "MemberExpression",
            json!({"object": ident("a"), "property": ident("b"), "computed": true, "optional": false}),
        ))],
        &["Identifier", "Identifier"],
    );
}

#[test]
fn method_property() {
    // ({b(){1}})
    let method = node(
        "Property",
        json!({
            "method": true,
            "shorthand": false,
            "computed": false,
            "key": ident("b"),
            "kind": "init",
            "value": function("FunctionExpression", None, vec![], block(vec![stmt(lit(1))]))
        }),
    );
    check(vec![stmt(object(vec![method]))], &["Identifier", "Literal"]);
}

#[test]
fn object_expression_and_pattern() {
    check(vec![stmt(object(vec![prop(ident("a"), lit(1))]))], &["Property"]);
    // ({a}=1)
    check(
        vec![stmt(node(
            "AssignmentExpression",
            json!({"operator": "=", "left": object_pattern(vec![shorthand("a")]), "right": lit(1)}),
        ))],
        &["Property"],
    );
}

#[test]
fn property() {
    check(vec![stmt(object(vec![prop(ident("a"), lit(1))]))], &["Literal", "Identifier"]);
}

#[test]
fn rest_element() {
    // (...a)=>1
    check(vec![stmt(arrow(vec![rest(ident("a"))], lit(1)))], &["Identifier"]);
}

#[test]
fn return_statement() {
    check(
        vec![stmt(arrow(vec![], block(vec![node("ReturnStatement", json!({"argument": lit(1)}))])))],
        &["Literal"],
    );
}

#[test]
fn sequence_expression() {
    check(
        vec![stmt(node("SequenceExpression", json!({"expressions": [ident("a"), lit(1)]})))],
        &["Literal", "Identifier"],
    );
}

#[test]
fn spread_element() {
    check(vec![stmt(array(vec![node("SpreadElement", json!({"argument": ident("a")}))]))], &["Identifier"]);
}

#[test]
fn super_call() {
    // class A {constructor(){super()}}
    let constructor = node(
        "MethodDefinition",
        json!({
            "static": false,
            "computed": false,
            "key": ident("constructor"),
            "kind": "constructor",
            "value": function(
                "FunctionExpression",
                None,
                vec![],
                block(vec![stmt(call("CallExpression", node("Super", json!({})), vec![]))])
            )
        }),
    );
    check(
        vec![node(
            "ClassDeclaration",
            json!({"id": ident("A"), "superClass": null, "body": node("ClassBody", json!({"body": [constructor]}))}),
        )],
        &["Super"],
    );
}

#[test]
fn switch_statement_and_case() {
    // switch (true) {case {}: []}
    let switch = || {
        node(
            "SwitchStatement",
            json!({
                "discriminant": lit(true),
                "cases": [node("SwitchCase", json!({"test": object(vec![]), "consequent": [stmt(array(vec![]))]}))]
            }),
        )
    };
    check(vec![switch()], &["SwitchCase", "Literal"]);
    check(vec![switch()], &["ObjectExpression", "ArrayExpression"]);
}

#[test]
fn template_literal() {
    // `a${1}`
    let quasi = |raw: &str, tail: bool| {
        node("TemplateElement", json!({"value": {"raw": raw, "cooked": raw}, "tail": tail}))
    };
    check(
        vec![stmt(node(
            "TemplateLiteral",
            json!({"quasis": [quasi("a", false), quasi("", true)], "expressions": [lit(1)]}),
        ))],
        &["Literal"],
    );
}

#[test]
fn tagged_template_expression() {
    let template = node(
        "TemplateLiteral",
        json!({"quasis": [node("TemplateElement", json!({"value": {"raw": "x", "cooked": "x"}, "tail": true}))], "expressions": []}),
    );
    check(
        vec![stmt(node("TaggedTemplateExpression", json!({"tag": ident("html"), "quasi": template})))],
        &["Identifier", "TemplateElement"],
    );
}

#[test]
fn this_expression() {
    // (function(){this})
    check(
        vec![stmt(function(
            "FunctionExpression",
            None,
            vec![],
            block(vec![stmt(node("ThisExpression", json!({})))]),
        ))],
        &["ThisExpression"],
    );
}

#[test]
fn throw_statement() {
    check(vec![node("ThrowStatement", json!({"argument": lit(1)}))], &["Literal"]);
}

#[test]
fn try_statement() {
    // try{a}finally{1}
    check(
        vec![node(
            "TryStatement",
            json!({"block": block(vec![stmt(ident("a"))]), "handler": null, "finalizer": block(vec![stmt(lit(1))])}),
        )],
        &["Identifier", "Literal"],
    );
    // try{}catch(e){1}
    check(
        vec![node(
            "TryStatement",
            json!({
                "block": block(vec![]),
                "handler": node("CatchClause", json!({"param": ident("e"), "body": block(vec![stmt(lit(1))])})),
                "finalizer": null
            }),
        )],
        &["Identifier", "Literal"],
    );
}

#[test]
fn unary_and_update_expressions() {
    check(
        vec![stmt(node("UnaryExpression", json!({"operator": "~", "prefix": true, "argument": ident("a")})))],
        &["Identifier"],
    );
    check(
        vec![stmt(node("UpdateExpression", json!({"operator": "++", "prefix": false, "argument": ident("a")})))],
        &["Identifier"],
    );
}

#[test]
fn variable_declaration() {
    check(vec![var(vec![(ident("a"), lit(1))])], &["Identifier", "Literal"]);
    check(vec![var(vec![(ident("a"), lit(1)), (ident("b"), Value::Null)])], &["VariableDeclarator", "VariableDeclarator"]);
}

#[test]
fn while_statement() {
    check(vec![node("WhileStatement", json!({"test": lit(true), "body": stmt(ident("a"))}))], &["Identifier", "Literal"]);
}

#[test]
fn yield_expression() {
    // (function*(){yield 1})
    let generator = function(
        "FunctionExpression",
        None,
        vec![],
        block(vec![stmt(node("YieldExpression", json!({"delegate": false, "argument": lit(1)})))]),
    );
    check(vec![stmt(generator)], &["Literal"]);
}

#[test]
fn await_and_chain_expressions() {
    let chain = node(
        "ChainExpression",
        json!({"expression": node("MemberExpression", json!({"object": ident("a"), "property": ident("b"), "computed": false, "optional": true}))}),
    );
    check(
        vec![stmt(node("AwaitExpression", json!({"argument": chain})))],
        &["Identifier", "Identifier"],
    );
}

#[test]
fn import_declaration() {
    let specifiers = json!([
        node("ImportDefaultSpecifier", json!({"local": ident("d")})),
        node("ImportSpecifier", json!({"imported": ident("x"), "local": ident("y")})),
        node("ImportNamespaceSpecifier", json!({"local": ident("ns")}))
    ]);
    check(
        vec![node("ImportDeclaration", json!({"specifiers": specifiers, "source": lit("mod")}))],
        &["Identifier", "Identifier", "Identifier", "Identifier", "Literal"],
    );
}

#[test]
fn unknown_kinds_pass_through_untouched() {
    let element = node("JSXElement", json!({"openingElement": ident("div"), "children": [lit(1)]}));
    check(vec![stmt(element)], &["JSXElement"]);

    let element = node("JSXElement", json!({"openingElement": ident("div"), "children": [lit(1)]}));
    let counts = count_visits(program(vec![stmt(element)]), &["Identifier", "Literal"]);
    assert!(counts.is_empty());
}

#[test]
fn transform_intercepts_its_whole_subtree() {
    let body = vec![stmt(call(
        "CallExpression",
        ident("f"),
        vec![arrow(vec![ident("x")], array(vec![ident("x")]))],
    ))];
    let counts = count_visits(program(body), &["CallExpression", "Identifier", "ArrayExpression"]);

    assert_eq!(counts.get("CallExpression"), Some(&1));
    assert_eq!(counts.get("Identifier"), None);
    assert_eq!(counts.get("ArrayExpression"), None);
}

#[test]
fn children_are_visited_in_schema_order() {
    let order = RefCell::new(Vec::new());
    let transforms = Transforms::new().on(NodeKind::Identifier, |node, _, _| {
        order.borrow_mut().push(node.name().unwrap_or_default().to_string());
        Ok(Some(node))
    });
    // fields deliberately listed out of order in the document
    let tree = program(vec![
        node(
            "ForStatement",
            json!({"body": stmt(ident("body")), "update": ident("update"), "test": ident("test"), "init": ident("init")}),
        ),
        node("LabeledStatement", json!({"body": stmt(ident("labeled")), "label": ident("label")})),
        stmt(node(
            "TemplateLiteral",
            json!({"expressions": [ident("expr")], "quasis": [ident("quasi")]}),
        )),
    ]);

    walk(&transforms, None, Some(tree)).unwrap();

    assert_eq!(
        *order.borrow(),
        vec!["init", "test", "update", "body", "label", "labeled", "quasi", "expr"]
    );
}

#[test]
fn every_known_kind_walks_an_empty_instance() {
    let transforms = Transforms::new();
    for kind in NodeKind::known() {
        let mut fields = serde_json::Map::new();
        if let Some(hoistwalk_core::walk::Rule::Slots(slots)) = kind.rule() {
            for slot in slots {
                if slot.arity == hoistwalk_core::walk::Arity::List {
                    fields.insert(slot.name.to_string(), json!([]));
                }
            }
        }
        if kind.is_function() {
            fields.insert("params".to_string(), json!([]));
        }
        if kind == NodeKind::Program {
            fields.insert("body".to_string(), json!([]));
        }
        let instance = tree(node(kind.as_str(), Value::Object(fields)));

        let result = walk(&transforms, None, Some(instance.clone()))
            .unwrap_or_else(|e| panic!("{kind} failed: {e}"));
        assert_eq!(result, Some(instance), "{kind} should come back unchanged");
    }
}

#[test]
fn deeply_nested_documents_load_and_walk() {
    // a+a+...+a with 200 terms, decoded from text
    let mut chain = ident("a");
    for _ in 1..200 {
        chain = node("BinaryExpression", json!({"operator": "+", "left": chain, "right": ident("a")}));
    }
    let source = serde_json::to_string(&node("Program", json!({"body": [stmt(chain)]}))).unwrap();

    let tree = Node::from_json(&source).expect("deep tree should load");
    let counts = count_visits(tree, &["Identifier", "BinaryExpression"]);

    assert_eq!(counts.get("BinaryExpression"), Some(&1));

    let tree = Node::from_json(&source).unwrap();
    let counts = count_visits(tree, &["Identifier"]);
    assert_eq!(counts.get("Identifier"), Some(&200));
}
