//! ESTree export tests
//!
//! Documents are compared as `serde_json::Value` so key order inside
//! nested objects does not matter.

use esfront::*;
use serde_json::{json, Value};

fn document(source: &str) -> Value {
    serde_json::from_str(&ast(source).unwrap()).unwrap()
}

fn walk_spans(node: &Value, spans: &mut Vec<(String, u64, u64)>) {
    match node {
        Value::Object(map) => {
            if let (Some(kind), Some(start), Some(end)) = (
                map.get("type").and_then(Value::as_str),
                map.get("start").and_then(Value::as_u64),
                map.get("end").and_then(Value::as_u64),
            ) {
                spans.push((kind.to_string(), start, end));
            }
            for value in map.values() {
                walk_spans(value, spans);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_spans(item, spans);
            }
        }
        _ => {}
    }
}

// ============================================================================
// FIXTURE
// ============================================================================

#[test]
fn test_function_expression_fixture() {
    let source = "const double = function (a, b = 2) { return a * 2}";
    let expected = json!({
        "type": "Program",
        "body": [{
            "type": "VariableDeclaration",
            "declarations": [{
                "type": "VariableDeclarator",
                "id": { "type": "Identifier", "name": "double", "start": 6, "end": 12 },
                "init": {
                    "type": "FunctionExpression",
                    "id": null,
                    "expression": false,
                    "generator": false,
                    "async": false,
                    "params": [
                        { "type": "Identifier", "name": "a", "start": 25, "end": 26 },
                        {
                            "type": "AssignmentPattern",
                            "left": { "type": "Identifier", "name": "b", "start": 28, "end": 29 },
                            "right": { "type": "Literal", "value": "2", "raw": "2", "start": 32, "end": 33 },
                            "start": 28,
                            "end": 33
                        }
                    ],
                    "body": {
                        "type": "BlockStatement",
                        "body": [{
                            "type": "ReturnStatement",
                            "argument": {
                                "type": "BinaryExpression",
                                "left": { "type": "Identifier", "name": "a", "start": 44, "end": 45 },
                                "operator": "*",
                                "right": { "type": "Literal", "value": "2", "raw": "2", "start": 48, "end": 49 },
                                "start": 44,
                                "end": 49
                            },
                            "start": 37,
                            "end": 49
                        }],
                        "start": 35,
                        "end": 50
                    },
                    "start": 15,
                    "end": 50
                },
                "start": 6,
                "end": 50
            }],
            "kind": "const",
            "start": 0,
            "end": 50
        }],
        "sourceType": "script",
        "start": 0,
        "end": 50
    });
    assert_eq!(document(source), expected);
}

#[test]
fn test_no_container_collapses_to_zero() {
    let source = "const double = function (a, b = 2) { return a * 2}";
    let mut spans = Vec::new();
    walk_spans(&document(source), &mut spans);
    assert_eq!(spans.len(), 14);
    for (kind, start, end) in &spans {
        assert!(end > start, "{} has an empty span", kind);
    }
}

#[test]
fn test_legacy_container_spans_opt_in() {
    let source = "const double = function (a, b = 2) { return a * 2}";
    let options = ExportOptions { legacy_container_spans: true, ..ExportOptions::default() };
    let legacy: Value = serde_json::from_str(&ast_with(source, &options).unwrap()).unwrap();

    let mut spans = Vec::new();
    walk_spans(&legacy, &mut spans);
    for (kind, start, end) in &spans {
        let zeroed = matches!(
            kind.as_str(),
            "Program" | "VariableDeclaration" | "VariableDeclarator" | "FunctionExpression" | "BlockStatement" | "ReturnStatement"
        );
        assert_eq!(zeroed, (*start, *end) == (0, 0), "{} {}..{}", kind, start, end);
    }
}

// ============================================================================
// NODE COVERAGE
// ============================================================================

#[test]
fn test_statement_types() {
    let source = "
        label: for (const x of xs) { if (x) continue label; else break; }
        for (var k in o) ;
        for (let i = 0; i < 10; i++) {}
        while (a) b();
        do { a-- } while (a > 0)
        switch (x) { case 1: y(); break; default: z() }
        try { f() } catch (e) { g() } finally { h() }
        function* gen() { yield* other(); }
        class A extends B {}
        throw err;
        debugger;
        ;
    ";
    let document = document(source);
    let types: Vec<&str> = document["body"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, [
        "LabeledStatement",
        "ForInStatement",
        "ForStatement",
        "WhileStatement",
        "DoWhileStatement",
        "SwitchStatement",
        "TryStatement",
        "FunctionDeclaration",
        "ClassDeclaration",
        "ThrowStatement",
        "DebuggerStatement",
        "EmptyStatement",
    ]);
    assert_eq!(document["body"][0]["body"]["type"], "ForOfStatement");
    assert_eq!(document["body"][5]["cases"][1]["test"], Value::Null);
    assert_eq!(document["body"][6]["handler"]["type"], "CatchClause");
    assert_eq!(document["body"][7]["generator"], json!(true));
}

#[test]
fn test_expression_types() {
    let cases = [
        ("this", "ThisExpression"),
        ("a ? b : c", "ConditionalExpression"),
        ("a, b", "SequenceExpression"),
        ("a && b", "LogicalExpression"),
        ("a = b", "AssignmentExpression"),
        ("-a", "UnaryExpression"),
        ("a++", "UpdateExpression"),
        ("new A()", "NewExpression"),
        ("[a, ...b]", "ArrayExpression"),
        ("(x) => x", "ArrowFunctionExpression"),
        ("(class {})", "ClassExpression"),
        ("tag`t`", "TaggedTemplateExpression"),
    ];
    for (source, expected) in cases {
        assert_eq!(document(source)["body"][0]["expression"]["type"], expected, "{}", source);
    }
}

#[test]
fn test_patterns() {
    let document = document("let [a, , ...b] = c, { d, e: [f] = g, ...h } = i");
    let declarations = &document["body"][0]["declarations"];
    let array = &declarations[0]["id"];
    assert_eq!(array["type"], "ArrayPattern");
    assert_eq!(array["elements"][1], Value::Null);
    assert_eq!(array["elements"][2]["type"], "RestElement");

    let object = &declarations[1]["id"];
    assert_eq!(object["type"], "ObjectPattern");
    assert_eq!(object["properties"][0]["shorthand"], json!(true));
    assert_eq!(object["properties"][1]["value"]["type"], "AssignmentPattern");
    assert_eq!(object["properties"][2]["type"], "RestElement");
}

#[test]
fn test_async_and_await() {
    let document = document("async function f() { await g(); }");
    let function = &document["body"][0];
    assert_eq!(function["async"], json!(true));
    assert_eq!(function["body"]["body"][0]["expression"]["type"], "AwaitExpression");
}

#[test]
fn test_syntax_error_propagates() {
    let err = ast("let = ;").unwrap_err();
    assert!(err.message.starts_with("Unexpected token"));
}
