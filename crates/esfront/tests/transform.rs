//! Transform entry point tests
//!
//! Parse, rewrite and print end to end.

use esfront::ast::{Expression, Statement};
use esfront::*;

fn only_expression(program: &Program) -> &Expression {
    match &program.body[..] {
        [statement] => match &statement.item {
            Statement::Expression { expression } => &expression.item,
            other => panic!("unexpected {:?}", other),
        },
        body => panic!("expected one statement, got {}", body.len()),
    }
}

// ============================================================================
// LITERAL CASES
// ============================================================================

#[test]
fn test_math_pow_passes_through() {
    assert_eq!(transform("Math.pow(2, 2)", true).unwrap(), "Math.pow(2,2);");
}

#[test]
fn test_exponentiation_minified() {
    assert_eq!(transform("2**2", true).unwrap(), "Math.pow(2,2);");
}

#[test]
fn test_exponentiation_pretty() {
    assert_eq!(transform("a ** b", false).unwrap(), "Math.pow(a, b);");
    assert_eq!(transform("x **= y + 1", false).unwrap(), "x = Math.pow(x, y + 1);");
}

// ============================================================================
// REWRITE PROPERTIES
// ============================================================================

#[test]
fn test_output_reparses_as_call() {
    let output = transform("a ** b", false).unwrap();
    let program = parse_program(&output).unwrap();
    match only_expression(&program) {
        Expression::Call { callee, arguments } => {
            match &callee.item {
                Expression::Member { object, property } => {
                    assert!(matches!(&object.item, Expression::Identifier(name) if &**name == "Math"));
                    assert_eq!(&*property.item, "pow");
                }
                other => panic!("unexpected callee {:?}", other),
            }
            let names: Vec<_> = arguments
                .iter()
                .map(|a| match &a.item {
                    Expression::Identifier(name) => name.to_string(),
                    other => panic!("unexpected argument {:?}", other),
                })
                .collect();
            assert_eq!(names, ["a", "b"]);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_operands_keep_their_grouping() {
    assert_eq!(transform("(a + b) ** (c - d)", true).unwrap(), "Math.pow(a+b,c-d);");
    assert_eq!(transform("-(a ** b)", true).unwrap(), "-Math.pow(a,b);");
    assert_eq!(transform("a ** b ** c", true).unwrap(), "Math.pow(a,Math.pow(b,c));");
    assert_eq!(transform("x * y ** 2", true).unwrap(), "x*Math.pow(y,2);");
}

#[test]
fn test_nested_positions() {
    let source = "function f(a = 2 ** 3) { return [a ** 2, { k: g(a ** 3) }]; }";
    let output = transform(source, true).unwrap();
    assert_eq!(output, "function f(a=Math.pow(2,3)){return[Math.pow(a,2),{k:g(Math.pow(a,3))}];}");
}

#[test]
fn test_transform_is_idempotent() {
    let source = "let v = (a ** b) * c ** d; v **= 2;";
    let once = transform(source, false).unwrap();
    let twice = transform(&once, false).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_no_transform_keeps_exponentiation() {
    let options = TransformOptions {
        style: Style::Minified,
        settings: Settings::no_transform(),
    };
    assert_eq!(transform_with("a ** b", &options).unwrap(), "a**b;");
    assert_eq!(transform_with("(-a) ** b", &options).unwrap(), "(-a)**b;");
}

#[test]
fn test_es5_lowers_arrows() {
    let options = TransformOptions {
        style: Style::Minified,
        settings: Settings::target_es5(),
    };
    let cases = [
        ("f = x => x * 2", "f=function(x){return x*2;};"),
        ("x => x", "(function(x){return x;});"),
        ("g(async () => { await h(); })", "g(async function(){await h();});"),
        ("f = (a = 1) => () => a ** 2", "f=function(a=1){return function(){return Math.pow(a,2);};};"),
        ("f = () => ({ a: 1 })", "f=function(){return{a:1};};"),
    ];
    for (source, expected) in cases {
        assert_eq!(transform_with(source, &options).unwrap(), expected, "{}", source);
    }
}

#[test]
fn test_es2015_keeps_arrows() {
    assert_eq!(transform("f = x => x ** 2", true).unwrap(), "f=(x)=>Math.pow(x,2);");
}

#[test]
fn test_exponent_assignment_repeats_target() {
    // The target is read and written as written; no temporaries
    assert_eq!(transform("a[i++] **= 2", true).unwrap(), "a[i++]=Math.pow(a[i++],2);");
}

#[test]
fn test_syntax_errors_surface() {
    let err = transform("function function () {}", false).unwrap_err();
    assert!(err.message.contains("Unexpected token"));
    assert!(transform("2 **", true).is_err());
}
