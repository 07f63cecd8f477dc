//! Integration tests for expression evaluation against a JSON scope.

use json_edit_expression::{evaluate, operators_map, EvalCtx, ExprError, JsValue};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;

fn run(expression: &Value, scope: &Value) -> Result<JsValue, ExprError> {
    let ops = Arc::new(operators_map());
    let ctx = EvalCtx::new(scope, ops);
    evaluate(expression, &ctx)
}

fn check(expression: Value, expected: Value, scope: Value) {
    let result = run(&expression, &scope)
        .unwrap_or_else(|e| panic!("evaluate({}) failed: {}", expression, e));
    assert_eq!(result, JsValue::Json(expected), "expression: {}", expression);
}

fn check_err(expression: Value, scope: Value) -> String {
    run(&expression, &scope)
        .err()
        .unwrap_or_else(|| panic!("expected error for {}", expression))
        .to_string()
}

// ----------------------------------------------------------------- Input

#[test]
fn test_get_reads_scope_by_pointer() {
    let scope = json!({"key": "id", "value": {"name": "Bret"}, "level": 1});
    check(json!(["$", "/key"]), json!("id"), scope.clone());
    check(json!(["get", "/value/name"]), json!("Bret"), scope.clone());
    check(json!(["$", ""]), scope.clone(), scope);
}

#[test]
fn test_get_missing_without_default_fails() {
    let err = check_err(json!(["$", "/nope"]), json!({}));
    assert!(err.contains("NOT_FOUND"), "got: {}", err);
}

#[test]
fn test_get_missing_with_default() {
    check(json!(["$", "/value/publisher", ""]), json!(""), json!({"value": {}}));
}

#[test]
fn test_defined() {
    let scope = json!({"parentValue": null});
    check(json!(["$?", "/parentValue"]), json!(true), scope.clone());
    check(json!(["get?", "/size"]), json!(false), scope);
}

// ----------------------------------------------------------------- Comparison

#[test]
fn test_equality_ignores_number_representation() {
    check(json!(["==", ["$", "/level"], 1.0]), json!(true), json!({"level": 1}));
    check(json!(["!=", 1, 2]), json!(true), json!(null));
}

#[test]
fn test_ordering() {
    check(json!([">", 3, 2]), json!(true), json!(null));
    check(json!(["<=", 2, 2]), json!(true), json!(null));
    check(json!(["<", "a", "b"]), json!(true), json!(null));
    check(json!(["cmp", 1, 2]), json!(-1), json!(null));
    check(json!(["between", 5, 1, 5]), json!(true), json!(null));
}

// ----------------------------------------------------------------- Logical

#[test]
fn test_logical_short_circuit() {
    // the `throw` branch must never run
    check(json!(["&&", false, ["throw", "boom"]]), json!(false), json!(null));
    check(json!(["||", true, ["throw", "boom"]]), json!(true), json!(null));
    check(json!(["!", ["arr?", ["$", "/value"]]]), json!(false), json!({"value": ["a", "b"]}));
}

#[test]
fn test_and_returns_last_operand() {
    check(json!(["and", 1, "x"]), json!("x"), json!(null));
}

// ----------------------------------------------------------------- Types

#[test]
fn test_type_checks() {
    let scope = json!({"value": {"x": 1}});
    check(json!(["type", ["$", "/value"]]), json!("object"), scope.clone());
    check(json!(["obj?", ["$", "/value"]]), json!(true), scope.clone());
    check(json!(["arr?", ["$", "/value"]]), json!(false), scope.clone());
    check(json!(["len", ["$", "/value"]]), json!(1), scope);
    check(json!(["nil?", null]), json!(true), json!(null));
}

// ----------------------------------------------------------------- Containers and strings

#[test]
fn test_in_list() {
    let scope = json!({"key": "styles"});
    check(
        json!(["in", [["displayName", "fragments", "styles"]], ["$", "/key"]]),
        json!(true),
        scope,
    );
    let err = check_err(json!(["in", "abc", "a"]), json!(null));
    assert_eq!(err, "NOT_ARRAY");
}

#[test]
fn test_member_and_keys() {
    check(json!(["[]", [{"a": 1}], "a"]), json!(1), json!(null));
    check(json!(["keys", [{"a": 1, "b": 2}]]), json!(["a", "b"]), json!(null));
}

#[test]
fn test_string_ops() {
    let scope = json!({"value": "https://example.com/logo.png"});
    check(
        json!(["&&", ["starts", ["$", "/value"], "http"], ["ends", ["$", "/value"], ".png"]]),
        json!(true),
        scope.clone(),
    );
    check(json!(["contains", ["$", "/value"], "example"]), json!(true), scope.clone());
    check(json!(["matches", ["$", "/value"], "^https?://"]), json!(true), scope);
    check(json!([".", 3, " ", "names"]), json!("3 names"), json!(null));
}

// ----------------------------------------------------------------- Branching

#[test]
fn test_if_builds_structured_defaults() {
    let expr = json!(["?", ["==", ["$", "/level"], 0], [{"name": "New User"}], "New Value"]);
    check(expr.clone(), json!({"name": "New User"}), json!({"level": 0}));
    check(expr, json!("New Value"), json!({"level": 2}));
}

#[test]
fn test_throw() {
    assert_eq!(check_err(json!(["throw", "nope"]), json!(null)), "nope");
}

#[test]
fn test_unknown_operator() {
    let err = check_err(json!(["frobnicate", 1, 2]), json!(null));
    assert!(err.starts_with("Unknown expression"), "got: {}", err);
}

proptest! {
    #[test]
    fn prop_literals_evaluate_to_themselves(n in any::<i64>(), s in ".*") {
        let scope = json!(null);
        prop_assert_eq!(run(&json!(n), &scope).unwrap(), JsValue::Json(json!(n)));
        prop_assert_eq!(run(&json!(s.clone()), &scope).unwrap(), JsValue::Json(json!(s)));
    }

    #[test]
    fn prop_not_not_is_bool(n in any::<i64>()) {
        let scope = json!(null);
        let expected = n != 0;
        prop_assert_eq!(run(&json!(["!", ["!", n]]), &scope).unwrap(), JsValue::from(expected));
    }
}
