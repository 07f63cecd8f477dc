use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{assert_arity, JsValue, OperatorMap};
use serde_json::Value;

fn unknown(expr: &Value) -> ExprError {
    ExprError::UnknownExpression(serde_json::to_string(expr).unwrap_or_default())
}

/// Evaluates a JSON expression against an execution context.
///
/// - Non-array values are returned as literals.
/// - Single-element arrays `[x]` return `x` as a literal.
/// - Multi-element arrays `[operator, ...operands]` dispatch to the matching operator.
pub fn evaluate(expr: &Value, ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    match expr {
        Value::Array(arr) => {
            if arr.is_empty() {
                return Ok(JsValue::Json(Value::Array(vec![])));
            }
            if arr.len() == 1 {
                return Ok(JsValue::Json(arr[0].clone()));
            }
            let op_key = match &arr[0] {
                Value::String(s) => s.as_str(),
                _ => return Err(unknown(expr)),
            };
            let def = ctx.operators.get(op_key).ok_or_else(|| unknown(expr))?;
            assert_arity(def.name, &def.arity, arr.len())?;
            (def.eval_fn)(arr, ctx)
        }
        other => Ok(JsValue::Json(other.clone())),
    }
}

/// Checks operator names, arities and literal operands of an expression
/// tree without evaluating it.
pub fn validate(expr: &Value, operators: &OperatorMap) -> Result<(), ExprError> {
    let arr = match expr {
        Value::Array(arr) if arr.len() > 1 => arr,
        _ => return Ok(()),
    };
    let op_key = match &arr[0] {
        Value::String(s) => s.as_str(),
        _ => return Err(unknown(expr)),
    };
    let def = operators.get(op_key).ok_or_else(|| unknown(expr))?;
    assert_arity(def.name, &def.arity, arr.len())?;
    if let Some(check) = def.check_fn {
        check(arr)?;
    }
    for operand in &arr[1..] {
        validate(operand, operators)?;
    }
    Ok(())
}
