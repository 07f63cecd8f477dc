//! Scope lookups.
//!
//! `["$", "/value/name"]` reads from the evaluation scope by JSON Pointer;
//! `""` reads the whole scope. A missing value is an error unless a
//! default is given as the second operand.

use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{Arity, JsValue, OperatorDefinition};
use json_edit_pointer::parse_json_pointer;
use serde_json::Value;
use std::sync::Arc;

fn resolve_var(ctx: &EvalCtx<'_>, pointer_val: &JsValue) -> Result<(String, JsValue), ExprError> {
    let pointer = match pointer_val {
        JsValue::Json(Value::String(s)) => s.clone(),
        _ => return Err(ExprError::VarnameMustBeString),
    };
    let path = parse_json_pointer(&pointer).map_err(|_| ExprError::InvalidPointer(pointer.clone()))?;
    let value = ctx.scope.lookup(&path);
    Ok((pointer, value))
}

fn get_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let pointer_val = crate::evaluate(&expr[1], ctx)?;
    let (pointer, value) = resolve_var(ctx, &pointer_val)?;
    if !value.is_undefined() {
        return Ok(value);
    }
    if expr.len() < 3 {
        return Err(ExprError::NotFound(pointer));
    }
    crate::evaluate(&expr[2], ctx)
}

fn defined_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let pointer_val = crate::evaluate(&expr[1], ctx)?;
    let (_, value) = resolve_var(ctx, &pointer_val)?;
    Ok(JsValue::from(!value.is_undefined()))
}

fn check_pointer(expr: &[Value]) -> Result<(), ExprError> {
    if let Value::String(pointer) = &expr[1] {
        parse_json_pointer(pointer).map_err(|_| ExprError::InvalidPointer(pointer.clone()))?;
    }
    Ok(())
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "$",
            aliases: &["get"],
            arity: Arity::Range(1, Some(2)),
            eval_fn: get_eval,
            check_fn: Some(check_pointer),
        }),
        Arc::new(OperatorDefinition {
            name: "$?",
            aliases: &["get?"],
            arity: Arity::Fixed(1),
            eval_fn: defined_eval,
            check_fn: Some(check_pointer),
        }),
    ]
}
