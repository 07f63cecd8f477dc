use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{Arity, JsValue, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn type_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let val = crate::evaluate(&expr[1], ctx)?;
    Ok(JsValue::from(util::type_name(&val)))
}

fn bool_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let val = crate::evaluate(&expr[1], ctx)?;
    Ok(JsValue::from(util::is_truthy(&val)))
}

fn num_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let val = crate::evaluate(&expr[1], ctx)?;
    Ok(util::f64_to_jsval(util::num(&val)))
}

fn str_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let val = crate::evaluate(&expr[1], ctx)?;
    Ok(JsValue::from(util::str_val(&val)))
}

fn len_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let val = crate::evaluate(&expr[1], ctx)?;
    Ok(util::len(&val))
}

fn is_type(expr: &[Value], ctx: &EvalCtx<'_>, name: &str) -> Result<JsValue, ExprError> {
    let val = crate::evaluate(&expr[1], ctx)?;
    Ok(JsValue::from(util::type_name(&val) == name))
}

fn und_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    is_type(expr, ctx, "undefined")
}

fn nil_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    is_type(expr, ctx, "null")
}

fn bool_q_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    is_type(expr, ctx, "boolean")
}

fn num_q_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    is_type(expr, ctx, "number")
}

fn str_q_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    is_type(expr, ctx, "string")
}

fn arr_q_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    is_type(expr, ctx, "array")
}

fn obj_q_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    is_type(expr, ctx, "object")
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition { name: "type", aliases: &[], arity: Arity::Fixed(1), eval_fn: type_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "bool", aliases: &[], arity: Arity::Fixed(1), eval_fn: bool_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "num", aliases: &[], arity: Arity::Fixed(1), eval_fn: num_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "str", aliases: &[], arity: Arity::Fixed(1), eval_fn: str_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "len", aliases: &[], arity: Arity::Fixed(1), eval_fn: len_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "und?", aliases: &[], arity: Arity::Fixed(1), eval_fn: und_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "nil?", aliases: &[], arity: Arity::Fixed(1), eval_fn: nil_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "bool?", aliases: &[], arity: Arity::Fixed(1), eval_fn: bool_q_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "num?", aliases: &[], arity: Arity::Fixed(1), eval_fn: num_q_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "str?", aliases: &[], arity: Arity::Fixed(1), eval_fn: str_q_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "arr?", aliases: &[], arity: Arity::Fixed(1), eval_fn: arr_q_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "obj?", aliases: &[], arity: Arity::Fixed(1), eval_fn: obj_q_eval, check_fn: None }),
    ]
}
