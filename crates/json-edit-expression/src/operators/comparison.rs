use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{Arity, JsValue, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

fn operands2(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<(JsValue, JsValue), ExprError> {
    let left = crate::evaluate(&expr[1], ctx)?;
    let right = crate::evaluate(&expr[2], ctx)?;
    Ok((left, right))
}

fn eq_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let (left, right) = operands2(expr, ctx)?;
    Ok(JsValue::from(util::js_equal(&left, &right)))
}

fn ne_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let (left, right) = operands2(expr, ctx)?;
    Ok(JsValue::from(!util::js_equal(&left, &right)))
}

fn gt_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let (left, right) = operands2(expr, ctx)?;
    Ok(JsValue::from(util::cmp(&left, &right) == Ordering::Greater))
}

fn ge_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let (left, right) = operands2(expr, ctx)?;
    Ok(JsValue::from(util::cmp(&left, &right) != Ordering::Less))
}

fn lt_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let (left, right) = operands2(expr, ctx)?;
    Ok(JsValue::from(util::cmp(&left, &right) == Ordering::Less))
}

fn le_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let (left, right) = operands2(expr, ctx)?;
    Ok(JsValue::from(util::cmp(&left, &right) != Ordering::Greater))
}

fn cmp_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let (left, right) = operands2(expr, ctx)?;
    let n: i64 = match util::cmp(&left, &right) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    };
    Ok(JsValue::from(n))
}

fn between_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let val = crate::evaluate(&expr[1], ctx)?;
    let min = crate::evaluate(&expr[2], ctx)?;
    let max = crate::evaluate(&expr[3], ctx)?;
    let inside = util::cmp(&val, &min) != Ordering::Less && util::cmp(&val, &max) != Ordering::Greater;
    Ok(JsValue::from(inside))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition { name: "==", aliases: &["eq"], arity: Arity::Fixed(2), eval_fn: eq_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "!=", aliases: &["ne"], arity: Arity::Fixed(2), eval_fn: ne_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: ">", aliases: &["gt"], arity: Arity::Fixed(2), eval_fn: gt_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: ">=", aliases: &["ge"], arity: Arity::Fixed(2), eval_fn: ge_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "<", aliases: &["lt"], arity: Arity::Fixed(2), eval_fn: lt_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "<=", aliases: &["le"], arity: Arity::Fixed(2), eval_fn: le_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "cmp", aliases: &[], arity: Arity::Fixed(2), eval_fn: cmp_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "=><=", aliases: &["between"], arity: Arity::Fixed(3), eval_fn: between_eval, check_fn: None }),
    ]
}
