use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{Arity, JsValue, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn member_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let container = crate::evaluate(&expr[1], ctx)?;
    let index = crate::evaluate(&expr[2], ctx)?;
    util::member(&container, &index)
}

fn in_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let arr = crate::evaluate(&expr[1], ctx)?;
    let val = crate::evaluate(&expr[2], ctx)?;
    Ok(JsValue::from(util::is_in_arr(&arr, &val)?))
}

fn keys_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let operand = crate::evaluate(&expr[1], ctx)?;
    util::keys(&operand)
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition { name: "[]", aliases: &["member"], arity: Arity::Fixed(2), eval_fn: member_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "in", aliases: &[], arity: Arity::Fixed(2), eval_fn: in_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "keys", aliases: &[], arity: Arity::Fixed(1), eval_fn: keys_eval, check_fn: None }),
    ]
}
