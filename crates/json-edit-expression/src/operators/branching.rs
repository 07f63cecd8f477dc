use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{Arity, JsValue, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn if_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let condition = crate::evaluate(&expr[1], ctx)?;
    if util::is_truthy(&condition) {
        crate::evaluate(&expr[2], ctx)
    } else {
        crate::evaluate(&expr[3], ctx)
    }
}

fn throw_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let val = crate::evaluate(&expr[1], ctx)?;
    Err(ExprError::Thrown(util::str_val(&val)))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition { name: "?", aliases: &["if"], arity: Arity::Fixed(3), eval_fn: if_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "throw", aliases: &[], arity: Arity::Fixed(1), eval_fn: throw_eval, check_fn: None }),
    ]
}
