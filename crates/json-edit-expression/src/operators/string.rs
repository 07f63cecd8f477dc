use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::types::{Arity, JsValue, OperatorDefinition};
use crate::util;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Compiled `matches` patterns, shared by every evaluation in the process.
fn patterns() -> &'static Mutex<HashMap<String, Regex>> {
    static PATTERNS: OnceLock<Mutex<HashMap<String, Regex>>> = OnceLock::new();
    PATTERNS.get_or_init(|| Mutex::new(HashMap::new()))
}

fn cached_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut cache = patterns().lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern.to_string(), re.clone());
    Ok(re)
}

fn cat_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let mut result = String::new();
    for e in &expr[1..] {
        let val = crate::evaluate(e, ctx)?;
        result.push_str(&util::str_val(&val));
    }
    Ok(JsValue::from(result))
}

fn contains_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let outer = crate::evaluate(&expr[1], ctx)?;
    let inner = crate::evaluate(&expr[2], ctx)?;
    Ok(JsValue::from(util::contains(&outer, &inner)))
}

fn starts_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let outer = crate::evaluate(&expr[1], ctx)?;
    let inner = crate::evaluate(&expr[2], ctx)?;
    Ok(JsValue::from(util::starts(&outer, &inner)))
}

fn ends_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let outer = crate::evaluate(&expr[1], ctx)?;
    let inner = crate::evaluate(&expr[2], ctx)?;
    Ok(JsValue::from(util::ends(&outer, &inner)))
}

fn compile_pattern(expr: &[Value]) -> Result<Regex, ExprError> {
    let pattern = match util::as_literal(&expr[2]) {
        Ok(Value::String(s)) => s,
        _ => {
            return Err(ExprError::InvalidPattern {
                pattern: expr[2].to_string(),
                message: "\"matches\" second argument should be a regular expression string."
                    .to_string(),
            })
        }
    };
    cached_regex(pattern).map_err(|e| ExprError::InvalidPattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })
}

fn matches_eval(expr: &[Value], ctx: &EvalCtx<'_>) -> Result<JsValue, ExprError> {
    let re = compile_pattern(expr)?;
    let subject = crate::evaluate(&expr[1], ctx)?;
    Ok(JsValue::from(re.is_match(&util::str_val(&subject))))
}

fn check_matches(expr: &[Value]) -> Result<(), ExprError> {
    compile_pattern(expr).map(|_| ())
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition { name: ".", aliases: &["cat"], arity: Arity::Variadic, eval_fn: cat_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "contains", aliases: &[], arity: Arity::Fixed(2), eval_fn: contains_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "starts", aliases: &[], arity: Arity::Fixed(2), eval_fn: starts_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "ends", aliases: &[], arity: Arity::Fixed(2), eval_fn: ends_eval, check_fn: None }),
        Arc::new(OperatorDefinition { name: "matches", aliases: &[], arity: Arity::Fixed(2), eval_fn: matches_eval, check_fn: Some(check_matches) }),
    ]
}
