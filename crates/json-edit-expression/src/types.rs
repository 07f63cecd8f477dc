use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// An evaluation result: any JSON value, or `undefined` for lookups that
/// found nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Undefined,
    Json(Value),
}

impl JsValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    /// Converts to JSON, mapping `undefined` to `None`.
    pub fn into_json(self) -> Option<Value> {
        match self {
            JsValue::Undefined => None,
            JsValue::Json(v) => Some(v),
        }
    }
}

impl From<Value> for JsValue {
    fn from(v: Value) -> Self {
        JsValue::Json(v)
    }
}

impl From<bool> for JsValue {
    fn from(b: bool) -> Self {
        JsValue::Json(Value::Bool(b))
    }
}

impl From<i64> for JsValue {
    fn from(n: i64) -> Self {
        JsValue::Json(Value::Number(serde_json::Number::from(n)))
    }
}

impl From<&str> for JsValue {
    fn from(s: &str) -> Self {
        JsValue::Json(Value::String(s.to_string()))
    }
}

impl From<String> for JsValue {
    fn from(s: String) -> Self {
        JsValue::Json(Value::String(s))
    }
}

/// Operator arity.
#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    /// Exactly `n` operands.
    Fixed(usize),
    /// At least two operands.
    Variadic,
    /// Between `min` and `max` operands. `None` for max = unlimited.
    Range(usize, Option<usize>),
}

/// Operator evaluation function. `expr[0]` is the operator name.
pub type EvalFn = for<'a> fn(&[Value], &EvalCtx<'a>) -> Result<JsValue, ExprError>;

/// Hook run by [`crate::validate`] on top of the arity check, for operators
/// whose operands must be literals.
pub type CheckFn = fn(&[Value]) -> Result<(), ExprError>;

pub struct OperatorDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
    pub eval_fn: EvalFn,
    pub check_fn: Option<CheckFn>,
}

/// Map of operator name/alias -> definition.
pub type OperatorMap = HashMap<String, Arc<OperatorDefinition>>;

/// Asserts that an expression has the correct arity.
pub fn assert_arity(operator: &str, arity: &Arity, expr_len: usize) -> Result<(), ExprError> {
    let operands = expr_len.saturating_sub(1);
    match arity {
        Arity::Fixed(n) if operands != *n => Err(ExprError::ArityError(format!(
            "\"{operator}\" operator expects {n} operands."
        ))),
        Arity::Variadic if operands < 2 => Err(ExprError::ArityError(format!(
            "\"{operator}\" operator expects at least two operands."
        ))),
        Arity::Range(min, _) if operands < *min => Err(ExprError::ArityError(format!(
            "\"{operator}\" operator expects at least {min} operands."
        ))),
        Arity::Range(_, Some(max)) if operands > *max => Err(ExprError::ArityError(format!(
            "\"{operator}\" operator expects at most {max} operands."
        ))),
        _ => Ok(()),
    }
}

/// Builds an `OperatorMap` from a list of operator definitions.
pub fn operators_to_map(operators: Vec<Arc<OperatorDefinition>>) -> OperatorMap {
    let mut map = HashMap::new();
    for op in operators {
        map.insert(op.name.to_string(), Arc::clone(&op));
        for alias in op.aliases {
            map.insert(alias.to_string(), Arc::clone(&op));
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_arity() {
        assert!(assert_arity("!", &Arity::Fixed(1), 2).is_ok());
        assert!(assert_arity("!", &Arity::Fixed(1), 3).is_err());
        assert!(assert_arity("&&", &Arity::Variadic, 2).is_err());
        assert!(assert_arity("&&", &Arity::Variadic, 4).is_ok());
        assert!(assert_arity("$", &Arity::Range(1, Some(2)), 3).is_ok());
        assert!(assert_arity("$", &Arity::Range(1, Some(2)), 4).is_err());
    }
}
