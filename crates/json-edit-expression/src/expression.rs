use crate::error::ExprError;
use crate::eval_ctx::EvalCtx;
use crate::evaluate::{evaluate, validate};
use crate::operators::operators_map;
use crate::scope::Scope;
use crate::types::{JsValue, OperatorMap};
use crate::util;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// The shared map of built-in operators.
pub fn default_operators() -> Arc<OperatorMap> {
    static OPS: OnceLock<Arc<OperatorMap>> = OnceLock::new();
    Arc::clone(OPS.get_or_init(|| Arc::new(operators_map())))
}

/// A validated expression.
///
/// Construction (including deserialization) checks every operator name,
/// arity and literal operand, so a loaded expression can only fail at
/// evaluation time on data-dependent errors such as a missing variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Expression(Value);

impl Expression {
    pub fn new(expr: Value) -> Result<Self, ExprError> {
        validate(&expr, &default_operators())?;
        Ok(Expression(expr))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn evaluate(&self, scope: &dyn Scope) -> Result<JsValue, ExprError> {
        let ctx = EvalCtx::new(scope, default_operators());
        evaluate(&self.0, &ctx)
    }

    /// Evaluates and coerces the result to a boolean by truthiness.
    pub fn test(&self, scope: &dyn Scope) -> Result<bool, ExprError> {
        Ok(util::is_truthy(&self.evaluate(scope)?))
    }
}

impl TryFrom<Value> for Expression {
    type Error = ExprError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Expression::new(value)
    }
}

impl From<Expression> for Value {
    fn from(expr: Expression) -> Self {
        expr.0
    }
}
