//! Caller-supplied rules.
//!
//! A [`Rule`] maps a node context to a decision. Rules come from two
//! places: Rust closures wrapped with [`rule_fn`] / [`filter`], and
//! declarative [`Expression`]s loaded from policy files. Both are stored
//! behind `Arc<dyn Rule<T>>` so a configuration can be shared across
//! threads.

use crate::error::RuleError;
use crate::node::JsonNode;
use crate::style::Style;
use json_edit_expression::util::type_name;
use json_edit_expression::{Expression, JsValue};
use serde_json::Value;
use std::sync::Arc;

pub trait Rule<T>: Send + Sync {
    fn evaluate(&self, node: &JsonNode<'_>) -> Result<T, RuleError>;
}

/// Predicate deciding yes/no for a node.
pub type FilterFunction = Arc<dyn Rule<bool>>;

/// Generator for the value of a newly added child.
pub type DefaultValueFunction = Arc<dyn Rule<Value>>;

/// Custom text; `None` defers to the default text.
pub type TextFunction = Arc<dyn Rule<Option<String>>>;

/// Style override; `None` defers to the theme.
pub type StyleFunction = Arc<dyn Rule<Option<Style>>>;

/// Adapter turning a closure into a [`Rule`].
pub struct FnRule<F>(F);

impl<T, F> Rule<T> for FnRule<F>
where
    F: Fn(&JsonNode<'_>) -> Result<T, RuleError> + Send + Sync,
{
    fn evaluate(&self, node: &JsonNode<'_>) -> Result<T, RuleError> {
        (self.0)(node)
    }
}

/// Wraps a fallible closure.
pub fn rule_fn<T, F>(f: F) -> Arc<dyn Rule<T>>
where
    T: 'static,
    F: Fn(&JsonNode<'_>) -> Result<T, RuleError> + Send + Sync + 'static,
{
    Arc::new(FnRule(f))
}

/// Wraps an infallible predicate.
pub fn filter<F>(f: F) -> FilterFunction
where
    F: Fn(&JsonNode<'_>) -> bool + Send + Sync + 'static,
{
    rule_fn(move |node: &JsonNode<'_>| -> Result<bool, RuleError> { Ok(f(node)) })
}

impl Rule<bool> for Expression {
    fn evaluate(&self, node: &JsonNode<'_>) -> Result<bool, RuleError> {
        Ok(self.test(node)?)
    }
}

impl Rule<Value> for Expression {
    fn evaluate(&self, node: &JsonNode<'_>) -> Result<Value, RuleError> {
        match Expression::evaluate(self, node)? {
            JsValue::Json(v) => Ok(v),
            JsValue::Undefined => Err(RuleError::shape("a JSON value", "undefined")),
        }
    }
}

impl Rule<Option<String>> for Expression {
    fn evaluate(&self, node: &JsonNode<'_>) -> Result<Option<String>, RuleError> {
        match Expression::evaluate(self, node)? {
            JsValue::Undefined | JsValue::Json(Value::Null) => Ok(None),
            JsValue::Json(Value::String(s)) => Ok(Some(s)),
            other => Err(RuleError::shape("a string or null", type_name(&other))),
        }
    }
}

impl Rule<Option<Style>> for Expression {
    fn evaluate(&self, node: &JsonNode<'_>) -> Result<Option<Style>, RuleError> {
        match Expression::evaluate(self, node)? {
            JsValue::Undefined | JsValue::Json(Value::Null) => Ok(None),
            JsValue::Json(Value::Object(map)) => Ok(Some(map)),
            other => Err(RuleError::shape("a style object or null", type_name(&other))),
        }
    }
}
