//! Variable scopes that `$` lookups read from.

use crate::types::JsValue;
use json_edit_pointer::get;
use serde_json::Value;

/// Read-only source of variables for an evaluation.
///
/// `path` holds the unescaped components of the pointer given to `$`;
/// an empty path asks for the whole scope.
pub trait Scope {
    fn lookup(&self, path: &[String]) -> JsValue;
}

impl Scope for Value {
    fn lookup(&self, path: &[String]) -> JsValue {
        get(self, path)
            .map(|v| JsValue::Json(v.clone()))
            .unwrap_or(JsValue::Undefined)
    }
}

impl<S: Scope + ?Sized> Scope for &S {
    fn lookup(&self, path: &[String]) -> JsValue {
        (**self).lookup(path)
    }
}
