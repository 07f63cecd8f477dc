//! Value helpers shared by the operators.

use crate::error::ExprError;
use crate::types::JsValue;
use serde_json::Value;

// ----------------------------------------------------------------- Literals

pub fn as_literal(value: &Value) -> Result<&Value, ExprError> {
    match value {
        Value::Array(a) => {
            if a.len() != 1 {
                return Err(ExprError::InvalidLiteral);
            }
            Ok(&a[0])
        }
        other => Ok(other),
    }
}

// ----------------------------------------------------------------- Truthiness and types

pub fn is_truthy(value: &JsValue) -> bool {
    match value {
        JsValue::Undefined => false,
        JsValue::Json(v) => match v {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        },
    }
}

/// Returns the type name of a value.
pub fn type_name(value: &JsValue) -> &'static str {
    match value {
        JsValue::Undefined => "undefined",
        JsValue::Json(v) => match v {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        },
    }
}

/// Numeric coercion; anything non-numeric becomes 0.
pub fn num(value: &JsValue) -> f64 {
    let n = match value {
        JsValue::Undefined => f64::NAN,
        JsValue::Json(v) => match v {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Value::Array(_) | Value::Object(_) => f64::NAN,
        },
    };
    if n.is_nan() { 0.0 } else { n }
}

pub fn str_val(value: &JsValue) -> String {
    match value {
        JsValue::Undefined => "undefined".to_string(),
        JsValue::Json(v) => match v {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => v.to_string(),
        },
    }
}

pub fn f64_to_jsval(n: f64) -> JsValue {
    match serde_json::Number::from_f64(n) {
        Some(num) => JsValue::Json(Value::Number(num)),
        None => JsValue::Json(Value::Null),
    }
}

pub fn usize_to_jsval(n: usize) -> JsValue {
    JsValue::Json(Value::Number(serde_json::Number::from(n)))
}

// ----------------------------------------------------------------- Equality and ordering

/// Structural equality where numbers compare by value, so `1` equals `1.0`.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(fx), Some(fy)) => fx == fy,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, xv)| ym.get(k).is_some_and(|yv| deep_equal(xv, yv)))
        }
        _ => a == b,
    }
}

pub fn js_equal(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Json(av), JsValue::Json(bv)) => deep_equal(av, bv),
        (JsValue::Undefined, JsValue::Undefined) => true,
        _ => false,
    }
}

/// Three-way comparison: numerically when both sides are numbers,
/// otherwise by string form.
pub fn cmp(a: &JsValue, b: &JsValue) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (JsValue::Json(Value::Number(na)), JsValue::Json(Value::Number(nb))) => {
            let fa = na.as_f64().unwrap_or(0.0);
            let fb = nb.as_f64().unwrap_or(0.0);
            fa.partial_cmp(&fb).unwrap_or(Ordering::Equal)
        }
        _ => str_val(a).cmp(&str_val(b)),
    }
}

// ----------------------------------------------------------------- Containers

pub fn len(value: &JsValue) -> JsValue {
    let n = match value {
        JsValue::Json(Value::String(s)) => s.chars().count(),
        JsValue::Json(Value::Array(a)) => a.len(),
        JsValue::Json(Value::Object(o)) => o.len(),
        _ => 0,
    };
    usize_to_jsval(n)
}

pub fn member(container: &JsValue, index: &JsValue) -> Result<JsValue, ExprError> {
    match container {
        JsValue::Json(Value::String(s)) => {
            let i = num(index);
            if i < 0.0 {
                return Ok(JsValue::Undefined);
            }
            Ok(s.chars()
                .nth(i as usize)
                .map(|ch| JsValue::Json(Value::String(ch.to_string())))
                .unwrap_or(JsValue::Undefined))
        }
        JsValue::Json(Value::Array(arr)) => {
            let i = num(index);
            if i < 0.0 {
                return Ok(JsValue::Undefined);
            }
            Ok(arr
                .get(i as usize)
                .map(|v| JsValue::Json(v.clone()))
                .unwrap_or(JsValue::Undefined))
        }
        JsValue::Json(Value::Object(obj)) => {
            let k = match index {
                JsValue::Json(Value::String(k)) => k.clone(),
                JsValue::Json(Value::Number(n)) => n.to_string(),
                _ => return Err(ExprError::NotStringIndex),
            };
            Ok(obj
                .get(&k)
                .map(|v| JsValue::Json(v.clone()))
                .unwrap_or(JsValue::Undefined))
        }
        _ => Err(ExprError::NotContainer),
    }
}

pub fn is_in_arr(arr: &JsValue, val: &JsValue) -> Result<bool, ExprError> {
    match arr {
        JsValue::Json(Value::Array(items)) => Ok(match val {
            JsValue::Json(v) => items.iter().any(|item| deep_equal(item, v)),
            JsValue::Undefined => false,
        }),
        _ => Err(ExprError::NotArray),
    }
}

pub fn keys(value: &JsValue) -> Result<JsValue, ExprError> {
    match value {
        JsValue::Json(Value::Object(map)) => Ok(JsValue::Json(Value::Array(
            map.keys().map(|k| Value::String(k.clone())).collect(),
        ))),
        _ => Err(ExprError::NotObject),
    }
}

// ----------------------------------------------------------------- Strings

pub fn starts(outer: &JsValue, inner: &JsValue) -> bool {
    str_val(outer).starts_with(&str_val(inner))
}

pub fn contains(outer: &JsValue, inner: &JsValue) -> bool {
    str_val(outer).contains(str_val(inner).as_str())
}

pub fn ends(outer: &JsValue, inner: &JsValue) -> bool {
    str_val(outer).ends_with(&str_val(inner))
}
