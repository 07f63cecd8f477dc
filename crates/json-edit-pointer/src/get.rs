use serde_json::Value;

use crate::types::{Path, PathStep};
use crate::validate::validate_path;
use crate::{is_valid_index, parse_json_pointer, JsonPointerError};

/// Get a value by raw pointer components.
///
/// Array components must be canonical indices; `-` never resolves.
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Array(arr) => {
                if !is_valid_index(step) {
                    return None;
                }
                arr.get(step.parse::<usize>().ok()?)?
            }
            Value::Object(map) => map.get(step)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a value by typed path.
///
/// A key step never matches an array element and an index step never
/// matches an object member, even if the member name is numeric.
pub fn get_path<'a>(val: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match (current, step) {
            (Value::Array(arr), PathStep::Index(i)) => arr.get(*i)?,
            (Value::Object(map), PathStep::Key(k)) => map.get(k)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Type raw pointer components against a document.
///
/// Components that land on arrays become [`PathStep::Index`], all others
/// [`PathStep::Key`]. Every step must exist and the path must not exceed
/// the maximum depth.
pub fn resolve_path(doc: &Value, components: &[String]) -> Result<Path, JsonPointerError> {
    validate_path(components)?;
    let mut path = Vec::with_capacity(components.len());
    let mut current = doc;
    for component in components {
        match current {
            Value::Array(arr) => {
                if !is_valid_index(component) {
                    return Err(JsonPointerError::InvalidIndex(component.clone()));
                }
                let idx: usize = component
                    .parse()
                    .map_err(|_| JsonPointerError::InvalidIndex(component.clone()))?;
                current = arr
                    .get(idx)
                    .ok_or_else(|| JsonPointerError::NotFound(component.clone()))?;
                path.push(PathStep::Index(idx));
            }
            Value::Object(map) => {
                current = map
                    .get(component)
                    .ok_or_else(|| JsonPointerError::NotFound(component.clone()))?;
                path.push(PathStep::Key(component.clone()));
            }
            _ => return Err(JsonPointerError::NotFound(component.clone())),
        }
    }
    Ok(path)
}

/// Parse a pointer string and type it against a document.
pub fn resolve_pointer(doc: &Value, pointer: &str) -> Result<Path, JsonPointerError> {
    let components = parse_json_pointer(pointer)?;
    resolve_path(doc, &components)
}
