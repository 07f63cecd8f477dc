//! Node contexts.
//!
//! A [`JsonNode`] is what every rule sees: one position inside a JSON
//! document together with its key, path, depth, child count and the
//! enclosing container. It borrows from the document, so rules can read
//! the tree but never change it.

use crate::data_type::DataType;
use crate::error::{InvalidNodeError, PolicyError};
use json_edit_expression::{JsValue, Scope};
use json_edit_pointer::{
    format_json_pointer, get, resolve_pointer, validate_path, JsonPointerError, Path, PathStep,
};
use serde_json::{Map, Value};

/// Discriminated view of a node value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
    Scalar(&'a Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonNode<'a> {
    /// Member name or array index; `None` at the root.
    pub key: Option<PathStep>,
    pub value: &'a Value,
    pub path: Path,
    /// Depth, root = 0.
    pub level: usize,
    /// Child count for objects and arrays.
    pub size: Option<usize>,
    /// Enclosing container; `None` at the root.
    pub parent_value: Option<&'a Value>,
}

fn child_count(value: &Value) -> Option<usize> {
    match value {
        Value::Object(map) => Some(map.len()),
        Value::Array(arr) => Some(arr.len()),
        _ => None,
    }
}

impl<'a> JsonNode<'a> {
    pub fn root(value: &'a Value) -> Self {
        JsonNode {
            key: None,
            value,
            path: Vec::new(),
            level: 0,
            size: child_count(value),
            parent_value: None,
        }
    }

    /// The child addressed by `step`, if this node is a container holding it.
    pub fn child(&self, step: PathStep) -> Option<JsonNode<'a>> {
        let value = match (self.value, &step) {
            (Value::Object(map), PathStep::Key(k)) => map.get(k)?,
            (Value::Array(arr), PathStep::Index(i)) => arr.get(*i)?,
            _ => return None,
        };
        let mut path = self.path.clone();
        path.push(step.clone());
        Some(JsonNode {
            key: Some(step),
            value,
            path,
            level: self.level + 1,
            size: child_count(value),
            parent_value: Some(self.value),
        })
    }

    /// All children in document order.
    pub fn children(&self) -> Vec<JsonNode<'a>> {
        match self.value {
            Value::Object(map) => map
                .keys()
                .filter_map(|k| self.child(PathStep::Key(k.clone())))
                .collect(),
            Value::Array(arr) => (0..arr.len())
                .filter_map(|i| self.child(PathStep::Index(i)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The node at a typed path below `root`.
    pub fn at_path(root: &'a Value, path: &[PathStep]) -> Result<JsonNode<'a>, InvalidNodeError> {
        validate_path(path).map_err(JsonPointerError::from)?;
        let mut node = JsonNode::root(root);
        for (depth, step) in path.iter().enumerate() {
            node = node.child(step.clone()).ok_or_else(|| {
                InvalidNodeError::Pointer(JsonPointerError::NotFound(
                    format_json_pointer(&path[..=depth]),
                ))
            })?;
        }
        Ok(node)
    }

    /// The node at a JSON Pointer below `root`.
    pub fn at_pointer(root: &'a Value, pointer: &str) -> Result<JsonNode<'a>, PolicyError> {
        let path = resolve_pointer(root, pointer).map_err(InvalidNodeError::from)?;
        Ok(JsonNode::at_path(root, &path)?)
    }

    pub fn kind(&self) -> NodeKind<'a> {
        match self.value {
            Value::Object(map) => NodeKind::Object(map),
            Value::Array(arr) => NodeKind::Array(arr),
            other => NodeKind::Scalar(other),
        }
    }

    pub fn data_type(&self) -> DataType {
        DataType::of(self.value)
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    pub fn is_collection(&self) -> bool {
        self.size.is_some()
    }

    /// True if this node is the object member named `name`.
    pub fn key_is(&self, name: &str) -> bool {
        matches!(&self.key, Some(PathStep::Key(k)) if k == name)
    }

    pub fn pointer(&self) -> String {
        format_json_pointer(&self.path)
    }

    /// Checks that the context is internally consistent: key, path and
    /// level agree, the key addresses this value inside the parent, and
    /// `size` matches the value.
    pub fn validate(&self) -> Result<(), InvalidNodeError> {
        if self.path.len() != self.level {
            return Err(InvalidNodeError::LevelMismatch {
                level: self.level,
                path_len: self.path.len(),
            });
        }
        let expected_size = child_count(self.value);
        if self.size != expected_size {
            return Err(InvalidNodeError::SizeMismatch {
                expected: expected_size,
                found: self.size,
            });
        }
        if self.level == 0 {
            if self.key.is_some() {
                return Err(InvalidNodeError::RootKeyPresent);
            }
            if self.parent_value.is_some() {
                return Err(InvalidNodeError::RootParentPresent);
            }
            return Ok(());
        }

        let key = self
            .key
            .as_ref()
            .ok_or(InvalidNodeError::MissingKey { level: self.level })?;
        let parent = self
            .parent_value
            .ok_or(InvalidNodeError::MissingParent { level: self.level })?;
        if let Some(last) = self.path.last() {
            if last != key {
                return Err(InvalidNodeError::KeyMismatch {
                    key: key.to_string(),
                    last: last.to_string(),
                });
            }
        }

        let member = match (parent, key) {
            (Value::Object(map), PathStep::Key(k)) => map.get(k),
            (Value::Array(arr), PathStep::Index(i)) => {
                if *i >= arr.len() {
                    return Err(InvalidNodeError::IndexOutOfBounds {
                        index: *i,
                        len: arr.len(),
                    });
                }
                arr.get(*i)
            }
            (container, key) => {
                return Err(InvalidNodeError::KeyKindMismatch {
                    key: key.to_string(),
                    container: DataType::of(container),
                })
            }
        };
        match member {
            Some(v) if std::ptr::eq(v, self.value) || v == self.value => Ok(()),
            _ => Err(InvalidNodeError::ValueMismatch {
                pointer: self.pointer(),
            }),
        }
    }

    /// The context as a JSON object, the shape rules see through `["$", ""]`.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("key".into(), self.key_json());
        map.insert("value".into(), self.value.clone());
        map.insert("path".into(), self.path_json());
        map.insert("level".into(), Value::from(self.level));
        map.insert("size".into(), self.size.map(Value::from).unwrap_or(Value::Null));
        map.insert(
            "parentValue".into(),
            self.parent_value.cloned().unwrap_or(Value::Null),
        );
        map.insert("type".into(), Value::from(self.data_type().as_str()));
        Value::Object(map)
    }

    fn key_json(&self) -> Value {
        match &self.key {
            None => Value::Null,
            Some(PathStep::Key(k)) => Value::String(k.clone()),
            Some(PathStep::Index(i)) => Value::from(*i),
        }
    }

    fn path_json(&self) -> Value {
        Value::Array(
            self.path
                .iter()
                .map(|step| match step {
                    PathStep::Key(k) => Value::String(k.clone()),
                    PathStep::Index(i) => Value::from(*i),
                })
                .collect(),
        )
    }
}

fn leaf(value: Value, rest: &[String]) -> JsValue {
    if rest.is_empty() {
        JsValue::Json(value)
    } else {
        get(&value, rest)
            .map(|v| JsValue::Json(v.clone()))
            .unwrap_or(JsValue::Undefined)
    }
}

fn descend(value: &Value, rest: &[String]) -> JsValue {
    get(value, rest)
        .map(|v| JsValue::Json(v.clone()))
        .unwrap_or(JsValue::Undefined)
}

/// Expressions read the node through `["$", "/key"]`, `["$", "/value/name"]`,
/// `["$", "/level"]`, `["$", "/size"]`, `["$", "/path/0"]`,
/// `["$", "/parentValue/..."]` and `["$", "/type"]`.
impl Scope for JsonNode<'_> {
    fn lookup(&self, path: &[String]) -> JsValue {
        let Some((head, rest)) = path.split_first() else {
            return JsValue::Json(self.to_json());
        };
        match head.as_str() {
            "key" => leaf(self.key_json(), rest),
            "value" => descend(self.value, rest),
            "path" => leaf(self.path_json(), rest),
            "level" => leaf(Value::from(self.level), rest),
            "size" => leaf(self.size.map(Value::from).unwrap_or(Value::Null), rest),
            "parentValue" => match self.parent_value {
                Some(parent) => descend(parent, rest),
                None => leaf(Value::Null, rest),
            },
            "type" => leaf(Value::from(self.data_type().as_str()), rest),
            _ => JsValue::Undefined,
        }
    }
}
