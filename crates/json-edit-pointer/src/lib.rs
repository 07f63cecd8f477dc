//! Typed node paths and JSON Pointer (RFC 6901) utilities.
//!
//! Node paths in the editor are sequences of [`PathStep`]s: object member
//! names and native array indices. This crate converts between those paths
//! and [JSON Pointer](https://tools.ietf.org/html/rfc6901) strings, looks
//! values up by path, and formats the accessor string used when a user
//! copies a node's path.
//!
//! # Example
//!
//! ```
//! use json_edit_pointer::{format_json_pointer, resolve_pointer, get_path, PathStep};
//! use serde_json::json;
//!
//! let doc = json!({"children": [{"name": "Leo"}]});
//! let path = resolve_pointer(&doc, "/children/0/name").unwrap();
//! assert_eq!(path[1], PathStep::Index(0));
//! assert_eq!(format_json_pointer(&path), "/children/0/name");
//! assert_eq!(get_path(&doc, &path), Some(&json!("Leo")));
//! ```

use thiserror::Error;

pub mod accessor;
pub mod get;
pub mod types;
pub mod validate;

pub use accessor::format_accessor;
pub use get::{get, get_path, resolve_path, resolve_pointer};
pub use types::{Path, PathStep};
pub use validate::{validate_json_pointer, validate_path, ValidationError};

/// Errors produced while parsing or resolving pointers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("invalid pointer: {0}")]
    Invalid(#[from] ValidationError),
    #[error("INVALID_INDEX: {0}")]
    InvalidIndex(String),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
}

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// ```
/// use json_edit_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// ```
/// use json_edit_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into raw (untyped) components.
///
/// The empty string is the root pointer and yields no components.
///
/// ```
/// use json_edit_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer("").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/a~1b/0").unwrap(), vec!["a/b", "0"]);
/// assert!(parse_json_pointer("no-slash").is_err());
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<Vec<String>, JsonPointerError> {
    validate_json_pointer(pointer)?;
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    Ok(pointer[1..].split('/').map(unescape_component).collect())
}

/// Format a typed path as a JSON Pointer string.
///
/// ```
/// use json_edit_pointer::{format_json_pointer, PathStep};
///
/// assert_eq!(format_json_pointer(&[]), "");
/// let path = vec![PathStep::from("a/b"), PathStep::from(2usize)];
/// assert_eq!(format_json_pointer(&path), "/a~1b/2");
/// ```
pub fn format_json_pointer(path: &[PathStep]) -> String {
    let mut out = String::new();
    for step in path {
        out.push('/');
        match step {
            PathStep::Key(k) => out.push_str(&escape_component(k)),
            PathStep::Index(i) => out.push_str(&i.to_string()),
        }
    }
    out
}

/// Check if a string is a canonical non-negative array index
/// (no sign, no leading zeros).
///
/// ```
/// use json_edit_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}
