//! Accessor strings for the "copy path" action.
//!
//! A path is rendered as a property-access expression rooted at the
//! editor's root name, e.g. `data.children[0]["first name"]`.

use crate::types::PathStep;

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Format a path as an accessor expression.
///
/// ```
/// use json_edit_pointer::{format_accessor, PathStep};
///
/// let path = vec![PathStep::from("children"), PathStep::from(0usize), PathStep::from("first name")];
/// assert_eq!(format_accessor("data", &path), r#"data.children[0]["first name"]"#);
/// assert_eq!(format_accessor("data", &[]), "data");
/// ```
pub fn format_accessor(root_name: &str, path: &[PathStep]) -> String {
    let mut out = String::from(root_name);
    for step in path {
        match step {
            PathStep::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
            PathStep::Key(k) if is_identifier(k) => {
                out.push('.');
                out.push_str(k);
            }
            PathStep::Key(k) => {
                out.push('[');
                // serde_json string escaping gives a valid quoted literal
                out.push_str(&serde_json::Value::String(k.clone()).to_string());
                out.push(']');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("name"));
        assert!(is_identifier("_private$"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("editor.tabSize"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_dotted_key_is_bracketed() {
        let path = vec![PathStep::from("editor.tabSize")];
        assert_eq!(format_accessor("settings", &path), r#"settings["editor.tabSize"]"#);
    }

    #[test]
    fn test_quote_escaping() {
        let path = vec![PathStep::from("say \"hi\"")];
        assert_eq!(format_accessor("data", &path), r#"data["say \"hi\""]"#);
    }
}
