//! Path step and path types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A step in a node path.
///
/// Object members are addressed by key, array elements by a native index.
/// Keeping the two apart lets callers build paths programmatically without
/// guessing whether `"0"` meant a member name or a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    /// Array index.
    Index(usize),
    /// Object member name.
    Key(String),
}

/// A path from the document root to a node.
pub type Path = Vec<PathStep>;

impl PathStep {
    /// Returns the member name if this step addresses an object member.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathStep::Key(k) => Some(k),
            PathStep::Index(_) => None,
        }
    }

    /// Returns the index if this step addresses an array element.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(i) => Some(*i),
            PathStep::Key(_) => None,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathStep::Index(_))
    }

    /// The raw (unescaped) pointer component for this step.
    pub fn to_component(&self) -> String {
        match self {
            PathStep::Key(k) => k.clone(),
            PathStep::Index(i) => i.to_string(),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(k) => f.write_str(k),
            PathStep::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<usize> for PathStep {
    fn from(i: usize) -> Self {
        PathStep::Index(i)
    }
}

impl From<&str> for PathStep {
    fn from(k: &str) -> Self {
        PathStep::Key(k.to_string())
    }
}

impl From<String> for PathStep {
    fn from(k: String) -> Self {
        PathStep::Key(k)
    }
}

impl PartialEq<str> for PathStep {
    fn eq(&self, other: &str) -> bool {
        self.as_key() == Some(other)
    }
}

impl PartialEq<&str> for PathStep {
    fn eq(&self, other: &&str) -> bool {
        self.as_key() == Some(*other)
    }
}

impl PartialEq<usize> for PathStep {
    fn eq(&self, other: &usize) -> bool {
        self.as_index() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_kinds() {
        let k = PathStep::from("name");
        let i = PathStep::from(3usize);
        assert_eq!(k.as_key(), Some("name"));
        assert_eq!(k.as_index(), None);
        assert_eq!(i.as_index(), Some(3));
        assert!(i.is_index());
        assert!(k == "name");
        assert!(i == 3usize);
    }

    #[test]
    fn test_numeric_string_key_stays_a_key() {
        let step: PathStep = serde_json::from_value(json!("0")).unwrap();
        assert_eq!(step, PathStep::Key("0".to_string()));
        let step: PathStep = serde_json::from_value(json!(0)).unwrap();
        assert_eq!(step, PathStep::Index(0));
    }

    #[test]
    fn test_serialize_path() {
        let path: Path = vec!["children".into(), 1usize.into(), "name".into()];
        assert_eq!(serde_json::to_value(&path).unwrap(), json!(["children", 1, "name"]));
    }
}
