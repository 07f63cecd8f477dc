//! Error types for policy resolution.
//!
//! Two families: [`ConfigurationError`] for problems with what the caller
//! configured (a rule failed or produced the wrong shape, a policy file did
//! not parse), and [`InvalidNodeError`] for node contexts that do not
//! describe a real position in a tree.

use crate::data_type::DataType;
use crate::style::StyleTarget;
use crate::text::CustomTextKey;
use json_edit_expression::ExprError;
use json_edit_pointer::JsonPointerError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Identifies which configured rule was being evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    RestrictEdit,
    RestrictDelete,
    RestrictAdd,
    DefaultValue,
    Collapse,
    CustomNodeCondition(usize),
    CustomText(CustomTextKey),
    Style(StyleTarget),
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::RestrictEdit => f.write_str("restrict_edit"),
            RuleKind::RestrictDelete => f.write_str("restrict_delete"),
            RuleKind::RestrictAdd => f.write_str("restrict_add"),
            RuleKind::DefaultValue => f.write_str("default_value"),
            RuleKind::Collapse => f.write_str("collapse"),
            RuleKind::CustomNodeCondition(i) => write!(f, "custom_nodes[{i}].condition"),
            RuleKind::CustomText(key) => write!(f, "custom_text.{key}"),
            RuleKind::Style(target) => write!(f, "styles.{target}"),
        }
    }
}

/// Failure reported by a single rule.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error(transparent)]
    Expression(#[from] ExprError),

    /// The rule produced a value the caller of the rule cannot use.
    #[error("expected {expected}, found {found}")]
    Shape { expected: &'static str, found: String },

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl RuleError {
    pub fn message(msg: impl Into<String>) -> Self {
        RuleError::Message(msg.into())
    }

    pub fn shape(expected: &'static str, found: impl Into<String>) -> Self {
        RuleError::Shape {
            expected,
            found: found.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("rule {rule} failed at {pointer:?}: {source}")]
    RuleFailed {
        rule: RuleKind,
        pointer: String,
        #[source]
        source: RuleError,
    },

    #[error("rule {rule} at {pointer:?} returned {found}, expected {expected}")]
    UnexpectedShape {
        rule: RuleKind,
        pointer: String,
        expected: &'static str,
        found: String,
    },

    #[error("invalid expression in {field}: {source}")]
    InvalidExpression {
        field: String,
        #[source]
        source: ExprError,
    },

    #[error("invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("policy JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("policy TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported policy file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("io error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigurationError {
    /// Wraps a rule failure, lifting shape errors into
    /// [`ConfigurationError::UnexpectedShape`].
    pub fn from_rule(rule: RuleKind, pointer: String, source: RuleError) -> Self {
        match source {
            RuleError::Shape { expected, found } => ConfigurationError::UnexpectedShape {
                rule,
                pointer,
                expected,
                found,
            },
            source => ConfigurationError::RuleFailed {
                rule,
                pointer,
                source,
            },
        }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigurationError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A node context that does not describe a real tree position.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidNodeError {
    #[error("root node must not carry a key")]
    RootKeyPresent,

    #[error("root node must not have a parent value")]
    RootParentPresent,

    #[error("node at level {level} has no key")]
    MissingKey { level: usize },

    #[error("node at level {level} has no parent value")]
    MissingParent { level: usize },

    #[error("level {level} does not match path length {path_len}")]
    LevelMismatch { level: usize, path_len: usize },

    #[error("key {key:?} differs from last path step {last:?}")]
    KeyMismatch { key: String, last: String },

    #[error("key {key:?} cannot address a value inside a {container}")]
    KeyKindMismatch { key: String, container: DataType },

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("value at {pointer:?} is not the parent's member")]
    ValueMismatch { pointer: String },

    #[error("size {found:?} does not match child count {expected:?}")]
    SizeMismatch {
        expected: Option<usize>,
        found: Option<usize>,
    },

    #[error(transparent)]
    Pointer(#[from] JsonPointerError),
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    InvalidNode(#[from] InvalidNodeError),
}

impl PolicyError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, PolicyError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_errors_are_lifted() {
        let err = ConfigurationError::from_rule(
            RuleKind::DefaultValue,
            "/0".to_string(),
            RuleError::shape("a JSON value", "undefined"),
        );
        assert!(matches!(err, ConfigurationError::UnexpectedShape { .. }));
        assert_eq!(
            err.to_string(),
            "rule default_value at \"/0\" returned undefined, expected a JSON value"
        );
    }

    #[test]
    fn test_rule_failure_message() {
        let err = ConfigurationError::from_rule(
            RuleKind::CustomNodeCondition(2),
            String::new(),
            RuleError::message("boom"),
        );
        assert_eq!(err.to_string(), "rule custom_nodes[2].condition failed at \"\": boom");
    }
}
