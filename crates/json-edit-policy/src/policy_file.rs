//! Declarative policy files.
//!
//! A policy file is the data form of an [`EditorConfig`]: rules are written
//! as expressions (see `json-edit-expression`) instead of closures. Files may
//! be JSON or TOML and are validated completely when converted, so a bad
//! operator name surfaces at load time rather than on the first node that
//! reaches it.
//!
//! ```toml
//! root_name = "Superheroes"
//! collapse = 2
//! restrict_delete = true
//! restrict_edit = ["||", ["==", ["$", "/key"], "id"], ["<=", ["$", "/level"], 1]]
//! restrict_type_selection = ["string", "object", "array"]
//!
//! [[custom_nodes]]
//! name = "publisher"
//! condition = ["==", ["$", "/key"], "publisher"]
//! renderer = "badge"
//! hide_key = true
//! ```

use crate::config::{Collapse, DefaultValue, EditorConfig, Restriction, TypeSelection};
use crate::custom_node::CustomNodeDefinition;
use crate::error::ConfigurationError;
use crate::rule::{FilterFunction, StyleFunction, TextFunction};
use crate::style::{StyleRule, StyleTarget};
use crate::text::{CustomTextKey, TextRule};
use json_edit_expression::Expression;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomNodeSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub condition: Value,
    pub renderer: String,
    #[serde(default)]
    pub hide_key: bool,
    #[serde(default = "default_true")]
    pub show_on_view: bool,
    #[serde(default)]
    pub show_on_edit: bool,
    #[serde(default = "default_true")]
    pub show_edit_tools: bool,
    #[serde(default)]
    pub show_in_types_selector: bool,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub props: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    #[serde(default)]
    pub root_name: Option<String>,
    /// `true`, `false`, a depth, or an expression.
    #[serde(default)]
    pub collapse: Option<Value>,
    /// Restrictions are a boolean or an expression.
    #[serde(default)]
    pub restrict_edit: Option<Value>,
    #[serde(default)]
    pub restrict_delete: Option<Value>,
    #[serde(default)]
    pub restrict_add: Option<Value>,
    #[serde(default)]
    pub restrict_type_selection: TypeSelection,
    /// `{ "value": .. }`, `{ "expr": .. }`, or any other value used as is.
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub custom_nodes: Vec<CustomNodeSpec>,
    /// Plain strings are fixed text; anything else is an expression.
    #[serde(default)]
    pub custom_text: BTreeMap<CustomTextKey, Value>,
    /// Objects are fixed styles; anything else is an expression.
    #[serde(default)]
    pub styles: BTreeMap<StyleTarget, Value>,
}

fn compile(field: &str, value: Value) -> Result<Expression, ConfigurationError> {
    Expression::new(value).map_err(|source| ConfigurationError::InvalidExpression {
        field: field.to_string(),
        source,
    })
}

fn restriction(field: &str, value: Option<Value>) -> Result<Restriction, ConfigurationError> {
    match value {
        None => Ok(Restriction::Never),
        Some(Value::Bool(b)) => Ok(Restriction::from(b)),
        Some(expr) => Ok(Restriction::expression(compile(field, expr)?)),
    }
}

fn collapse(value: Option<Value>) -> Result<Collapse, ConfigurationError> {
    match value {
        None => Ok(Collapse::Never),
        Some(Value::Bool(b)) => Ok(Collapse::from(b)),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Collapse::Level)
            .ok_or_else(|| {
                ConfigurationError::invalid_field("collapse", format!("{n} is not a depth"))
            }),
        Some(expr) => {
            let rule: FilterFunction = Arc::new(compile("collapse", expr)?);
            Ok(Collapse::When(rule))
        }
    }
}

fn default_value(value: Option<Value>) -> Result<DefaultValue, ConfigurationError> {
    let Some(value) = value else {
        return Ok(DefaultValue::default());
    };
    if let Value::Object(map) = &value {
        if map.len() == 1 {
            if let Some(expr) = map.get("expr") {
                return Ok(DefaultValue::expression(compile("default_value", expr.clone())?));
            }
            if let Some(v) = map.get("value") {
                return Ok(DefaultValue::Static(v.clone()));
            }
        }
    }
    Ok(DefaultValue::Static(value))
}

impl CustomNodeSpec {
    fn into_definition(self, index: usize) -> Result<CustomNodeDefinition, ConfigurationError> {
        let field = format!("custom_nodes[{index}].condition");
        let condition: FilterFunction = match self.condition {
            Value::Bool(b) => crate::rule::filter(move |_| b),
            expr => Arc::new(compile(&field, expr)?),
        };
        if self.renderer.is_empty() {
            return Err(ConfigurationError::invalid_field(
                format!("custom_nodes[{index}].renderer"),
                "must not be empty",
            ));
        }
        Ok(CustomNodeDefinition {
            name: self.name,
            condition,
            renderer: self.renderer,
            hide_key: self.hide_key,
            show_on_view: self.show_on_view,
            show_on_edit: self.show_on_edit,
            show_edit_tools: self.show_edit_tools,
            show_in_types_selector: self.show_in_types_selector,
            default_value: self.default_value,
            props: self.props,
        })
    }
}

impl PolicyFile {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ConfigurationError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => return Err(ConfigurationError::UnsupportedFormat(path.to_path_buf())),
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = parse(&text)?;
        info!(
            path = %path.display(),
            custom_nodes = file.custom_nodes.len(),
            "policy file loaded"
        );
        Ok(file)
    }

    /// Compiles every rule, failing on the first invalid one.
    pub fn into_config(self) -> Result<EditorConfig, ConfigurationError> {
        let mut config = EditorConfig::new();
        if let Some(name) = self.root_name {
            config.root_name = name;
        }
        config.collapse = collapse(self.collapse)?;
        config.restrict_edit = restriction("restrict_edit", self.restrict_edit)?;
        config.restrict_delete = restriction("restrict_delete", self.restrict_delete)?;
        config.restrict_add = restriction("restrict_add", self.restrict_add)?;
        config.restrict_type_selection = self.restrict_type_selection;
        config.default_value = default_value(self.default_value)?;
        config.custom_node_definitions = self
            .custom_nodes
            .into_iter()
            .enumerate()
            .map(|(i, entry)| entry.into_definition(i))
            .collect::<Result<_, _>>()?;
        for (key, value) in self.custom_text {
            let rule = match value {
                Value::String(s) => TextRule::Static(s),
                expr => {
                    let f: TextFunction = Arc::new(compile(&format!("custom_text.{key}"), expr)?);
                    TextRule::Dynamic(f)
                }
            };
            config.custom_text.insert(key, rule);
        }
        for (target, value) in self.styles {
            let rule = match value {
                Value::Object(style) => StyleRule::Static(style),
                expr => {
                    let f: StyleFunction = Arc::new(compile(&format!("styles.{target}"), expr)?);
                    StyleRule::Dynamic(f)
                }
            };
            config.styles.insert(target, rule);
        }
        Ok(config)
    }
}

impl EditorConfig {
    /// Loads and compiles a policy file.
    pub fn from_policy_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        PolicyFile::load(path)?.into_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::JsonNode;
    use crate::resolver::NodePolicyResolver;
    use json_edit_expression::ExprError;
    use serde_json::json;

    #[test]
    fn test_restriction_forms() {
        let file = PolicyFile::from_json_str(
            r#"{
                "restrict_edit": ["==", ["$", "/key"], "id"],
                "restrict_delete": true,
                "restrict_add": false
            }"#,
        )
        .unwrap();
        let config = file.into_config().unwrap();
        assert!(matches!(config.restrict_delete, Restriction::Always));
        assert!(matches!(config.restrict_add, Restriction::Never));

        let data = json!({"id": 7, "name": "x"});
        let resolver = NodePolicyResolver::new(&config);
        let id = JsonNode::at_pointer(&data, "/id").unwrap();
        let name = JsonNode::at_pointer(&data, "/name").unwrap();
        assert!(resolver.is_edit_forbidden(&id).unwrap());
        assert!(!resolver.is_edit_forbidden(&name).unwrap());
    }

    #[test]
    fn test_invalid_expression_names_field() {
        let file = PolicyFile::from_json_str(
            r#"{ "custom_nodes": [
                { "condition": true, "renderer": "a" },
                { "condition": ["nope", 1], "renderer": "b" }
            ] }"#,
        )
        .unwrap();
        match file.into_config() {
            Err(ConfigurationError::InvalidExpression { field, source }) => {
                assert_eq!(field, "custom_nodes[1].condition");
                assert!(matches!(source, ExprError::UnknownExpression(_)));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_default_value_forms() {
        let data = json!([]);
        let node = JsonNode::root(&data);
        let cases = [
            (json!({"value": {"expr": 1}}), json!({"expr": 1})),
            (json!({"a": 1, "b": 2}), json!({"a": 1, "b": 2})),
            (json!("New Value"), json!("New Value")),
            (
                json!({"expr": ["?", ["==", ["$", "/level"], 0], "root", "deep"]}),
                json!("root"),
            ),
        ];
        for (raw, expected) in cases {
            let config = EditorConfig::new().with_default_value(default_value(Some(raw)).unwrap());
            assert_eq!(
                NodePolicyResolver::new(&config).default_value(&node).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_collapse_forms() {
        assert!(matches!(collapse(Some(json!(2))).unwrap(), Collapse::Level(2)));
        assert!(matches!(collapse(Some(json!(true))).unwrap(), Collapse::All));
        assert!(matches!(collapse(None).unwrap(), Collapse::Never));
        assert!(matches!(
            collapse(Some(json!(-1))),
            Err(ConfigurationError::InvalidField { .. })
        ));
        assert!(matches!(
            collapse(Some(json!([">", ["$", "/size"], 10]))).unwrap(),
            Collapse::When(_)
        ));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(matches!(
            PolicyFile::from_json_str(r#"{ "restrictEdit": true }"#),
            Err(ConfigurationError::Json(_))
        ));
        assert!(matches!(
            PolicyFile::from_toml_str("restrict_everything = true"),
            Err(ConfigurationError::Toml(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            PolicyFile::load("policy.yaml"),
            Err(ConfigurationError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_toml_text_and_styles() {
        let file = PolicyFile::from_toml_str(
            r#"
            [custom_text]
            KEY_NEW = "Name the field"
            ITEMS_MULTIPLE = ["?", ["==", ["$", "/key"], "aliases"], [".", ["$", "/size"], " names"], ["[]", {}, "x"]]

            [styles]
            string = ["?", ["==", ["$", "/key"], "name"], [{ fontWeight = "bold" }], ["[]", {}, "x"]]
            bracket = { color = "grey" }
            "#,
        )
        .unwrap();
        let config = file.into_config().unwrap();
        assert!(matches!(config.custom_text[&CustomTextKey::KeyNew], TextRule::Static(_)));
        assert!(matches!(config.styles[&StyleTarget::Bracket], StyleRule::Static(_)));

        let data = json!({"name": "Bruce", "aliases": ["Batman", "The Dark Knight"], "tags": [1, 2]});
        let resolver = NodePolicyResolver::new(&config);
        let aliases = JsonNode::at_pointer(&data, "/aliases").unwrap();
        let tags = JsonNode::at_pointer(&data, "/tags").unwrap();
        let name = JsonNode::at_pointer(&data, "/name").unwrap();
        assert_eq!(resolver.item_count_text(&aliases).unwrap().as_deref(), Some("2 names"));
        assert_eq!(resolver.item_count_text(&tags).unwrap().as_deref(), Some("2 items"));
        assert_eq!(
            resolver.style(&name, StyleTarget::String).unwrap(),
            json!({"fontWeight": "bold"}).as_object().cloned()
        );
    }
}
