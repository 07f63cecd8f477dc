//! Node policy resolution.
//!
//! Every operation is a pure evaluation of the configured rules against one
//! node. Nothing is cached between calls. Restrictions follow the editor's
//! sign convention: a predicate returning `true` *forbids* the action, so the
//! resolver's predicate-facing methods are named `is_*_forbidden` and only
//! [`CapabilitySet`] speaks in terms of permissions.

use crate::config::{Collapse, DefaultValue, EditorConfig, Restriction};
use crate::custom_node::{CustomNodeDefinition, CustomTypeOption, CustomizationMatch};
use crate::data_type::DataType;
use crate::error::{ConfigurationError, PolicyError, RuleError, RuleKind};
use crate::node::JsonNode;
use crate::style::{Style, StyleRule, StyleTarget};
use crate::text::{render_count, CustomTextDefinitions, CustomTextKey, TextRule};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Effective permissions for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySet {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_add: bool,
    /// Built-in types the type selector offers.
    pub allowed_types: Vec<DataType>,
    /// Custom definitions offered in the type selector.
    pub custom_types: Vec<CustomTypeOption>,
}

impl CapabilitySet {
    pub fn permissive() -> Self {
        CapabilitySet {
            can_edit: true,
            can_delete: true,
            can_add: true,
            allowed_types: DataType::ALL.to_vec(),
            custom_types: Vec::new(),
        }
    }
}

/// Every decision the editor needs to draw one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDecision {
    #[serde(flatten)]
    pub capabilities: CapabilitySet,
    pub customization: Option<CustomizationMatch>,
    pub item_count_text: Option<String>,
    pub value_style: Option<Style>,
    pub collapsed: bool,
    /// Value a new child would receive; present only for collections that
    /// accept additions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_child_default: Option<Value>,
}

fn rule_failure(rule: RuleKind, node: &JsonNode<'_>, err: RuleError) -> PolicyError {
    let pointer = node.pointer();
    warn!(%rule, %pointer, error = %err, "rule failed");
    ConfigurationError::from_rule(rule, pointer, err).into()
}

fn debug_check(node: &JsonNode<'_>) {
    debug_assert!(
        node.validate().is_ok(),
        "invalid node context at {:?}: {:?}",
        node.pointer(),
        node.validate()
    );
}

/// Resolves policy against a borrowed configuration.
#[derive(Debug, Clone, Copy)]
pub struct NodePolicyResolver<'c> {
    config: &'c EditorConfig,
}

impl<'c> NodePolicyResolver<'c> {
    pub fn new(config: &'c EditorConfig) -> Self {
        NodePolicyResolver { config }
    }

    pub fn config(&self) -> &'c EditorConfig {
        self.config
    }

    fn is_forbidden(
        &self,
        restriction: &Restriction,
        rule: RuleKind,
        node: &JsonNode<'_>,
    ) -> Result<bool, PolicyError> {
        let forbidden = restriction
            .is_forbidden(node)
            .map_err(|err| rule_failure(rule.clone(), node, err))?;
        trace!(%rule, pointer = %node.pointer(), forbidden, "restriction evaluated");
        Ok(forbidden)
    }

    pub fn is_edit_forbidden(&self, node: &JsonNode<'_>) -> Result<bool, PolicyError> {
        self.is_forbidden(&self.config.restrict_edit, RuleKind::RestrictEdit, node)
    }

    pub fn is_delete_forbidden(&self, node: &JsonNode<'_>) -> Result<bool, PolicyError> {
        self.is_forbidden(&self.config.restrict_delete, RuleKind::RestrictDelete, node)
    }

    pub fn is_add_forbidden(&self, node: &JsonNode<'_>) -> Result<bool, PolicyError> {
        self.is_forbidden(&self.config.restrict_add, RuleKind::RestrictAdd, node)
    }

    pub fn capabilities(&self, node: &JsonNode<'_>) -> Result<CapabilitySet, PolicyError> {
        debug_check(node);
        let selection = &self.config.restrict_type_selection;
        let custom_types = if selection.is_all_restricted() {
            Vec::new()
        } else {
            self.config
                .custom_node_definitions
                .iter()
                .filter(|def| def.show_in_types_selector)
                .map(CustomTypeOption::from_definition)
                .collect()
        };
        Ok(CapabilitySet {
            can_edit: !self.is_edit_forbidden(node)?,
            can_delete: !self.is_delete_forbidden(node)?,
            can_add: !self.is_add_forbidden(node)?,
            allowed_types: selection.allowed_types(),
            custom_types,
        })
    }

    /// Value for a child added under `node`.
    pub fn default_value(&self, node: &JsonNode<'_>) -> Result<Value, PolicyError> {
        match &self.config.default_value {
            DefaultValue::Static(value) => Ok(value.clone()),
            DefaultValue::Generated(generator) => {
                let value = generator
                    .evaluate(node)
                    .map_err(|err| rule_failure(RuleKind::DefaultValue, node, err))?;
                trace!(pointer = %node.pointer(), "default value generated");
                Ok(value)
            }
        }
    }

    pub fn customization(
        &self,
        node: &JsonNode<'_>,
    ) -> Result<Option<CustomizationMatch>, PolicyError> {
        resolve_customization(node, &self.config.custom_node_definitions)
    }

    pub fn text_override(
        &self,
        node: &JsonNode<'_>,
        key: CustomTextKey,
    ) -> Result<Option<String>, PolicyError> {
        resolve_text_override(node, key, &self.config.custom_text)
    }

    /// Override for `key`, else the built-in text. The node's size is
    /// substituted into built-in and static templates; text produced by a
    /// dynamic rule is returned as is.
    pub fn text(&self, node: &JsonNode<'_>, key: CustomTextKey) -> Result<String, PolicyError> {
        let size = node.size.unwrap_or(0);
        let text = match self.config.custom_text.get(&key) {
            Some(TextRule::Static(template)) => render_count(template, size),
            Some(TextRule::Dynamic(_)) => match self.text_override(node, key)? {
                Some(text) => text,
                None => render_count(key.default_text(), size),
            },
            None => render_count(key.default_text(), size),
        };
        Ok(text)
    }

    /// Summary label for a collection, `None` for scalars.
    pub fn item_count_text(&self, node: &JsonNode<'_>) -> Result<Option<String>, PolicyError> {
        let Some(size) = node.size else {
            return Ok(None);
        };
        let key = if size == 1 {
            CustomTextKey::ItemSingle
        } else {
            CustomTextKey::ItemsMultiple
        };
        self.text(node, key).map(Some)
    }

    pub fn style(
        &self,
        node: &JsonNode<'_>,
        target: StyleTarget,
    ) -> Result<Option<Style>, PolicyError> {
        match self.config.styles.get(&target) {
            None => Ok(None),
            Some(StyleRule::Static(style)) => Ok(Some(style.clone())),
            Some(StyleRule::Dynamic(rule)) => rule
                .evaluate(node)
                .map_err(|err| rule_failure(RuleKind::Style(target), node, err)),
        }
    }

    /// Whether `node` starts collapsed. Scalars never do.
    pub fn collapsed(&self, node: &JsonNode<'_>) -> Result<bool, PolicyError> {
        if !node.is_collection() {
            return Ok(false);
        }
        match &self.config.collapse {
            Collapse::Never => Ok(false),
            Collapse::All => Ok(true),
            Collapse::Level(level) => Ok(node.level >= *level),
            Collapse::When(rule) => rule
                .evaluate(node)
                .map_err(|err| rule_failure(RuleKind::Collapse, node, err)),
        }
    }

    /// Resolves everything for one node. The node context is validated first.
    pub fn resolve(&self, node: &JsonNode<'_>) -> Result<NodeDecision, PolicyError> {
        node.validate()?;
        let capabilities = self.capabilities(node)?;
        let new_child_default = if capabilities.can_add && node.is_collection() {
            Some(self.default_value(node)?)
        } else {
            None
        };
        let decision = NodeDecision {
            customization: self.customization(node)?,
            item_count_text: self.item_count_text(node)?,
            value_style: self.style(node, StyleTarget::for_value(node.data_type()))?,
            collapsed: self.collapsed(node)?,
            new_child_default,
            capabilities,
        };
        debug!(
            pointer = %node.pointer(),
            can_edit = decision.capabilities.can_edit,
            can_delete = decision.capabilities.can_delete,
            can_add = decision.capabilities.can_add,
            custom = decision.customization.as_ref().map(|m| m.index),
            "node resolved"
        );
        Ok(decision)
    }
}

pub fn resolve_capabilities(
    node: &JsonNode<'_>,
    config: &EditorConfig,
) -> Result<CapabilitySet, PolicyError> {
    NodePolicyResolver::new(config).capabilities(node)
}

pub fn resolve_default_value(
    node: &JsonNode<'_>,
    config: &EditorConfig,
) -> Result<Value, PolicyError> {
    NodePolicyResolver::new(config).default_value(node)
}

/// First definition whose condition holds, in list order.
pub fn resolve_customization(
    node: &JsonNode<'_>,
    definitions: &[CustomNodeDefinition],
) -> Result<Option<CustomizationMatch>, PolicyError> {
    debug_check(node);
    for (index, def) in definitions.iter().enumerate() {
        let matched = def
            .condition
            .evaluate(node)
            .map_err(|err| rule_failure(RuleKind::CustomNodeCondition(index), node, err))?;
        trace!(index, pointer = %node.pointer(), matched, "custom node condition");
        if matched {
            return Ok(Some(CustomizationMatch::from_definition(index, def)));
        }
    }
    Ok(None)
}

/// Custom text for `key`; `None` defers to the default text.
pub fn resolve_text_override(
    node: &JsonNode<'_>,
    key: CustomTextKey,
    definitions: &CustomTextDefinitions,
) -> Result<Option<String>, PolicyError> {
    match definitions.get(&key) {
        None => Ok(None),
        Some(TextRule::Static(text)) => Ok(Some(text.clone())),
        Some(TextRule::Dynamic(rule)) => rule
            .evaluate(node)
            .map_err(|err| rule_failure(RuleKind::CustomText(key), node, err)),
    }
}

pub fn resolve_item_count_text(
    node: &JsonNode<'_>,
    config: &EditorConfig,
) -> Result<Option<String>, PolicyError> {
    NodePolicyResolver::new(config).item_count_text(node)
}

pub fn resolve_style(
    node: &JsonNode<'_>,
    target: StyleTarget,
    config: &EditorConfig,
) -> Result<Option<Style>, PolicyError> {
    NodePolicyResolver::new(config).style(node, target)
}

pub fn resolve_collapsed(node: &JsonNode<'_>, config: &EditorConfig) -> Result<bool, PolicyError> {
    NodePolicyResolver::new(config).collapsed(node)
}

pub fn resolve(node: &JsonNode<'_>, config: &EditorConfig) -> Result<NodeDecision, PolicyError> {
    NodePolicyResolver::new(config).resolve(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypeSelection;
    use crate::rule::{filter, rule_fn};
    use serde_json::json;

    #[test]
    fn test_no_rules_is_permissive() {
        let data = json!({"a": [1, 2]});
        let config = EditorConfig::new();
        for pointer in ["", "/a", "/a/1"] {
            let node = JsonNode::at_pointer(&data, pointer).unwrap();
            assert_eq!(
                resolve_capabilities(&node, &config).unwrap(),
                CapabilitySet::permissive()
            );
        }
    }

    #[test]
    fn test_type_selection_forms() {
        let data = json!("x");
        let node = JsonNode::root(&data);
        let def = CustomNodeDefinition::new(filter(|_| false), "date")
            .with_name("Date")
            .with_show_in_types_selector(true)
            .with_default_value(json!("2024-01-01T00:00:00.000Z"));
        let config = EditorConfig::new()
            .with_restrict_type_selection(TypeSelection::Allowed(vec![DataType::Array, DataType::String]))
            .with_custom_node(def);
        let caps = resolve_capabilities(&node, &config).unwrap();
        assert_eq!(caps.allowed_types, vec![DataType::String, DataType::Array]);
        assert_eq!(caps.custom_types.len(), 1);
        assert_eq!(caps.custom_types[0].label, "Date");
        assert_eq!(
            caps.custom_types[0].default_value,
            Some(json!("2024-01-01T00:00:00.000Z"))
        );

        let config = config.with_restrict_type_selection(TypeSelection::AllRestricted);
        let caps = resolve_capabilities(&node, &config).unwrap();
        assert!(caps.allowed_types.is_empty());
        assert!(caps.custom_types.is_empty());
    }

    #[test]
    fn test_resolved_decision_exposes_custom_type_defaults() {
        let data = json!({"born": "1939-05-01T00:00:00.000Z"});
        let node = JsonNode::at_pointer(&data, "/born").unwrap();
        let config = EditorConfig::new().with_custom_node(
            CustomNodeDefinition::new(filter(|_| false), "date-time-picker")
                .with_name("Date")
                .with_show_in_types_selector(true)
                .with_default_value(json!("2024-01-01T00:00:00.000Z")),
        );
        let decision = serde_json::to_value(resolve(&node, &config).unwrap()).unwrap();
        assert_eq!(
            decision["customTypes"],
            json!([{"label": "Date", "defaultValue": "2024-01-01T00:00:00.000Z"}])
        );
    }

    #[test]
    fn test_failing_restriction_is_reported() {
        let data = json!({"a": 1});
        let node = JsonNode::at_pointer(&data, "/a").unwrap();
        let config = EditorConfig::new().with_restrict_delete(rule_fn(
            |_: &JsonNode<'_>| -> Result<bool, RuleError> { Err(RuleError::message("lookup failed")) },
        ));
        let err = resolve_capabilities(&node, &config).unwrap_err();
        match err {
            PolicyError::Configuration(ConfigurationError::RuleFailed { rule, pointer, .. }) => {
                assert_eq!(rule, RuleKind::RestrictDelete);
                assert_eq!(pointer, "/a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_item_count_text_templates() {
        let data = json!({"one": [1], "many": [1, 2, 3], "none": {}});
        let config = EditorConfig::new();
        let resolver = NodePolicyResolver::new(&config);
        let text = |p: &str| {
            let node = JsonNode::at_pointer(&data, p).unwrap();
            resolver.item_count_text(&node).unwrap()
        };
        assert_eq!(text("/one").as_deref(), Some("1 item"));
        assert_eq!(text("/many").as_deref(), Some("3 items"));
        assert_eq!(text("/none").as_deref(), Some("0 items"));
        assert_eq!(text("/one/0"), None);
    }

    #[test]
    fn test_static_text_override_gets_count() {
        let data = json!([1, 2]);
        let node = JsonNode::root(&data);
        let config =
            EditorConfig::new().with_custom_text(CustomTextKey::ItemsMultiple, "{{count}} entries");
        assert_eq!(
            resolve_item_count_text(&node, &config).unwrap().as_deref(),
            Some("2 entries")
        );
        assert_eq!(
            resolve_text_override(&node, CustomTextKey::KeyNew, &config.custom_text).unwrap(),
            None
        );
        let resolver = NodePolicyResolver::new(&config);
        assert_eq!(resolver.text(&node, CustomTextKey::KeyNew).unwrap(), "Enter new key");
        assert_eq!(resolver.text(&node, CustomTextKey::ItemsMultiple).unwrap(), "2 entries");
    }

    #[test]
    fn test_dynamic_text_is_returned_verbatim() {
        let data = json!([{"name": "{{count}} club"}, {"tags": []}]);
        let config = EditorConfig::new().with_custom_text(
            CustomTextKey::ItemSingle,
            rule_fn(|n: &JsonNode<'_>| -> Result<Option<String>, RuleError> {
                Ok(n.value.get("name").and_then(Value::as_str).map(str::to_string))
            }),
        );
        let club = JsonNode::at_pointer(&data, "/0").unwrap();
        assert_eq!(
            resolve_item_count_text(&club, &config).unwrap().as_deref(),
            Some("{{count}} club")
        );
        let deferred = JsonNode::at_pointer(&data, "/1").unwrap();
        assert_eq!(
            resolve_item_count_text(&deferred, &config).unwrap().as_deref(),
            Some("1 item")
        );
    }

    #[test]
    fn test_collapse_modes() {
        let data = json!({"a": {"b": {"c": 1}}});
        let at = |p: &str| JsonNode::at_pointer(&data, p).unwrap();
        let by_level = EditorConfig::new().with_collapse(Collapse::Level(1));
        assert!(!resolve_collapsed(&at(""), &by_level).unwrap());
        assert!(resolve_collapsed(&at("/a"), &by_level).unwrap());
        assert!(!resolve_collapsed(&at("/a/b/c"), &by_level).unwrap());

        let all = EditorConfig::new().with_collapse(true);
        assert!(resolve_collapsed(&at(""), &all).unwrap());

        let by_key = EditorConfig::new().with_collapse(Collapse::when(|n| n.key_is("b")));
        assert!(resolve_collapsed(&at("/a/b"), &by_key).unwrap());
        assert!(!resolve_collapsed(&at("/a"), &by_key).unwrap());
    }

    #[test]
    fn test_style_rules() {
        let data = json!({"name": "Leo", "age": 12});
        let bold = json!({"fontWeight": "bold"}).as_object().cloned().unwrap();
        let config = EditorConfig::new()
            .with_style(
                StyleTarget::String,
                rule_fn(|n: &JsonNode<'_>| -> Result<Option<Style>, RuleError> {
                    Ok(n.key_is("name").then(|| {
                        let mut s = Style::new();
                        s.insert("fontWeight".into(), json!("bold"));
                        s
                    }))
                }),
            )
            .with_style(StyleTarget::Number, bold.clone());
        let name = JsonNode::at_pointer(&data, "/name").unwrap();
        let age = JsonNode::at_pointer(&data, "/age").unwrap();
        assert_eq!(resolve_style(&name, StyleTarget::String, &config).unwrap(), Some(bold.clone()));
        assert_eq!(resolve_style(&age, StyleTarget::Number, &config).unwrap(), Some(bold));
        assert_eq!(resolve_style(&age, StyleTarget::Bracket, &config).unwrap(), None);
    }

    #[test]
    fn test_resolve_rejects_invalid_node() {
        let data = json!({"a": 1});
        let mut node = JsonNode::at_pointer(&data, "/a").unwrap();
        node.level = 4;
        let err = resolve(&node, &EditorConfig::new()).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidNode(_)));
    }

    #[test]
    fn test_new_child_default_only_when_addable() {
        let data = json!({"list": [], "leaf": 1});
        let config = EditorConfig::new()
            .with_restrict_add(Restriction::when(|n| n.level == 0))
            .with_default_value(json!("New Value"));
        let list = JsonNode::at_pointer(&data, "/list").unwrap();
        assert_eq!(resolve(&list, &config).unwrap().new_child_default, Some(json!("New Value")));
        let root = JsonNode::root(&data);
        assert_eq!(resolve(&root, &config).unwrap().new_child_default, None);
        let leaf = JsonNode::at_pointer(&data, "/leaf").unwrap();
        assert_eq!(resolve(&leaf, &config).unwrap().new_child_default, None);
    }
}
