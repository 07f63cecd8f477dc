//! Editor configuration: the rules a resolver evaluates.
//!
//! Everything is optional. An empty [`EditorConfig`] permits every action,
//! inserts `null` for new children, never collapses, and applies no
//! customization.

use crate::custom_node::CustomNodeDefinition;
use crate::data_type::DataType;
use crate::error::RuleError;
use crate::node::JsonNode;
use crate::rule::{filter, rule_fn, DefaultValueFunction, FilterFunction, Rule};
use crate::style::{StyleRule, StyleTarget, Styles};
use crate::text::{CustomTextDefinitions, CustomTextKey, TextRule};
use json_edit_expression::Expression;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_ROOT_NAME: &str = "data";

/// Restriction on an action. A predicate returning `true` forbids it.
#[derive(Clone, Default)]
pub enum Restriction {
    #[default]
    Never,
    Always,
    When(FilterFunction),
}

impl Restriction {
    pub fn when<F>(f: F) -> Self
    where
        F: Fn(&JsonNode<'_>) -> bool + Send + Sync + 'static,
    {
        Restriction::When(filter(f))
    }

    pub fn try_when<F>(f: F) -> Self
    where
        F: Fn(&JsonNode<'_>) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        Restriction::When(rule_fn(f))
    }

    pub fn expression(expr: Expression) -> Self {
        Restriction::When(Arc::new(expr))
    }

    pub fn is_forbidden(&self, node: &JsonNode<'_>) -> Result<bool, RuleError> {
        match self {
            Restriction::Never => Ok(false),
            Restriction::Always => Ok(true),
            Restriction::When(f) => f.evaluate(node),
        }
    }
}

impl From<bool> for Restriction {
    fn from(forbidden: bool) -> Self {
        if forbidden {
            Restriction::Always
        } else {
            Restriction::Never
        }
    }
}

impl From<FilterFunction> for Restriction {
    fn from(f: FilterFunction) -> Self {
        Restriction::When(f)
    }
}

impl fmt::Debug for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::Never => f.write_str("Never"),
            Restriction::Always => f.write_str("Always"),
            Restriction::When(_) => f.write_str("When(..)"),
        }
    }
}

/// Which types the type selector may offer.
///
/// Serialized as `false` (unrestricted), `true` (no type changes) or a list
/// of type names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "TypeSelectionRepr", into = "TypeSelectionRepr")]
pub enum TypeSelection {
    #[default]
    Unrestricted,
    AllRestricted,
    Allowed(Vec<DataType>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TypeSelectionRepr {
    Flag(bool),
    List(Vec<DataType>),
}

impl From<TypeSelectionRepr> for TypeSelection {
    fn from(repr: TypeSelectionRepr) -> Self {
        match repr {
            TypeSelectionRepr::Flag(false) => TypeSelection::Unrestricted,
            TypeSelectionRepr::Flag(true) => TypeSelection::AllRestricted,
            TypeSelectionRepr::List(types) => TypeSelection::Allowed(types),
        }
    }
}

impl From<TypeSelection> for TypeSelectionRepr {
    fn from(sel: TypeSelection) -> Self {
        match sel {
            TypeSelection::Unrestricted => TypeSelectionRepr::Flag(false),
            TypeSelection::AllRestricted => TypeSelectionRepr::Flag(true),
            TypeSelection::Allowed(types) => TypeSelectionRepr::List(types),
        }
    }
}

impl TypeSelection {
    /// Built-in types offered, in canonical order without duplicates.
    pub fn allowed_types(&self) -> Vec<DataType> {
        match self {
            TypeSelection::Unrestricted => DataType::ALL.to_vec(),
            TypeSelection::AllRestricted => Vec::new(),
            TypeSelection::Allowed(types) => DataType::ALL
                .into_iter()
                .filter(|t| types.contains(t))
                .collect(),
        }
    }

    pub fn is_all_restricted(&self) -> bool {
        matches!(self, TypeSelection::AllRestricted)
    }
}

/// Value for a newly added child.
#[derive(Clone)]
pub enum DefaultValue {
    Static(Value),
    Generated(DefaultValueFunction),
}

impl DefaultValue {
    pub fn generated<F>(f: F) -> Self
    where
        F: Fn(&JsonNode<'_>) -> Value + Send + Sync + 'static,
    {
        DefaultValue::Generated(rule_fn(move |node: &JsonNode<'_>| -> Result<Value, RuleError> {
            Ok(f(node))
        }))
    }

    pub fn expression(expr: Expression) -> Self {
        DefaultValue::Generated(Arc::new(expr))
    }
}

impl Default for DefaultValue {
    fn default() -> Self {
        DefaultValue::Static(Value::Null)
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Static(value)
    }
}

impl From<DefaultValueFunction> for DefaultValue {
    fn from(f: DefaultValueFunction) -> Self {
        DefaultValue::Generated(f)
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Static(v) => f.debug_tuple("Static").field(v).finish(),
            DefaultValue::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/// Initial collapsed state of collections.
#[derive(Clone, Default)]
pub enum Collapse {
    #[default]
    Never,
    All,
    /// Collections at this depth or deeper start collapsed.
    Level(usize),
    When(FilterFunction),
}

impl Collapse {
    pub fn when<F>(f: F) -> Self
    where
        F: Fn(&JsonNode<'_>) -> bool + Send + Sync + 'static,
    {
        Collapse::When(filter(f))
    }
}

impl From<bool> for Collapse {
    fn from(all: bool) -> Self {
        if all {
            Collapse::All
        } else {
            Collapse::Never
        }
    }
}

impl From<usize> for Collapse {
    fn from(level: usize) -> Self {
        Collapse::Level(level)
    }
}

impl From<FilterFunction> for Collapse {
    fn from(f: FilterFunction) -> Self {
        Collapse::When(f)
    }
}

impl fmt::Debug for Collapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collapse::Never => f.write_str("Never"),
            Collapse::All => f.write_str("All"),
            Collapse::Level(n) => f.debug_tuple("Level").field(n).finish(),
            Collapse::When(_) => f.write_str("When(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Name shown for the root and used as the head of copied accessors.
    pub root_name: String,
    pub collapse: Collapse,
    pub restrict_edit: Restriction,
    pub restrict_delete: Restriction,
    pub restrict_add: Restriction,
    pub restrict_type_selection: TypeSelection,
    pub default_value: DefaultValue,
    pub custom_node_definitions: Vec<CustomNodeDefinition>,
    pub custom_text: CustomTextDefinitions,
    pub styles: Styles,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            collapse: Collapse::default(),
            restrict_edit: Restriction::default(),
            restrict_delete: Restriction::default(),
            restrict_add: Restriction::default(),
            restrict_type_selection: TypeSelection::default(),
            default_value: DefaultValue::default(),
            custom_node_definitions: Vec::new(),
            custom_text: CustomTextDefinitions::new(),
            styles: Styles::new(),
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    pub fn with_collapse(mut self, collapse: impl Into<Collapse>) -> Self {
        self.collapse = collapse.into();
        self
    }

    pub fn with_restrict_edit(mut self, restriction: impl Into<Restriction>) -> Self {
        self.restrict_edit = restriction.into();
        self
    }

    pub fn with_restrict_delete(mut self, restriction: impl Into<Restriction>) -> Self {
        self.restrict_delete = restriction.into();
        self
    }

    pub fn with_restrict_add(mut self, restriction: impl Into<Restriction>) -> Self {
        self.restrict_add = restriction.into();
        self
    }

    pub fn with_restrict_type_selection(mut self, selection: TypeSelection) -> Self {
        self.restrict_type_selection = selection;
        self
    }

    pub fn with_default_value(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default_value = default.into();
        self
    }

    pub fn with_custom_node(mut self, definition: CustomNodeDefinition) -> Self {
        self.custom_node_definitions.push(definition);
        self
    }

    pub fn with_custom_text(mut self, key: CustomTextKey, rule: impl Into<TextRule>) -> Self {
        self.custom_text.insert(key, rule.into());
        self
    }

    pub fn with_style(mut self, target: StyleTarget, rule: impl Into<StyleRule>) -> Self {
        self.styles.insert(target, rule.into());
        self
    }
}
