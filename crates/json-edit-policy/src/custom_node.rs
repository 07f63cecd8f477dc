//! Custom node definitions.
//!
//! A definition pairs a condition with a named renderer and presentation
//! flags. Definitions are ordered; the first whose condition holds for a
//! node customizes it, and later ones are never consulted.

use crate::rule::FilterFunction;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

#[derive(Clone)]
pub struct CustomNodeDefinition {
    pub name: Option<String>,
    pub condition: FilterFunction,
    /// Identifier of the component the host UI should draw.
    pub renderer: String,
    pub hide_key: bool,
    pub show_on_view: bool,
    pub show_on_edit: bool,
    pub show_edit_tools: bool,
    /// Offer this definition as an extra entry in the type selector.
    pub show_in_types_selector: bool,
    /// Value inserted when the definition is picked from the type selector.
    pub default_value: Option<Value>,
    pub props: Map<String, Value>,
}

impl CustomNodeDefinition {
    pub fn new(condition: FilterFunction, renderer: impl Into<String>) -> Self {
        CustomNodeDefinition {
            name: None,
            condition,
            renderer: renderer.into(),
            hide_key: false,
            show_on_view: true,
            show_on_edit: false,
            show_edit_tools: true,
            show_in_types_selector: false,
            default_value: None,
            props: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_hide_key(mut self, hide_key: bool) -> Self {
        self.hide_key = hide_key;
        self
    }

    pub fn with_show_on_view(mut self, show: bool) -> Self {
        self.show_on_view = show;
        self
    }

    pub fn with_show_on_edit(mut self, show: bool) -> Self {
        self.show_on_edit = show;
        self
    }

    pub fn with_show_edit_tools(mut self, show: bool) -> Self {
        self.show_edit_tools = show;
        self
    }

    pub fn with_show_in_types_selector(mut self, show: bool) -> Self {
        self.show_in_types_selector = show;
        self
    }

    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_props(mut self, props: Map<String, Value>) -> Self {
        self.props = props;
        self
    }

    /// Label used in the type selector: the name, else the renderer.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.renderer)
    }
}

impl fmt::Debug for CustomNodeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomNodeDefinition")
            .field("name", &self.name)
            .field("renderer", &self.renderer)
            .field("hide_key", &self.hide_key)
            .field("show_on_view", &self.show_on_view)
            .field("show_on_edit", &self.show_on_edit)
            .field("show_edit_tools", &self.show_edit_tools)
            .field("show_in_types_selector", &self.show_in_types_selector)
            .field("default_value", &self.default_value)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// The definition that won for a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationMatch {
    /// Position of the definition in the configured list.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub renderer: String,
    pub hide_key: bool,
    pub show_on_view: bool,
    pub show_on_edit: bool,
    pub show_edit_tools: bool,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
}

impl CustomizationMatch {
    pub fn from_definition(index: usize, def: &CustomNodeDefinition) -> Self {
        CustomizationMatch {
            index,
            name: def.name.clone(),
            renderer: def.renderer.clone(),
            hide_key: def.hide_key,
            show_on_view: def.show_on_view,
            show_on_edit: def.show_on_edit,
            show_edit_tools: def.show_edit_tools,
            props: def.props.clone(),
        }
    }
}

/// A custom definition offered as an extra type selector entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTypeOption {
    pub label: String,
    /// Value inserted when the entry is picked; `null` when unset.
    pub default_value: Option<Value>,
}

impl CustomTypeOption {
    pub fn from_definition(def: &CustomNodeDefinition) -> Self {
        CustomTypeOption {
            label: def.label().to_string(),
            default_value: def.default_value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::filter;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let def = CustomNodeDefinition::new(filter(|_| true), "date");
        assert!(def.show_on_view);
        assert!(!def.show_on_edit);
        assert!(def.show_edit_tools);
        assert!(!def.show_in_types_selector);
        assert!(!def.hide_key);
        assert_eq!(def.label(), "date");
        assert_eq!(def.with_name("Date").label(), "Date");
    }

    #[test]
    fn test_match_serializes_camel_case() {
        let def = CustomNodeDefinition::new(filter(|_| true), "badge")
            .with_name("publisher")
            .with_hide_key(true);
        let m = CustomizationMatch::from_definition(1, &def);
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            json!({
                "index": 1,
                "name": "publisher",
                "renderer": "badge",
                "hideKey": true,
                "showOnView": true,
                "showOnEdit": false,
                "showEditTools": true
            })
        );
    }

    #[test]
    fn test_type_option_carries_default_value() {
        let def = CustomNodeDefinition::new(filter(|_| false), "date-time-picker")
            .with_name("Date")
            .with_default_value(json!("2024-01-01T00:00:00.000Z"));
        assert_eq!(
            serde_json::to_value(CustomTypeOption::from_definition(&def)).unwrap(),
            json!({"label": "Date", "defaultValue": "2024-01-01T00:00:00.000Z"})
        );
        let bare = CustomNodeDefinition::new(filter(|_| false), "badge");
        assert_eq!(
            serde_json::to_value(CustomTypeOption::from_definition(&bare)).unwrap(),
            json!({"label": "badge", "defaultValue": null})
        );
    }
}
