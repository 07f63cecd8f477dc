//! Edit-permission and customization policy for JSON tree editors.
//!
//! A visual JSON editor asks the same questions of every node it draws: may
//! the user edit, delete or add here, which types may a value be switched
//! to, what does a new child look like, and should the node be drawn by a
//! custom component. This crate answers them without any UI attached.
//!
//! Callers describe policy in an [`EditorConfig`], either in code with
//! closures or in a declarative [`PolicyFile`] whose rules are JSON
//! expressions. A [`NodePolicyResolver`] evaluates the configuration against
//! a [`JsonNode`] context.
//!
//! Restrictions keep the editor's sign convention: a rule returning `true`
//! forbids the action.
//!
//! ```
//! use json_edit_policy::{resolve_capabilities, EditorConfig, JsonNode, Restriction};
//! use serde_json::json;
//!
//! let data = json!({"id": 3, "name": "Bret"});
//! let config = EditorConfig::new().with_restrict_edit(Restriction::when(|n| n.key_is("id")));
//!
//! let id = JsonNode::at_pointer(&data, "/id").unwrap();
//! let name = JsonNode::at_pointer(&data, "/name").unwrap();
//! assert!(!resolve_capabilities(&id, &config).unwrap().can_edit);
//! assert!(resolve_capabilities(&name, &config).unwrap().can_edit);
//! ```

pub mod cli;
pub mod config;
pub mod custom_node;
pub mod data_type;
pub mod error;
pub mod node;
pub mod policy_file;
pub mod resolver;
pub mod rule;
pub mod style;
pub mod text;
pub mod walk;

pub use config::{Collapse, DefaultValue, EditorConfig, Restriction, TypeSelection};
pub use custom_node::{CustomNodeDefinition, CustomTypeOption, CustomizationMatch};
pub use data_type::DataType;
pub use error::{ConfigurationError, InvalidNodeError, PolicyError, RuleError, RuleKind};
pub use node::{JsonNode, NodeKind};
pub use policy_file::{CustomNodeSpec, PolicyFile};
pub use resolver::{
    resolve, resolve_capabilities, resolve_collapsed, resolve_customization,
    resolve_default_value, resolve_item_count_text, resolve_style, resolve_text_override,
    CapabilitySet, NodeDecision, NodePolicyResolver,
};
pub use rule::{
    filter, rule_fn, DefaultValueFunction, FilterFunction, FnRule, Rule, StyleFunction,
    TextFunction,
};
pub use style::{Style, StyleRule, StyleTarget, Styles};
pub use text::{CustomTextDefinitions, CustomTextKey, TextRule};
pub use walk::{resolve_node, resolve_tree, walk, NodeReport};

pub use json_edit_expression::Expression;
pub use json_edit_pointer::{Path, PathStep};
