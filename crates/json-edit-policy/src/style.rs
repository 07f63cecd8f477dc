//! Theme style overrides.
//!
//! A style is a JSON object of CSS properties. Rules may be attached to any
//! [`StyleTarget`]; a dynamic rule sees the node being drawn and may return
//! `None` to keep the theme's own style.

use crate::data_type::DataType;
use crate::rule::StyleFunction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type Style = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleTarget {
    Container,
    Collection,
    CollectionInner,
    CollectionElement,
    DropZone,
    Property,
    Bracket,
    ItemCount,
    String,
    Number,
    Boolean,
    Null,
    Input,
    InputHighlight,
    Error,
    IconCollection,
    IconEdit,
    IconDelete,
    IconAdd,
    IconCopy,
    IconOk,
    IconCancel,
}

impl StyleTarget {
    pub const ALL: [StyleTarget; 22] = [
        StyleTarget::Container,
        StyleTarget::Collection,
        StyleTarget::CollectionInner,
        StyleTarget::CollectionElement,
        StyleTarget::DropZone,
        StyleTarget::Property,
        StyleTarget::Bracket,
        StyleTarget::ItemCount,
        StyleTarget::String,
        StyleTarget::Number,
        StyleTarget::Boolean,
        StyleTarget::Null,
        StyleTarget::Input,
        StyleTarget::InputHighlight,
        StyleTarget::Error,
        StyleTarget::IconCollection,
        StyleTarget::IconEdit,
        StyleTarget::IconDelete,
        StyleTarget::IconAdd,
        StyleTarget::IconCopy,
        StyleTarget::IconOk,
        StyleTarget::IconCancel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleTarget::Container => "container",
            StyleTarget::Collection => "collection",
            StyleTarget::CollectionInner => "collectionInner",
            StyleTarget::CollectionElement => "collectionElement",
            StyleTarget::DropZone => "dropZone",
            StyleTarget::Property => "property",
            StyleTarget::Bracket => "bracket",
            StyleTarget::ItemCount => "itemCount",
            StyleTarget::String => "string",
            StyleTarget::Number => "number",
            StyleTarget::Boolean => "boolean",
            StyleTarget::Null => "null",
            StyleTarget::Input => "input",
            StyleTarget::InputHighlight => "inputHighlight",
            StyleTarget::Error => "error",
            StyleTarget::IconCollection => "iconCollection",
            StyleTarget::IconEdit => "iconEdit",
            StyleTarget::IconDelete => "iconDelete",
            StyleTarget::IconAdd => "iconAdd",
            StyleTarget::IconCopy => "iconCopy",
            StyleTarget::IconOk => "iconOk",
            StyleTarget::IconCancel => "iconCancel",
        }
    }

    /// The slot that styles a node's value.
    pub fn for_value(data_type: DataType) -> StyleTarget {
        match data_type {
            DataType::String => StyleTarget::String,
            DataType::Number => StyleTarget::Number,
            DataType::Boolean => StyleTarget::Boolean,
            DataType::Null => StyleTarget::Null,
            DataType::Object | DataType::Array => StyleTarget::Collection,
        }
    }
}

impl fmt::Display for StyleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleTarget::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown style target {s:?}"))
    }
}

#[derive(Clone)]
pub enum StyleRule {
    Static(Style),
    Dynamic(StyleFunction),
}

impl fmt::Debug for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleRule::Static(s) => f.debug_tuple("Static").field(s).finish(),
            StyleRule::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<Style> for StyleRule {
    fn from(style: Style) -> Self {
        StyleRule::Static(style)
    }
}

impl From<StyleFunction> for StyleRule {
    fn from(f: StyleFunction) -> Self {
        StyleRule::Dynamic(f)
    }
}

pub type Styles = BTreeMap<StyleTarget, StyleRule>;
