//! Custom UI text.

use crate::rule::TextFunction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Placeholder substituted with the child count in item-count templates.
pub const COUNT_PLACEHOLDER: &str = "{{count}}";

/// Text slots the editor lets callers override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomTextKey {
    ItemSingle,
    ItemsMultiple,
    KeyNew,
    ErrorKeyExists,
    ErrorInvalidJson,
    ErrorUpdate,
    ErrorDelete,
    ErrorAdd,
    DefaultString,
    DefaultNewKey,
    ShowLess,
}

impl CustomTextKey {
    pub const ALL: [CustomTextKey; 11] = [
        CustomTextKey::ItemSingle,
        CustomTextKey::ItemsMultiple,
        CustomTextKey::KeyNew,
        CustomTextKey::ErrorKeyExists,
        CustomTextKey::ErrorInvalidJson,
        CustomTextKey::ErrorUpdate,
        CustomTextKey::ErrorDelete,
        CustomTextKey::ErrorAdd,
        CustomTextKey::DefaultString,
        CustomTextKey::DefaultNewKey,
        CustomTextKey::ShowLess,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CustomTextKey::ItemSingle => "ITEM_SINGLE",
            CustomTextKey::ItemsMultiple => "ITEMS_MULTIPLE",
            CustomTextKey::KeyNew => "KEY_NEW",
            CustomTextKey::ErrorKeyExists => "ERROR_KEY_EXISTS",
            CustomTextKey::ErrorInvalidJson => "ERROR_INVALID_JSON",
            CustomTextKey::ErrorUpdate => "ERROR_UPDATE",
            CustomTextKey::ErrorDelete => "ERROR_DELETE",
            CustomTextKey::ErrorAdd => "ERROR_ADD",
            CustomTextKey::DefaultString => "DEFAULT_STRING",
            CustomTextKey::DefaultNewKey => "DEFAULT_NEW_KEY",
            CustomTextKey::ShowLess => "SHOW_LESS",
        }
    }

    /// Built-in English text. Item counts carry [`COUNT_PLACEHOLDER`].
    pub fn default_text(self) -> &'static str {
        match self {
            CustomTextKey::ItemSingle => "{{count}} item",
            CustomTextKey::ItemsMultiple => "{{count}} items",
            CustomTextKey::KeyNew => "Enter new key",
            CustomTextKey::ErrorKeyExists => "Key already exists",
            CustomTextKey::ErrorInvalidJson => "Invalid JSON",
            CustomTextKey::ErrorUpdate => "Update unsuccessful",
            CustomTextKey::ErrorDelete => "Delete unsuccessful",
            CustomTextKey::ErrorAdd => "Adding node unsuccessful",
            CustomTextKey::DefaultString => "New data!",
            CustomTextKey::DefaultNewKey => "key",
            CustomTextKey::ShowLess => "(Show less)",
        }
    }
}

impl fmt::Display for CustomTextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomTextKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomTextKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown text key {s:?}"))
    }
}

/// A text override: fixed, or computed per node.
#[derive(Clone)]
pub enum TextRule {
    Static(String),
    Dynamic(TextFunction),
}

impl fmt::Debug for TextRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextRule::Static(s) => f.debug_tuple("Static").field(s).finish(),
            TextRule::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for TextRule {
    fn from(s: &str) -> Self {
        TextRule::Static(s.to_string())
    }
}

impl From<String> for TextRule {
    fn from(s: String) -> Self {
        TextRule::Static(s)
    }
}

impl From<TextFunction> for TextRule {
    fn from(f: TextFunction) -> Self {
        TextRule::Dynamic(f)
    }
}

pub type CustomTextDefinitions = BTreeMap<CustomTextKey, TextRule>;

/// Fills the count placeholder of an item-count template.
pub fn render_count(template: &str, count: usize) -> String {
    template.replace(COUNT_PLACEHOLDER, &count.to_string())
}
