//! Attributes and attribute combinations.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Tag marking attributes that may define product variations.
pub const ALLOW_VARIATIONS: &str = "allow_variations";

/// Tag marking the variation attribute that selects the main picture.
pub const DEFINES_PICTURE: &str = "defines_picture";

/// A category or item attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_group_name: Option<String>,
    #[serde(skip_serializing_if = "AttributeTags::is_empty")]
    pub tags: AttributeTags,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<AttributeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_max_length: Option<u32>,
}

impl Attribute {
    /// Returns true if the attribute can be used as a variation axis.
    pub fn allows_variations(&self) -> bool {
        self.tags.get(ALLOW_VARIATIONS)
    }
}

/// One allowed value of an attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeValue {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "struct", skip_serializing_if = "Option::is_none")]
    pub structure: Option<serde_json::Value>,
}

/// Named boolean flags attached to an attribute.
///
/// Accepts both `{"allow_variations": true}` and
/// `[{"allow_variations": true}, {"required": true}]` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeTags(BTreeMap<String, bool>);

impl AttributeTags {
    /// Value of a flag; unset flags are false.
    pub fn get(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.0.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(&str, bool); N]> for AttributeTags {
    fn from(tags: [(&str, bool); N]) -> Self {
        Self(
            tags.into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for AttributeTags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Map(BTreeMap<String, bool>),
            List(Vec<BTreeMap<String, bool>>),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Map(map) => Self(map),
            Wire::List(list) => Self(list.into_iter().flatten().collect()),
        })
    }
}

/// The value a variant takes on one variation axis, e.g. `color=red`.
///
/// Two combinations are equal when their `id`, `value_id` and `value_name`
/// match. `name` is display text and does not take part.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeCombination {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
}

impl PartialEq for AttributeCombination {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.value_id == other.value_id
            && self.value_name == other.value_name
    }
}

impl AttributeCombination {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value_id: impl Into<String>,
        value_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value_id: Some(value_id.into()),
            value_name: Some(value_name.into()),
        }
    }

    /// Blank the value while keeping the axis.
    pub fn clear_value(&mut self) {
        self.value_id = None;
        self.value_name = None;
    }
}
