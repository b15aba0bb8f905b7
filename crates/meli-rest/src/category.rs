//! Categories and category predictions.

use std::fmt;

use serde::{Deserialize, Serialize};

use meli_auth::SiteId;

use crate::attribute::{AttributeTags, AttributeValue, ALLOW_VARIATIONS, DEFINES_PICTURE};

/// Shortest valid category id: a three-letter site code plus at least one
/// digit, e.g. `MLA5`.
pub const CATEGORY_ID_MIN_LEN: usize = 4;

/// Category identifier such as `MLA1234`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the id is long enough to carry a site prefix and a code.
    pub fn has_valid_length(&self) -> bool {
        self.0.chars().count() >= CATEGORY_ID_MIN_LEN
    }

    /// Site encoded in the id prefix.
    pub fn site(&self) -> Option<SiteId> {
        SiteId::from_id_prefix(&self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Category reference, as found in a prediction's path from the root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Category guessed from an item title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPrediction {
    pub id: CategoryId,
    pub name: String,
    /// Confidence between 0 and 1.
    pub prediction_probability: f64,
    pub shipping_modes: Vec<String>,
    pub path_from_root: Vec<Category>,
    pub variations: Vec<VariationAttribute>,
}

impl CategoryPrediction {
    /// Variation attributes that can drive product variations.
    pub fn variation_axes(&self) -> impl Iterator<Item = &VariationAttribute> {
        self.variations.iter().filter(|v| v.allows_variations())
    }
}

/// Attribute suggested by the predictor as a variation candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationAttribute {
    pub id: String,
    pub name: String,
    pub tags: AttributeTags,
    pub attribute_group_id: Option<String>,
    pub attribute_group_name: Option<String>,
    pub relevance: Option<u32>,
    pub hierarchy: Option<String>,
    pub value_type: Option<String>,
    pub value_max_length: Option<u32>,
    pub values: Vec<AttributeValue>,
}

impl VariationAttribute {
    pub fn allows_variations(&self) -> bool {
        self.tags.get(ALLOW_VARIATIONS)
    }

    pub fn defines_picture(&self) -> bool {
        self.tags.get(DEFINES_PICTURE)
    }
}
