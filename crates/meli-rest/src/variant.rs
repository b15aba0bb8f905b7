//! Product variations.
//!
//! A variant is one SKU of a product, told apart from its siblings by its
//! attribute combinations (`color=red`, `size=M`, ...).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeCombination};
use crate::error::{Error, ErrorKind, Result};
use crate::sale_term::SaleTerm;

/// Numeric variation id assigned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub u64);

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VariantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    /// Absent until the variant exists remotely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<i64>,
    #[serde(skip_serializing)]
    pub sold_quantity: Option<i64>,
    pub attribute_combinations: Vec<AttributeCombination>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sale_terms: Vec<SaleTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub picture_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_product_id: Option<serde_json::Value>,
}

impl Variant {
    /// New variant with a price and an initial stock.
    pub fn new(price: f64, available_quantity: i64) -> Self {
        Self {
            price: Some(price),
            available_quantity: Some(available_quantity),
            ..Self::default()
        }
    }

    pub fn with_combination(mut self, combination: AttributeCombination) -> Self {
        self.attribute_combinations.push(combination);
        self
    }

    pub fn with_picture_id(mut self, picture_id: impl Into<String>) -> Self {
        self.picture_ids.push(picture_id.into());
        self
    }

    /// Returns true if the variant has not been created remotely yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Check the fields the API requires before accepting the variant.
    ///
    /// Existing variants only need a price.
    pub fn validate(&self) -> Result<()> {
        if self.price.is_none_or(|price| price == 0.0) {
            return Err(Error::new(ErrorKind::NilVariantPrice));
        }
        if !self.is_new() {
            return Ok(());
        }
        if self.attribute_combinations.is_empty() {
            return Err(Error::new(ErrorKind::NilCombinations));
        }
        if self.available_quantity.is_none() {
            return Err(Error::new(ErrorKind::NilVariantStock));
        }
        if self.picture_ids.is_empty() {
            return Err(Error::new(ErrorKind::NilVariantPictures));
        }
        Ok(())
    }

    /// Returns true if both variants can live on the same product.
    ///
    /// Two variants conflict when they share an id, or when every combination
    /// of the smaller set has an equal counterpart in the larger one. Sets of
    /// equal size are checked in both directions. A variant without
    /// combinations never conflicts through them.
    pub fn is_compatible(&self, other: &Variant) -> bool {
        if let (Some(a), Some(b)) = (self.id, other.id) {
            if a == b {
                return false;
            }
        }

        let (a, b) = (&self.attribute_combinations, &other.attribute_combinations);
        if a.is_empty() || b.is_empty() {
            return true;
        }

        let duplicate = match a.len().cmp(&b.len()) {
            Ordering::Less => covers(b, a),
            Ordering::Greater => covers(a, b),
            Ordering::Equal => covers(a, b) || covers(b, a),
        };
        !duplicate
    }

    /// Add `delta` to the available stock; unset stock counts as zero.
    pub fn manage_stock(&mut self, delta: i64) {
        let current = self.available_quantity.unwrap_or(0);
        self.available_quantity = Some(current.saturating_add(delta));
    }

    /// Blank the value of every combination named `name`.
    pub(crate) fn clear_combination(&mut self, name: &str) {
        self.attribute_combinations
            .iter_mut()
            .filter(|combo| combo.name == name)
            .for_each(AttributeCombination::clear_value);
    }
}

/// Every combination of `subset` has an equal entry in `set`.
fn covers(set: &[AttributeCombination], subset: &[AttributeCombination]) -> bool {
    let matched = subset.iter().filter(|combo| set.contains(combo)).count();
    matched == subset.len()
}
