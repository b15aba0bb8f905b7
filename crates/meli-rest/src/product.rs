//! Products (marketplace listings).
//!
//! A [`Product`] is either hydrated from the API or built locally with
//! [`Product::builder`]. Whether a write creates or updates the listing, and
//! which payload it sends, follows from [`Product::lifecycle`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use meli_auth::SiteId;

use crate::attribute::Attribute;
use crate::category::CategoryId;
use crate::error::{Error, ErrorKind, Result};
use crate::picture::Picture;
use crate::sale_term::SaleTerm;
use crate::variant::{Variant, VariantId};

/// Item id such as `MLA600190449`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    Used,
    NotSpecified,
}

impl FromStr for Condition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            "not_specified" => Ok(Condition::NotSpecified),
            _ => Err(Error::new(ErrorKind::InvalidCondition)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyingMode {
    BuyItNow,
    Auction,
    Classified,
}

impl FromStr for BuyingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "buy_it_now" => Ok(BuyingMode::BuyItNow),
            "auction" => Ok(BuyingMode::Auction),
            "classified" => Ok(BuyingMode::Classified),
            _ => Err(Error::new(ErrorKind::InvalidBuyingMode)),
        }
    }
}

/// Exposure level of a listing. Availability depends on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    GoldPro,
    GoldPremium,
    GoldSpecial,
    Gold,
    Silver,
    Bronze,
    Free,
}

impl ListingType {
    /// Returns true if the site sells listings of this type.
    ///
    /// Brazil and Portugal only offer `gold_pro`, `gold_special` and `free`.
    pub fn is_offered_on(self, site: SiteId) -> bool {
        match site {
            SiteId::Mlb | SiteId::Mpt => matches!(
                self,
                ListingType::GoldPro | ListingType::GoldSpecial | ListingType::Free
            ),
            _ => true,
        }
    }
}

impl FromStr for ListingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gold_pro" => Ok(ListingType::GoldPro),
            "gold_premium" => Ok(ListingType::GoldPremium),
            "gold_special" => Ok(ListingType::GoldSpecial),
            "gold" => Ok(ListingType::Gold),
            "silver" => Ok(ListingType::Silver),
            "bronze" => Ok(ListingType::Bronze),
            "free" => Ok(ListingType::Free),
            _ => Err(Error::new(ErrorKind::InvalidListingType)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Paused,
    Closed,
    UnderReview,
    Inactive,
    NotYetActive,
    PaymentRequired,
}

/// Where a product stands, as far as the next write is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Not created yet; the next write is a create.
    Draft,
    /// Created; the next write sends the full entity.
    Active,
    /// Marked for closing; the next write sends `{"status":"closed"}`.
    Closed,
    /// Marked for deletion; the next write sends `{"deleted":true}`.
    Deleted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Pending {
    #[default]
    None,
    Close,
    Delete,
}

/// A marketplace listing.
///
/// Many remote fields are not mapped. Read-only fields are decoded but never
/// sent back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Absent until the listing exists remotely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<SiteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    /// `None` means "unset", which is not the same as zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<i64>,
    #[serde(skip_serializing)]
    pub initial_quantity: Option<i64>,
    #[serde(skip_serializing)]
    pub sold_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buying_mode: Option<BuyingMode>,
    #[serde(rename = "listing_type_id", skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pictures: Vec<Picture>,
    #[serde(rename = "variations", skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sale_terms: Vec<SaleTerm>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing)]
    pub seller_id: Option<u64>,
    #[serde(skip_serializing)]
    pub permalink: Option<String>,
    #[serde(skip_serializing)]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing)]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Set by the API once a listing has been removed.
    #[serde(skip_serializing)]
    pub deleted: bool,
    #[serde(skip)]
    pending: Pending,
}

impl Product {
    /// Start building a new listing.
    pub fn builder() -> ProductBuilder {
        ProductBuilder::default()
    }

    /// Returns true if the listing has not been created remotely yet.
    pub fn is_new(&self) -> bool {
        self.id.as_ref().is_none_or(ProductId::is_empty)
    }

    /// The state that decides what the next write sends.
    pub fn lifecycle(&self) -> Lifecycle {
        if self.is_new() {
            return Lifecycle::Draft;
        }
        match self.pending {
            Pending::None => Lifecycle::Active,
            Pending::Close => Lifecycle::Closed,
            Pending::Delete => Lifecycle::Deleted,
        }
    }

    /// Mark an existing listing to be closed by the next write.
    ///
    /// Drafts are left alone.
    pub fn close(&mut self) {
        if !self.is_new() {
            self.pending = Pending::Close;
        }
    }

    /// Mark an existing listing to be deleted by the next write.
    ///
    /// Drafts are left alone.
    pub fn delete(&mut self) {
        if !self.is_new() {
            self.pending = Pending::Delete;
        }
    }

    /// Check the fields the API requires before accepting the listing.
    ///
    /// Existing listings only need a price.
    pub fn validate(&self) -> Result<()> {
        if let Some(category) = &self.category_id {
            if !category.is_empty() && !category.has_valid_length() {
                return Err(Error::new(ErrorKind::InvalidCategoryId(
                    category.to_string(),
                )));
            }
        }

        if self.price.is_none_or(|price| price == 0.0) {
            return Err(Error::new(ErrorKind::NilPrice));
        }

        if !self.is_new() {
            return Ok(());
        }

        if self.title.as_deref().is_none_or(str::is_empty) {
            return Err(Error::new(ErrorKind::NilTitle));
        }

        let Some(category) = self.category_id.as_ref().filter(|c| !c.is_empty()) else {
            return Err(Error::new(ErrorKind::NilCategoryId));
        };

        if self.available_quantity.is_none() {
            return Err(Error::new(ErrorKind::NilStock));
        }

        if !matches!(self.condition, Some(Condition::New | Condition::Used)) {
            return Err(Error::new(ErrorKind::InvalidCondition));
        }

        if self.buying_mode.is_none() {
            return Err(Error::new(ErrorKind::InvalidBuyingMode));
        }

        let offered = match (self.listing_type, category.site()) {
            (Some(listing), Some(site)) => listing.is_offered_on(site),
            _ => false,
        };
        if !offered {
            return Err(Error::new(ErrorKind::InvalidListingType));
        }

        if self.pictures.is_empty() {
            return Err(Error::new(ErrorKind::NilPictures));
        }

        Ok(())
    }

    /// Variant with the given id.
    pub fn variant(&self, id: VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == Some(id))
    }

    /// Validate `variant` and append it if it conflicts with none of the
    /// existing variants.
    ///
    /// On error the variant list is untouched.
    pub fn add_variant(&mut self, variant: Variant) -> Result<()> {
        variant.validate()?;

        let conflicts = self
            .variants
            .iter()
            .any(|existing| !existing.is_compatible(&variant));
        if conflicts {
            return Err(Error::new(ErrorKind::IncompatibleVariant));
        }

        self.variants.push(variant);
        Ok(())
    }

    /// Add `delta` to the listing stock. Negative deltas subtract and the
    /// result is not clamped.
    pub fn manage_stock(&mut self, delta: i64) {
        let current = self.available_quantity.unwrap_or(0);
        self.available_quantity = Some(current.saturating_add(delta));
    }

    /// Apply per-variant stock deltas. Ids without a matching variant are
    /// ignored.
    pub fn manage_var_stocks(&mut self, deltas: &HashMap<VariantId, i64>) {
        for variant in &mut self.variants {
            if let Some(delta) = variant.id.and_then(|id| deltas.get(&id)) {
                variant.manage_stock(*delta);
            }
        }
    }

    /// Blank the value of every combination named `name` on every variant,
    /// keeping the axis itself.
    pub fn remove_combination(&mut self, name: &str) {
        for variant in &mut self.variants {
            variant.clear_combination(name);
        }
    }

    /// Remove the variant with the given id by moving the last variant into
    /// its slot.
    pub fn remove_variant(&mut self, id: VariantId) -> Option<Variant> {
        let idx = self.variants.iter().position(|v| v.id == Some(id))?;
        Some(self.variants.swap_remove(idx))
    }
}

/// Builder for new listings. [`ProductBuilder::build`] runs the full
/// validation.
#[derive(Debug, Default)]
pub struct ProductBuilder {
    product: Product,
    variants: Vec<Variant>,
}

impl ProductBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.product.title = Some(title.into());
        self
    }

    pub fn category_id(mut self, category_id: impl Into<CategoryId>) -> Self {
        self.product.category_id = Some(category_id.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.product.price = Some(price);
        self
    }

    pub fn currency_id(mut self, currency_id: impl Into<String>) -> Self {
        self.product.currency_id = Some(currency_id.into());
        self
    }

    pub fn available_quantity(mut self, quantity: i64) -> Self {
        self.product.available_quantity = Some(quantity);
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.product.condition = Some(condition);
        self
    }

    pub fn buying_mode(mut self, buying_mode: BuyingMode) -> Self {
        self.product.buying_mode = Some(buying_mode);
        self
    }

    pub fn listing_type(mut self, listing_type: ListingType) -> Self {
        self.product.listing_type = Some(listing_type);
        self
    }

    pub fn warranty(mut self, warranty: impl Into<String>) -> Self {
        self.product.warranty = Some(warranty.into());
        self
    }

    pub fn picture(mut self, picture: Picture) -> Self {
        self.product.pictures.push(picture);
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.product.attributes.push(attribute);
        self
    }

    pub fn sale_term(mut self, sale_term: SaleTerm) -> Self {
        self.product.sale_terms.push(sale_term);
        self
    }

    /// Queue a variant; it goes through [`Product::add_variant`] on build.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn build(self) -> Result<Product> {
        let mut product = self.product;
        product.validate()?;
        for variant in self.variants {
            product.add_variant(variant)?;
        }
        Ok(product)
    }
}
