//! # meli-rest
//!
//! MercadoLibre REST API client: listings, variations, categories and scans.
//!
//! ## Features
//!
//! - **Items** - Create, read, update, close and delete listings
//! - **Variations** - Local variant management with conflict detection, plus
//!   remote reads and writes
//! - **Categories** - Category attributes and variation axes
//! - **Category predictor** - Guess a category from one or many titles
//! - **Scans** - Page through every item of a seller and batch-fetch them
//! - **Notifications** - Resolve a notification to the item it refers to
//!
//! ## Example
//!
//! ```rust,ignore
//! use meli_auth::Credentials;
//! use meli_rest::{BuyingMode, Condition, ListingType, MeliRestClient, Picture, Product};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), meli_rest::Error> {
//!     let mut client = MeliRestClient::new(Credentials::from_env()?)?;
//!     client.refresh_token().await?;
//!
//!     let draft = Product::builder()
//!         .title("Silla de madera")
//!         .category_id("MLA1234")
//!         .price(1500.0)
//!         .currency_id("ARS")
//!         .available_quantity(10)
//!         .condition(Condition::New)
//!         .buying_mode(BuyingMode::BuyItNow)
//!         .listing_type(ListingType::GoldSpecial)
//!         .picture(Picture::from_source("https://example.com/silla.jpg"))
//!         .build()?;
//!
//!     let mut created = client.set_product(&draft).await?;
//!     created.manage_stock(-1);
//!     client.set_product(&created).await?;
//!
//!     if let Some(id) = &created.id {
//!         client.delete_product(id).await?;
//!     }
//!     Ok(())
//! }
//! ```

mod attribute;
mod category;
mod client;
mod error;
mod picture;
mod product;
mod sale_term;
mod variant;
mod webhook;

// Main client
pub use client::{MeliRestClient, DEFAULT_SETTLE_DELAY, MULTIGET_LIMIT, SCAN_PAGE_LIMIT};

// Entities
pub use attribute::{
    Attribute, AttributeCombination, AttributeTags, AttributeValue, ALLOW_VARIATIONS,
    DEFINES_PICTURE,
};
pub use category::{Category, CategoryId, CategoryPrediction, VariationAttribute, CATEGORY_ID_MIN_LEN};
pub use picture::Picture;
pub use product::{
    BuyingMode, Condition, Lifecycle, ListingType, Product, ProductBuilder, ProductId,
    ProductStatus,
};
pub use sale_term::SaleTerm;
pub use variant::{Variant, VariantId};
pub use webhook::WebHook;

// Error types
pub use error::{Error, ErrorKind, Result};
