//! Fetch and print every listing of the authenticated seller.
//!
//! Credentials come from the environment; the access token is refreshed
//! before scanning.
//!
//! ```sh
//! export MELI_APP_ID=... MELI_SECRET=... MELI_REFRESH_TOKEN=... MELI_ACCESS_TOKEN=...
//! RUST_LOG=meli_rest=debug cargo run --bin meli-fetch
//! cargo run --bin meli-fetch -- --json
//! ```

use anyhow::Context;
use meli_api::rest::{MeliRestClient, Product};
use meli_api::Credentials;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let credentials = Credentials::from_env().context("reading MELI_* credentials")?;
    let mut client = MeliRestClient::new(credentials)?;

    client
        .refresh_token()
        .await
        .context("refreshing the access token")?;

    let products = client
        .fetch_products()
        .await
        .context("fetching listings")?;

    tracing::info!(count = products.len(), "Listings fetched");

    if std::env::args().any(|arg| arg == "--json") {
        let listings: Vec<_> = products.iter().map(listing).collect();
        println!("{}", serde_json::to_string_pretty(&listings)?);
    } else {
        for product in &products {
            println!("{}", summary(product));
        }
    }
    Ok(())
}

/// JSON view of a fetched listing, read-only fields included.
///
/// `Product`'s own serialization is the write body and leaves those out.
fn listing(product: &Product) -> serde_json::Value {
    json!({
        "id": product.id,
        "site_id": product.site_id,
        "title": product.title,
        "category_id": product.category_id,
        "status": product.status,
        "price": product.price,
        "currency_id": product.currency_id,
        "available_quantity": product.available_quantity,
        "initial_quantity": product.initial_quantity,
        "sold_quantity": product.sold_quantity,
        "listing_type_id": product.listing_type,
        "variations": product.variants.len(),
        "seller_id": product.seller_id,
        "permalink": product.permalink,
        "date_created": product.date_created,
        "last_updated": product.last_updated,
        "deleted": product.deleted,
    })
}

fn summary(product: &Product) -> String {
    format!(
        "{}\t{}\t{}",
        product.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        product.title.as_deref().unwrap_or("-"),
        product
            .available_quantity
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".to_string()),
    )
}
