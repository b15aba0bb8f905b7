use serde::Serialize;
use tracing::{debug, instrument};

use meli_client::Route;

use crate::error::{Error, ErrorKind, Result};
use crate::product::{Lifecycle, Product, ProductId};

/// Body of an item write.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ItemPayload<'a> {
    Full(&'a Product),
    Status { status: &'static str },
    Deleted { deleted: bool },
}

const CLOSE: ItemPayload<'static> = ItemPayload::Status { status: "closed" };
const DELETE: ItemPayload<'static> = ItemPayload::Deleted { deleted: true };

impl super::MeliRestClient {
    /// Fetch an item.
    ///
    /// The access token is attached when one is held; public items can be
    /// read without it.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product> {
        if id.is_empty() {
            return Err(Error::new(ErrorKind::NilProductId));
        }

        let url = self.url_with_token(Route::Items, &[id.as_str()], &())?;
        let product = self.http.send_json(self.http.get(url)).await?;
        Ok(product)
    }

    /// Persist `product` according to its [`Lifecycle`].
    ///
    /// Drafts are created, active products are updated with their full body,
    /// and closed or deleted products send only the matching status change.
    /// Returns the item as echoed by the API.
    #[instrument(skip(self, product), fields(id = ?product.id, lifecycle = ?product.lifecycle()))]
    pub async fn set_product(&self, product: &Product) -> Result<Product> {
        let lifecycle = product.lifecycle();
        if matches!(lifecycle, Lifecycle::Draft | Lifecycle::Active) {
            product.validate()?;
        }

        let id = product.id.clone().unwrap_or_default();
        match lifecycle {
            Lifecycle::Draft => {
                let mut body = product.clone();
                body.id = None;
                let url = self.url_requiring_token(Route::Items, &[], &())?;
                let request = self.http.post(url).json(&ItemPayload::Full(&body))?;
                let created: Product = self.http.send_json(request).await?;
                debug!(id = ?created.id, "Item created");
                Ok(created)
            }
            Lifecycle::Active => {
                let mut body = product.clone();
                body.id = None;
                self.put_item(&id, &ItemPayload::Full(&body)).await
            }
            Lifecycle::Closed => self.put_item(&id, &CLOSE).await,
            Lifecycle::Deleted => self.put_item(&id, &DELETE).await,
        }
    }

    /// Close an item, wait for the close to settle, then delete it.
    ///
    /// Returns the item as echoed by the delete write.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<Product> {
        if id.is_empty() {
            return Err(Error::new(ErrorKind::NilProductId));
        }

        self.put_item(id, &CLOSE).await?;
        tokio::time::sleep(self.settle_delay).await;
        self.put_item(id, &DELETE).await
    }

    async fn put_item(&self, id: &ProductId, payload: &ItemPayload<'_>) -> Result<Product> {
        let url = self.url_requiring_token(Route::Items, &[id.as_str()], &())?;
        let request = self.http.put(url).json(payload)?;
        let mut updated: Product = self.http.send_json(request).await?;
        if updated.is_new() {
            updated.id = Some(id.clone());
        }
        Ok(updated)
    }
}
