use tracing::instrument;

use meli_client::Route;

use crate::error::{Error, ErrorKind, Result};
use crate::product::ProductId;
use crate::variant::{Variant, VariantId};

impl super::MeliRestClient {
    /// Fetch one variation of an item.
    #[instrument(skip(self))]
    pub async fn get_variant(&self, product_id: &ProductId, variant_id: VariantId) -> Result<Variant> {
        if product_id.is_empty() {
            return Err(Error::new(ErrorKind::NilProductId));
        }

        let variant_id = variant_id.to_string();
        let url = self.url_with_token(
            Route::Variations,
            &[product_id.as_str(), variant_id.as_str()],
            &(),
        )?;
        let variant = self.http.send_json(self.http.get(url)).await?;
        Ok(variant)
    }

    /// Create or update a variation of an item.
    ///
    /// New variants are validated and posted to the item's variation list.
    /// Existing ones are updated in place with their id left out of the body.
    #[instrument(skip(self, variant), fields(variant_id = ?variant.id))]
    pub async fn set_variant(&self, product_id: &ProductId, variant: &Variant) -> Result<Variant> {
        if product_id.is_empty() {
            return Err(Error::new(ErrorKind::NilProductId));
        }
        variant.validate()?;

        match variant.id {
            None => {
                let url =
                    self.url_requiring_token(Route::Variations, &[product_id.as_str()], &())?;
                let request = self.http.post(url).json(variant)?;
                Ok(self.http.send_json(request).await?)
            }
            Some(id) => {
                let id_segment = id.to_string();
                let url = self.url_requiring_token(
                    Route::Variations,
                    &[product_id.as_str(), id_segment.as_str()],
                    &(),
                )?;

                let mut body = variant.clone();
                body.id = None;
                let request = self.http.put(url).json(&body)?;

                let mut updated: Variant = self.http.send_json(request).await?;
                updated.id.get_or_insert(id);
                Ok(updated)
            }
        }
    }
}
