use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};
use crate::product::Product;
use crate::webhook::WebHook;

impl super::MeliRestClient {
    /// Fetch the current state of the item a notification refers to.
    #[instrument(skip(self, hook), fields(resource = %hook.resource, topic = %hook.topic))]
    pub async fn product_from_webhook(&self, hook: &WebHook) -> Result<Product> {
        let id = hook
            .product_id()
            .ok_or_else(|| Error::new(ErrorKind::InvalidResource(hook.resource.clone())))?;
        self.get_product(&id).await
    }
}
