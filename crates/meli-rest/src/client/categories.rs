use tracing::instrument;

use meli_client::Route;

use crate::attribute::Attribute;
use crate::category::CategoryId;
use crate::error::{Error, ErrorKind, Result};

impl super::MeliRestClient {
    /// All attributes of a category.
    #[instrument(skip(self))]
    pub async fn category_attributes(&self, category_id: &CategoryId) -> Result<Vec<Attribute>> {
        if category_id.is_empty() {
            return Err(Error::new(ErrorKind::NilCategoryId));
        }

        let url = self
            .http
            .router()
            .route_to(Route::CategoryAttributes, &[category_id.as_str()], &())?;
        let attributes = self.http.send_json(self.http.get(url)).await?;
        Ok(attributes)
    }

    /// Attributes of a category that can be used as variation axes.
    #[instrument(skip(self))]
    pub async fn category_variable_attributes(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Attribute>> {
        let mut attributes = self.category_attributes(category_id).await?;
        attributes.retain(Attribute::allows_variations);
        Ok(attributes)
    }
}
